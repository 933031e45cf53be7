//! Employer service

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AuditAction, Employer, EmployerCreate, EmployerSearch, EmployerUpdate, EntityType,
};
use shared::pagination::PagedResponse;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::AuditService;
use crate::db::repository::{RepoError, employer};
use crate::validation;

#[derive(Debug, Clone)]
pub struct EmployerService {
    pool: SqlitePool,
    audit: AuditService,
}

pub(crate) fn employer_not_found(id: Uuid) -> AppError {
    AppError::with_message(ErrorCode::EmployerNotFound, format!("Employer {id} not found"))
        .with_detail("employerId", id.to_string())
}

fn rc_number_taken(rc_number: &str) -> AppError {
    AppError::with_message(
        ErrorCode::RcNumberExists,
        format!("RC number {rc_number} is already registered"),
    )
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

impl EmployerService {
    pub fn new(pool: SqlitePool, audit: AuditService) -> Self {
        Self { pool, audit }
    }

    async fn load(&self, id: Uuid) -> AppResult<Employer> {
        employer::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| employer_not_found(id))
    }

    pub async fn create_employer(&self, dto: &EmployerCreate, actor: &str) -> AppResult<Employer> {
        validation::employer::validate_create(dto)?;
        let dto = EmployerCreate {
            company_name: dto.company_name.trim().to_string(),
            rc_number: dto.rc_number.trim().to_string(),
            address: non_blank(dto.address.as_deref()),
            contact_email: non_blank(dto.contact_email.as_deref()),
            contact_phone: non_blank(dto.contact_phone.as_deref()),
        };

        if employer::exists_by_rc_number(&self.pool, &dto.rc_number).await? {
            return Err(rc_number_taken(&dto.rc_number));
        }

        let created = employer::create(&self.pool, &dto, actor)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => rc_number_taken(&dto.rc_number),
                other => other.into(),
            })?;

        tracing::info!(employer_id = %created.id, rc_number = %created.rc_number, actor, "Employer created");
        self.audit
            .log(
                AuditAction::EmployerCreated,
                EntityType::Employer,
                created.id,
                actor,
                None,
                Some(&created),
            )
            .await;
        Ok(created)
    }

    pub async fn get_employer(&self, id: Uuid) -> AppResult<Employer> {
        self.load(id).await
    }

    pub async fn search_employers(
        &self,
        query: &EmployerSearch,
    ) -> AppResult<PagedResponse<Employer>> {
        validation::employer::validate_search(query)?;
        let (rows, total) = employer::search(&self.pool, query).await?;
        Ok(PagedResponse::new(rows, total, query.page()))
    }

    /// Partial update; the RC number is fixed at registration
    pub async fn update_employer(
        &self,
        id: Uuid,
        dto: &EmployerUpdate,
        actor: &str,
    ) -> AppResult<Employer> {
        let existing = self.load(id).await?;
        validation::employer::validate_update(dto)?;

        let mut changed = existing.clone();
        if let Some(name) = &dto.company_name {
            changed.company_name = name.trim().to_string();
        }
        if dto.address.is_some() {
            changed.address = non_blank(dto.address.as_deref());
        }
        if dto.contact_email.is_some() {
            changed.contact_email = non_blank(dto.contact_email.as_deref());
        }
        if dto.contact_phone.is_some() {
            changed.contact_phone = non_blank(dto.contact_phone.as_deref());
        }
        if let Some(active) = dto.is_active {
            changed.is_active = active;
        }

        let updated = employer::update(&self.pool, &changed, actor)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => employer_not_found(id),
                other => other.into(),
            })?;

        tracing::info!(employer_id = %id, actor, "Employer updated");
        self.audit
            .log(
                AuditAction::EmployerUpdated,
                EntityType::Employer,
                id,
                actor,
                Some(&existing),
                Some(&updated),
            )
            .await;
        Ok(updated)
    }

    pub async fn soft_delete_employer(&self, id: Uuid, actor: &str) -> AppResult<()> {
        let existing = self.load(id).await?;
        if !employer::soft_delete(&self.pool, id, actor).await? {
            return Err(employer_not_found(id));
        }

        tracing::info!(employer_id = %id, actor, "Employer deleted");
        self.audit
            .log(
                AuditAction::EmployerDeleted,
                EntityType::Employer,
                id,
                actor,
                Some(&existing),
                None,
            )
            .await;
        Ok(())
    }
}
