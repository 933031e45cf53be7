//! Member service

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AuditAction, EntityType, Member, MemberCreate, MemberSearch, MemberStatus, MemberUpdate,
    MemberView,
};
use shared::pagination::PagedResponse;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::AuditService;
use crate::db::repository::{RepoError, employer, member};
use crate::validation;

#[derive(Debug, Clone)]
pub struct MemberService {
    pool: SqlitePool,
    audit: AuditService,
}

pub(crate) fn member_not_found(id: Uuid) -> AppError {
    AppError::with_message(ErrorCode::MemberNotFound, format!("Member {id} not found"))
        .with_detail("memberId", id.to_string())
}

fn email_taken(email: &str) -> AppError {
    AppError::with_message(
        ErrorCode::EmailAlreadyExists,
        format!("Email {email} is already registered"),
    )
}

/// A racing insert can still trip the unique index after the pre-check.
fn map_duplicate(err: RepoError, email: &str) -> AppError {
    match err {
        RepoError::Duplicate(_) => email_taken(email),
        other => other.into(),
    }
}

fn trimmed(dto: &MemberCreate) -> MemberCreate {
    MemberCreate {
        first_name: dto.first_name.trim().to_string(),
        last_name: dto.last_name.trim().to_string(),
        email: dto.email.trim().to_string(),
        phone_number: dto.phone_number.trim().to_string(),
        date_of_birth: dto.date_of_birth,
        gender: dto
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(String::from),
        employer_id: dto.employer_id,
    }
}

impl MemberService {
    pub fn new(pool: SqlitePool, audit: AuditService) -> Self {
        Self { pool, audit }
    }

    async fn load(&self, id: Uuid) -> AppResult<Member> {
        member::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| member_not_found(id))
    }

    async fn ensure_employer(&self, employer_id: Option<Uuid>) -> AppResult<()> {
        if let Some(id) = employer_id
            && employer::find_by_id(&self.pool, id).await?.is_none()
        {
            return Err(super::employer::employer_not_found(id));
        }
        Ok(())
    }

    pub async fn create_member(&self, dto: &MemberCreate, actor: &str) -> AppResult<MemberView> {
        let dto = trimmed(dto);
        validation::member::validate_member(&dto, shared::util::today())?;
        self.ensure_employer(dto.employer_id).await?;

        if member::exists_by_email(&self.pool, &dto.email, None).await? {
            return Err(email_taken(&dto.email));
        }

        let created = member::create(&self.pool, &dto, actor)
            .await
            .map_err(|e| map_duplicate(e, &dto.email))?;

        tracing::info!(member_id = %created.id, actor, "Member created");
        self.audit
            .log(
                AuditAction::MemberCreated,
                EntityType::Member,
                created.id,
                actor,
                None,
                Some(&created),
            )
            .await;
        Ok(created.into())
    }

    pub async fn get_member(&self, id: Uuid) -> AppResult<MemberView> {
        Ok(self.load(id).await?.into())
    }

    pub async fn search_members(&self, query: &MemberSearch) -> AppResult<PagedResponse<MemberView>> {
        validation::member::validate_search(query)?;
        let (rows, total) = member::search(&self.pool, query).await?;
        Ok(PagedResponse::new(rows, total, query.page()).map(MemberView::from))
    }

    /// Full replace of the editable fields. Keeping the current email is
    /// allowed, taking another live member's email is a conflict.
    pub async fn update_member(
        &self,
        id: Uuid,
        dto: &MemberUpdate,
        actor: &str,
    ) -> AppResult<MemberView> {
        let existing = self.load(id).await?;
        let dto = trimmed(dto);
        validation::member::validate_member(&dto, shared::util::today())?;
        self.ensure_employer(dto.employer_id).await?;

        if dto.email != existing.email
            && member::exists_by_email(&self.pool, &dto.email, Some(id)).await?
        {
            return Err(email_taken(&dto.email));
        }

        let mut changed = existing.clone();
        changed.first_name = dto.first_name;
        changed.last_name = dto.last_name;
        changed.email = dto.email;
        changed.phone_number = dto.phone_number;
        changed.date_of_birth = dto.date_of_birth;
        changed.gender = dto.gender;
        changed.employer_id = dto.employer_id;

        let updated = member::update(&self.pool, &changed, actor)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => member_not_found(id),
                other => map_duplicate(other, &changed.email),
            })?;

        tracing::info!(member_id = %id, actor, "Member updated");
        self.audit
            .log(
                AuditAction::MemberUpdated,
                EntityType::Member,
                id,
                actor,
                Some(&existing),
                Some(&updated),
            )
            .await;
        Ok(updated.into())
    }

    pub async fn update_member_status(
        &self,
        id: Uuid,
        status: MemberStatus,
        actor: &str,
    ) -> AppResult<MemberView> {
        let existing = self.load(id).await?;
        if existing.status == status {
            return Ok(existing.into());
        }

        let mut changed = existing.clone();
        changed.status = status;
        let updated = member::update(&self.pool, &changed, actor)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => member_not_found(id),
                other => other.into(),
            })?;

        tracing::info!(
            member_id = %id,
            from = ?existing.status,
            to = ?status,
            actor,
            "Member status changed"
        );
        self.audit
            .log(
                AuditAction::MemberStatusChanged,
                EntityType::Member,
                id,
                actor,
                Some(&existing),
                Some(&updated),
            )
            .await;
        Ok(updated.into())
    }

    pub async fn soft_delete_member(&self, id: Uuid, actor: &str) -> AppResult<()> {
        let existing = self.load(id).await?;
        if !member::soft_delete(&self.pool, id, actor).await? {
            return Err(member_not_found(id));
        }

        tracing::info!(member_id = %id, actor, "Member deleted");
        self.audit
            .log(
                AuditAction::MemberDeleted,
                EntityType::Member,
                id,
                actor,
                Some(&existing),
                None,
            )
            .await;
        Ok(())
    }
}
