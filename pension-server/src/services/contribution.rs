//! Contribution service
//!
//! Create order: member exists, employer exists, field rules, then the
//! monthly check. Nothing is written unless every step passes.

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AuditAction, Contribution, ContributionCreate, ContributionSearch, ContributionSummary,
    ContributionType, ContributionUpdate, ContributionView, EntityType, Member,
};
use shared::pagination::PagedResponse;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::AuditService;
use super::employer::employer_not_found;
use super::member::member_not_found;
use crate::db::repository::{RepoError, contribution, employer, member};
use crate::validation;

#[derive(Debug, Clone)]
pub struct ContributionService {
    pool: SqlitePool,
    audit: AuditService,
}

pub(crate) fn contribution_not_found(id: Uuid) -> AppError {
    AppError::with_message(
        ErrorCode::ContributionNotFound,
        format!("Contribution {id} not found"),
    )
    .with_detail("contributionId", id.to_string())
}

fn monthly_exists(date: NaiveDate) -> AppError {
    AppError::with_message(
        ErrorCode::MonthlyContributionExists,
        format!(
            "A monthly contribution already exists for {}",
            date.format("%Y-%m")
        ),
    )
}

/// Map a unique-index hit from a racing insert onto the monthly conflict
fn map_repo(err: RepoError, id: Option<Uuid>, date: NaiveDate) -> AppError {
    match (err, id) {
        (RepoError::Duplicate(_), _) => monthly_exists(date),
        (RepoError::NotFound(_), Some(id)) => contribution_not_found(id),
        (other, _) => other.into(),
    }
}

impl ContributionService {
    pub fn new(pool: SqlitePool, audit: AuditService) -> Self {
        Self { pool, audit }
    }

    async fn load(&self, id: Uuid) -> AppResult<Contribution> {
        contribution::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| contribution_not_found(id))
    }

    async fn load_view(&self, id: Uuid) -> AppResult<ContributionView> {
        contribution::find_view_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| contribution_not_found(id))
    }

    async fn load_member(&self, id: Uuid) -> AppResult<Member> {
        member::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| member_not_found(id))
    }

    async fn ensure_employer(&self, employer_id: Option<Uuid>) -> AppResult<()> {
        if let Some(id) = employer_id
            && employer::find_by_id(&self.pool, id).await?.is_none()
        {
            return Err(employer_not_found(id));
        }
        Ok(())
    }

    pub async fn get_contribution(&self, id: Uuid) -> AppResult<ContributionView> {
        self.load_view(id).await
    }

    pub async fn search_contributions(
        &self,
        query: &ContributionSearch,
    ) -> AppResult<PagedResponse<ContributionView>> {
        validation::contribution::validate_search(query)?;
        let (rows, total) = contribution::search(&self.pool, query).await?;
        Ok(PagedResponse::new(rows, total, query.page()))
    }

    /// Every live contribution of a member, newest first
    pub async fn get_member_contributions(
        &self,
        member_id: Uuid,
    ) -> AppResult<Vec<ContributionView>> {
        self.load_member(member_id).await?;
        Ok(contribution::find_views_by_member(&self.pool, member_id).await?)
    }

    /// Without an explicit employer the member's current employer is used.
    pub async fn create_contribution(
        &self,
        dto: &ContributionCreate,
        actor: &str,
    ) -> AppResult<ContributionView> {
        let member = self.load_member(dto.member_id).await?;
        self.ensure_employer(dto.employer_id).await?;
        validation::contribution::validate_create(dto, shared::util::today())?;

        if dto.contribution_type == ContributionType::Monthly
            && contribution::exists_monthly_contribution(
                &self.pool,
                dto.member_id,
                dto.contribution_date,
                None,
            )
            .await?
        {
            return Err(monthly_exists(dto.contribution_date));
        }

        let data = ContributionCreate {
            employer_id: dto.employer_id.or(member.employer_id),
            validation_notes: dto
                .validation_notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from),
            ..dto.clone()
        };
        let created = contribution::create(&self.pool, &data, actor)
            .await
            .map_err(|e| map_repo(e, None, dto.contribution_date))?;

        tracing::info!(
            contribution_id = %created.id,
            member_id = %created.member_id,
            amount = %created.amount,
            kind = ?created.contribution_type,
            actor,
            "Contribution created"
        );
        self.audit
            .log(
                AuditAction::ContributionCreated,
                EntityType::Contribution,
                created.id,
                actor,
                None,
                Some(&created),
            )
            .await;
        self.load_view(created.id).await
    }

    /// Partial update. Setting `is_validated` to true stamps the validation
    /// time; setting it to false keeps the previous stamp and notes.
    pub async fn update_contribution(
        &self,
        id: Uuid,
        patch: &ContributionUpdate,
        actor: &str,
    ) -> AppResult<ContributionView> {
        let existing = self.load(id).await?;
        validation::contribution::validate_update(patch, shared::util::today())?;
        self.ensure_employer(patch.employer_id).await?;

        let mut changed = existing.clone();
        if let Some(employer_id) = patch.employer_id {
            changed.employer_id = Some(employer_id);
        }
        if let Some(amount) = patch.amount {
            changed.amount = amount;
        }
        if let Some(kind) = patch.contribution_type {
            changed.contribution_type = kind;
        }
        if let Some(date) = patch.contribution_date {
            changed.contribution_date = date;
        }
        if let Some(notes) = patch.validation_notes.as_deref().map(str::trim)
            && !notes.is_empty()
        {
            changed.validation_notes = Some(notes.to_string());
        }
        match patch.is_validated {
            Some(true) => {
                changed.is_validated = true;
                changed.validation_date = Some(shared::util::now_millis());
            }
            Some(false) => changed.is_validated = false,
            None => {}
        }

        let slot_changed = changed.contribution_type != existing.contribution_type
            || changed.contribution_date != existing.contribution_date;
        if changed.is_monthly()
            && slot_changed
            && contribution::exists_monthly_contribution(
                &self.pool,
                changed.member_id,
                changed.contribution_date,
                Some(id),
            )
            .await?
        {
            return Err(monthly_exists(changed.contribution_date));
        }

        let updated = contribution::update(&self.pool, &changed, actor)
            .await
            .map_err(|e| map_repo(e, Some(id), changed.contribution_date))?;

        tracing::info!(contribution_id = %id, actor, "Contribution updated");
        self.audit
            .log(
                AuditAction::ContributionUpdated,
                EntityType::Contribution,
                id,
                actor,
                Some(&existing),
                Some(&updated),
            )
            .await;
        self.load_view(id).await
    }

    /// Mark validated. Every call re-stamps the validation time and
    /// replaces the notes (`None` clears them).
    pub async fn validate_contribution(
        &self,
        id: Uuid,
        notes: Option<String>,
        actor: &str,
    ) -> AppResult<ContributionView> {
        validation::contribution::validate_notes(notes.as_deref())?;
        let existing = self.load(id).await?;

        let mut changed = existing.clone();
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        changed.validate(notes, shared::util::now_millis());

        let updated = contribution::update(&self.pool, &changed, actor)
            .await
            .map_err(|e| map_repo(e, Some(id), changed.contribution_date))?;

        tracing::info!(contribution_id = %id, actor, "Contribution validated");
        self.audit
            .log(
                AuditAction::ContributionValidated,
                EntityType::Contribution,
                id,
                actor,
                Some(&existing),
                Some(&updated),
            )
            .await;
        self.load_view(id).await
    }

    pub async fn soft_delete_contribution(&self, id: Uuid, actor: &str) -> AppResult<()> {
        let existing = self.load(id).await?;
        if !contribution::soft_delete(&self.pool, id, actor).await? {
            return Err(contribution_not_found(id));
        }

        tracing::info!(contribution_id = %id, actor, "Contribution deleted");
        self.audit
            .log(
                AuditAction::ContributionDeleted,
                EntityType::Contribution,
                id,
                actor,
                Some(&existing),
                None,
            )
            .await;
        Ok(())
    }

    pub async fn get_member_contribution_summary(
        &self,
        member_id: Uuid,
    ) -> AppResult<ContributionSummary> {
        let (member, contributions) = futures::try_join!(
            self.load_member(member_id),
            async {
                contribution::find_by_member(&self.pool, member_id)
                    .await
                    .map_err(AppError::from)
            }
        )?;
        Ok(ContributionSummary::from_contributions(
            member_id,
            member.full_name(),
            &contributions,
        ))
    }

    /// `true` when the member has no monthly contribution in that month yet.
    /// A pure existence check; an unknown member has none.
    pub async fn can_make_monthly_contribution(
        &self,
        member_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<bool> {
        let exists =
            contribution::exists_monthly_contribution(&self.pool, member_id, date, None).await?;
        Ok(!exists)
    }
}
