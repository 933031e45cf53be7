//! Benefit eligibility snapshots
//!
//! A member qualifies once they have at least
//! [`MIN_VALIDATED_FOR_ELIGIBILITY`] validated contributions. The snapshot
//! is recomputed on demand from the contribution summary.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AuditAction, BenefitEligibility, ContributionSummary, EntityType,
    MIN_VALIDATED_FOR_ELIGIBILITY,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::member::member_not_found;
use super::{AuditService, ContributionService};
use crate::db::repository::{eligibility, member};

#[derive(Debug, Clone)]
pub struct EligibilityService {
    pool: SqlitePool,
    contributions: ContributionService,
    audit: AuditService,
}

fn eligibility_not_found(member_id: Uuid) -> AppError {
    AppError::with_message(
        ErrorCode::EligibilityNotFound,
        format!("No eligibility record for member {member_id}"),
    )
}

impl EligibilityService {
    pub fn new(pool: SqlitePool, contributions: ContributionService, audit: AuditService) -> Self {
        Self {
            pool,
            contributions,
            audit,
        }
    }

    pub async fn get_eligibility(&self, member_id: Uuid) -> AppResult<BenefitEligibility> {
        if member::find_by_id(&self.pool, member_id).await?.is_none() {
            return Err(member_not_found(member_id));
        }
        eligibility::find_by_member(&self.pool, member_id)
            .await?
            .ok_or_else(|| eligibility_not_found(member_id))
    }

    pub async fn refresh_eligibility(
        &self,
        member_id: Uuid,
        actor: &str,
    ) -> AppResult<BenefitEligibility> {
        let summary = self
            .contributions
            .get_member_contribution_summary(member_id)
            .await?;
        let previous = eligibility::find_by_member(&self.pool, member_id).await?;
        let snapshot = snapshot_from(&summary, previous.as_ref(), shared::util::today());

        let stored = eligibility::upsert(&self.pool, &snapshot, actor).await?;

        tracing::info!(
            member_id = %member_id,
            eligible = stored.is_eligible,
            months = stored.months_contributed,
            actor,
            "Eligibility refreshed"
        );
        self.audit
            .log(
                AuditAction::EligibilityRefreshed,
                EntityType::Eligibility,
                member_id,
                actor,
                previous.as_ref(),
                Some(&stored),
            )
            .await;
        Ok(stored)
    }
}

/// Build the next snapshot. The eligibility date is the first day the
/// member was seen eligible and is kept while they stay eligible.
fn snapshot_from(
    summary: &ContributionSummary,
    previous: Option<&BenefitEligibility>,
    today: chrono::NaiveDate,
) -> BenefitEligibility {
    let is_eligible = summary.is_eligible_for_benefits;
    let eligibility_date = match previous {
        _ if !is_eligible => None,
        Some(p) if p.is_eligible => p.eligibility_date.or(Some(today)),
        _ => Some(today),
    };
    let notes = if is_eligible {
        format!(
            "Eligible with {} validated contributions",
            summary.validated_contribution_count
        )
    } else {
        format!(
            "{} of {} validated contributions required",
            summary.validated_contribution_count, MIN_VALIDATED_FOR_ELIGIBILITY
        )
    };
    let now = shared::util::now_millis();

    BenefitEligibility {
        id: previous.map_or_else(Uuid::new_v4, |p| p.id),
        member_id: summary.member_id,
        is_eligible,
        eligibility_date,
        months_contributed: summary.months_contributed,
        total_contributions: summary.total_validated_contributions,
        notes: Some(notes),
        created_at: previous.map_or(now, |p| p.created_at),
        updated_at: now,
        created_by: previous.map_or_else(String::new, |p| p.created_by.clone()),
        updated_by: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn summary(validated: i64) -> ContributionSummary {
        ContributionSummary {
            member_id: Uuid::nil(),
            member_name: "Ada Obi".into(),
            total_contributions: Decimal::from(validated * 100),
            total_validated_contributions: Decimal::from(validated * 100),
            total_contribution_count: validated,
            validated_contribution_count: validated,
            monthly_contributions: validated,
            voluntary_contributions: 0,
            first_contribution_date: None,
            last_contribution_date: None,
            months_contributed: validated,
            is_eligible_for_benefits: validated >= MIN_VALIDATED_FOR_ELIGIBILITY,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_not_eligible_has_no_date() {
        let s = snapshot_from(&summary(5), None, day(1));
        assert!(!s.is_eligible);
        assert_eq!(s.eligibility_date, None);
        assert_eq!(s.notes.as_deref(), Some("5 of 6 validated contributions required"));
    }

    #[test]
    fn test_eligibility_date_is_kept_while_eligible() {
        let first = snapshot_from(&summary(6), None, day(1));
        assert_eq!(first.eligibility_date, Some(day(1)));

        let second = snapshot_from(&summary(7), Some(&first), day(20));
        assert_eq!(second.eligibility_date, Some(day(1)));
        assert_eq!(second.id, first.id);
        assert_eq!(second.total_contributions, Decimal::from(700));
    }

    #[test]
    fn test_losing_eligibility_clears_date() {
        let first = snapshot_from(&summary(6), None, day(1));
        let after = snapshot_from(&summary(4), Some(&first), day(2));
        assert!(!after.is_eligible);
        assert_eq!(after.eligibility_date, None);
    }
}
