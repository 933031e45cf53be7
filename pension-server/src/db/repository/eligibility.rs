//! Benefit Eligibility Repository
//!
//! One snapshot row per member, replaced on every refresh.

use super::{RepoError, RepoResult};
use crate::db::{from_minor_units, to_minor_units};
use chrono::NaiveDate;
use shared::models::BenefitEligibility;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct EligibilityRow {
    id: Uuid,
    member_id: Uuid,
    is_eligible: bool,
    eligibility_date: Option<NaiveDate>,
    months_contributed: i64,
    total_contributions_cents: i64,
    notes: Option<String>,
    created_at: i64,
    updated_at: i64,
    created_by: String,
    updated_by: Option<String>,
}

impl From<EligibilityRow> for BenefitEligibility {
    fn from(r: EligibilityRow) -> Self {
        Self {
            id: r.id,
            member_id: r.member_id,
            is_eligible: r.is_eligible,
            eligibility_date: r.eligibility_date,
            months_contributed: r.months_contributed,
            total_contributions: from_minor_units(r.total_contributions_cents),
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
            created_by: r.created_by,
            updated_by: r.updated_by,
        }
    }
}

pub async fn find_by_member(
    pool: &SqlitePool,
    member_id: Uuid,
) -> RepoResult<Option<BenefitEligibility>> {
    let row = sqlx::query_as::<_, EligibilityRow>(
        "SELECT id, member_id, is_eligible, eligibility_date, months_contributed, total_contributions_cents, notes, created_at, updated_at, created_by, updated_by FROM benefit_eligibility WHERE member_id = ?",
    )
    .bind(member_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Into::into))
}

/// Insert or replace the member's snapshot. A new row gets a fresh id; an
/// existing row keeps its `id` and `created_*`.
pub async fn upsert(
    pool: &SqlitePool,
    snapshot: &BenefitEligibility,
    actor: &str,
) -> RepoResult<BenefitEligibility> {
    let now = shared::util::now_millis();
    let total = to_minor_units(snapshot.total_contributions).ok_or_else(|| {
        RepoError::Database(format!(
            "Total {} is out of range",
            snapshot.total_contributions
        ))
    })?;
    sqlx::query(
        "INSERT INTO benefit_eligibility (id, member_id, is_eligible, eligibility_date, months_contributed, total_contributions_cents, notes, created_at, updated_at, created_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8, ?9) \
         ON CONFLICT(member_id) DO UPDATE SET is_eligible = excluded.is_eligible, eligibility_date = excluded.eligibility_date, months_contributed = excluded.months_contributed, total_contributions_cents = excluded.total_contributions_cents, notes = excluded.notes, updated_at = excluded.updated_at, updated_by = excluded.created_by",
    )
    .bind(Uuid::new_v4())
    .bind(snapshot.member_id)
    .bind(snapshot.is_eligible)
    .bind(snapshot.eligibility_date)
    .bind(snapshot.months_contributed)
    .bind(total)
    .bind(&snapshot.notes)
    .bind(now)
    .bind(actor)
    .execute(pool)
    .await?;
    find_by_member(pool, snapshot.member_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to store eligibility".into()))
}
