//! Contribution Repository

use super::{RepoError, RepoResult};
use crate::db::paging::{PagedQuery, SqlFilter, fetch_page};
use crate::db::{from_minor_units, to_minor_units};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{
    Contribution, ContributionCreate, ContributionSearch, ContributionType, ContributionView,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

const CONTRIBUTION_SELECT: &str = "SELECT id, member_id, employer_id, amount_cents, contribution_type, contribution_date, is_validated, validation_notes, validation_date, is_deleted, created_at, updated_at, deleted_at, created_by, updated_by, deleted_by FROM contribution";

const VIEW_SELECT: &str = "SELECT c.id, c.member_id, c.employer_id, c.amount_cents, c.contribution_type, c.contribution_date, c.is_validated, c.validation_notes, c.validation_date, c.is_deleted, c.created_at, c.updated_at, c.deleted_at, c.created_by, c.updated_by, c.deleted_by, m.first_name || ' ' || m.last_name AS member_name, e.company_name AS employer_name";

const VIEW_FROM: &str = "FROM contribution c JOIN member m ON m.id = c.member_id LEFT JOIN employer e ON e.id = c.employer_id WHERE c.is_deleted = 0";

const SEARCH: PagedQuery<'static> = PagedQuery {
    select: VIEW_SELECT,
    from: VIEW_FROM,
    order_by: "c.contribution_date DESC, c.created_at DESC, c.id",
};

/// Stored row, amount in cents
#[derive(Debug, sqlx::FromRow)]
struct ContributionRow {
    id: Uuid,
    member_id: Uuid,
    employer_id: Option<Uuid>,
    amount_cents: i64,
    contribution_type: ContributionType,
    contribution_date: NaiveDate,
    is_validated: bool,
    validation_notes: Option<String>,
    validation_date: Option<i64>,
    is_deleted: bool,
    created_at: i64,
    updated_at: i64,
    deleted_at: Option<i64>,
    created_by: String,
    updated_by: Option<String>,
    deleted_by: Option<String>,
}

impl From<ContributionRow> for Contribution {
    fn from(r: ContributionRow) -> Self {
        Self {
            id: r.id,
            member_id: r.member_id,
            employer_id: r.employer_id,
            amount: from_minor_units(r.amount_cents),
            contribution_type: r.contribution_type,
            contribution_date: r.contribution_date,
            is_validated: r.is_validated,
            validation_notes: r.validation_notes,
            validation_date: r.validation_date,
            is_deleted: r.is_deleted,
            created_at: r.created_at,
            updated_at: r.updated_at,
            deleted_at: r.deleted_at,
            created_by: r.created_by,
            updated_by: r.updated_by,
            deleted_by: r.deleted_by,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContributionViewRow {
    #[sqlx(flatten)]
    row: ContributionRow,
    member_name: String,
    employer_name: Option<String>,
}

impl From<ContributionViewRow> for ContributionView {
    fn from(v: ContributionViewRow) -> Self {
        ContributionView::new(v.row.into(), v.member_name, v.employer_name)
    }
}

struct ContributionFilter {
    member_id: Option<Uuid>,
    employer_id: Option<Uuid>,
    contribution_type: Option<ContributionType>,
    is_validated: Option<bool>,
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
    min_cents: Option<i64>,
    max_cents: Option<i64>,
}

impl SqlFilter for ContributionFilter {
    fn apply(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(id) = self.member_id {
            qb.push(" AND c.member_id = ").push_bind(id);
        }
        if let Some(id) = self.employer_id {
            qb.push(" AND c.employer_id = ").push_bind(id);
        }
        if let Some(kind) = self.contribution_type {
            qb.push(" AND c.contribution_type = ").push_bind(kind);
        }
        if let Some(validated) = self.is_validated {
            qb.push(" AND c.is_validated = ").push_bind(validated);
        }
        if let Some(from) = self.from_date {
            qb.push(" AND c.contribution_date >= ").push_bind(from);
        }
        if let Some(to) = self.to_date {
            qb.push(" AND c.contribution_date <= ").push_bind(to);
        }
        if let Some(min) = self.min_cents {
            qb.push(" AND c.amount_cents >= ").push_bind(min);
        }
        if let Some(max) = self.max_cents {
            qb.push(" AND c.amount_cents <= ").push_bind(max);
        }
    }
}

fn cents(amount: Decimal) -> RepoResult<i64> {
    to_minor_units(amount)
        .ok_or_else(|| RepoError::Database(format!("Amount {amount} is out of range")))
}

/// Amount filter bound in cents. Minimums round up and maximums round down
/// so a bound between two cents never admits an amount outside the range;
/// bounds beyond the column saturate.
fn bound_cents(amount: Decimal, strategy: RoundingStrategy) -> i64 {
    amount
        .round_dp_with_strategy(2, strategy)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|c| c.to_i64())
        .unwrap_or(if amount.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
}

pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> RepoResult<Option<Contribution>> {
    let sql = format!("{CONTRIBUTION_SELECT} WHERE id = ? AND is_deleted = 0");
    let row = sqlx::query_as::<_, ContributionRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// Includes soft-deleted rows (audit / recovery)
pub async fn find_by_id_with_deleted(
    pool: &SqlitePool,
    id: Uuid,
) -> RepoResult<Option<Contribution>> {
    let sql = format!("{CONTRIBUTION_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, ContributionRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// Live contribution with member and employer display names
pub async fn find_view_by_id(pool: &SqlitePool, id: Uuid) -> RepoResult<Option<ContributionView>> {
    let sql = format!("{VIEW_SELECT} {VIEW_FROM} AND c.id = ?");
    let row = sqlx::query_as::<_, ContributionViewRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// Live contributions of one member, newest first
pub async fn find_by_member(pool: &SqlitePool, member_id: Uuid) -> RepoResult<Vec<Contribution>> {
    let sql = format!(
        "{CONTRIBUTION_SELECT} WHERE member_id = ? AND is_deleted = 0 ORDER BY contribution_date DESC, created_at DESC, id"
    );
    let rows = sqlx::query_as::<_, ContributionRow>(&sql)
        .bind(member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Same as [`find_by_member`] with display names, for list responses
pub async fn find_views_by_member(
    pool: &SqlitePool,
    member_id: Uuid,
) -> RepoResult<Vec<ContributionView>> {
    let sql = format!(
        "{VIEW_SELECT} {VIEW_FROM} AND c.member_id = ? ORDER BY c.contribution_date DESC, c.created_at DESC, c.id"
    );
    let rows = sqlx::query_as::<_, ContributionViewRow>(&sql)
        .bind(member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Whether the member already has a live monthly contribution in the
/// calendar month of `date` (ignoring `exclude_id`)
pub async fn exists_monthly_contribution(
    pool: &SqlitePool,
    member_id: Uuid,
    date: NaiveDate,
    exclude_id: Option<Uuid>,
) -> RepoResult<bool> {
    let month = date.format("%Y-%m").to_string();
    let exists: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM contribution WHERE member_id = ?1 AND contribution_type = ?2 AND substr(contribution_date, 1, 7) = ?3 AND is_deleted = 0 AND (?4 IS NULL OR id != ?4))",
    )
    .bind(member_id)
    .bind(ContributionType::Monthly)
    .bind(month)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(exists != 0)
}

pub async fn search(
    pool: &SqlitePool,
    query: &ContributionSearch,
) -> RepoResult<(Vec<ContributionView>, i64)> {
    let filter = ContributionFilter {
        member_id: query.member_id,
        employer_id: query.employer_id,
        contribution_type: query.contribution_type,
        is_validated: query.is_validated,
        from_date: query.from_date,
        to_date: query.to_date,
        min_cents: query
            .min_amount
            .map(|v| bound_cents(v, RoundingStrategy::ToPositiveInfinity)),
        max_cents: query
            .max_amount
            .map(|v| bound_cents(v, RoundingStrategy::ToNegativeInfinity)),
    };
    let (rows, total) = fetch_page::<ContributionViewRow, _>(pool, &SEARCH, &filter, query.page()).await?;
    Ok((rows.into_iter().map(Into::into).collect(), total))
}

pub async fn create(
    pool: &SqlitePool,
    data: &ContributionCreate,
    actor: &str,
) -> RepoResult<Contribution> {
    let now = shared::util::now_millis();
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO contribution (id, member_id, employer_id, amount_cents, contribution_type, contribution_date, is_validated, validation_notes, is_deleted, created_at, updated_at, created_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7, 0, ?8, ?8, ?9)",
    )
    .bind(id)
    .bind(data.member_id)
    .bind(data.employer_id)
    .bind(cents(data.amount)?)
    .bind(data.contribution_type)
    .bind(data.contribution_date)
    .bind(&data.validation_notes)
    .bind(now)
    .bind(actor)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create contribution".into()))
}

/// Persist the full mutable state; `created_*` is never touched.
pub async fn update(pool: &SqlitePool, c: &Contribution, actor: &str) -> RepoResult<Contribution> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE contribution SET employer_id = ?1, amount_cents = ?2, contribution_type = ?3, contribution_date = ?4, is_validated = ?5, validation_notes = ?6, validation_date = ?7, updated_at = ?8, updated_by = ?9 WHERE id = ?10 AND is_deleted = 0",
    )
    .bind(c.employer_id)
    .bind(cents(c.amount)?)
    .bind(c.contribution_type)
    .bind(c.contribution_date)
    .bind(c.is_validated)
    .bind(&c.validation_notes)
    .bind(c.validation_date)
    .bind(now)
    .bind(actor)
    .bind(c.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Contribution {} not found", c.id)));
    }
    find_by_id(pool, c.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Contribution {} not found", c.id)))
}

/// `false` when the contribution is absent or already deleted
pub async fn soft_delete(pool: &SqlitePool, id: Uuid, actor: &str) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE contribution SET is_deleted = 1, deleted_at = ?1, deleted_by = ?2, updated_at = ?1, updated_by = ?2 WHERE id = ?3 AND is_deleted = 0",
    )
    .bind(now)
    .bind(actor)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_bounds_round_inward() {
        assert_eq!(bound_cents(dec("10.005"), RoundingStrategy::ToPositiveInfinity), 1001);
        assert_eq!(bound_cents(dec("10.009"), RoundingStrategy::ToNegativeInfinity), 1000);
        assert_eq!(bound_cents(dec("10.00"), RoundingStrategy::ToPositiveInfinity), 1000);
    }

    #[test]
    fn test_bounds_saturate() {
        let huge = dec("100000000000000000000");
        assert_eq!(bound_cents(huge, RoundingStrategy::ToNegativeInfinity), i64::MAX);
        assert_eq!(bound_cents(Decimal::MAX, RoundingStrategy::ToPositiveInfinity), i64::MAX);
    }
}
