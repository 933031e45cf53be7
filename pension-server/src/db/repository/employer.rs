//! Employer Repository

use super::{RepoError, RepoResult};
use crate::db::paging::{PagedQuery, SqlFilter, fetch_page, like_pattern};
use shared::models::{Employer, EmployerCreate, EmployerSearch};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

const COLUMNS: &str = "SELECT id, company_name, rc_number, address, contact_email, contact_phone, is_active, is_deleted, created_at, updated_at, deleted_at, created_by, updated_by, deleted_by";

const SEARCH: PagedQuery<'static> = PagedQuery {
    select: COLUMNS,
    from: "FROM employer WHERE is_deleted = 0",
    order_by: "company_name COLLATE NOCASE, id",
};

struct EmployerFilter {
    company_name: Option<String>,
    is_active: Option<bool>,
}

impl SqlFilter for EmployerFilter {
    fn apply(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(name) = &self.company_name {
            qb.push(" AND lower(company_name) LIKE ")
                .push_bind(like_pattern(&name.to_lowercase()))
                .push(" ESCAPE '\\'");
        }
        if let Some(active) = self.is_active {
            qb.push(" AND is_active = ").push_bind(active);
        }
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> RepoResult<Option<Employer>> {
    let sql = format!("{COLUMNS} FROM employer WHERE id = ? AND is_deleted = 0");
    let row = sqlx::query_as::<_, Employer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Includes soft-deleted rows (audit / recovery)
pub async fn find_by_id_with_deleted(pool: &SqlitePool, id: Uuid) -> RepoResult<Option<Employer>> {
    let sql = format!("{COLUMNS} FROM employer WHERE id = ?");
    let row = sqlx::query_as::<_, Employer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// RC numbers stay reserved after soft delete, so deleted rows count here.
pub async fn exists_by_rc_number(pool: &SqlitePool, rc_number: &str) -> RepoResult<bool> {
    let exists: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM employer WHERE rc_number = ?)")
            .bind(rc_number)
            .fetch_one(pool)
            .await?;
    Ok(exists != 0)
}

pub async fn search(pool: &SqlitePool, query: &EmployerSearch) -> RepoResult<(Vec<Employer>, i64)> {
    let filter = EmployerFilter {
        company_name: query
            .company_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from),
        is_active: query.is_active,
    };
    fetch_page(pool, &SEARCH, &filter, query.page()).await
}

pub async fn create(pool: &SqlitePool, data: &EmployerCreate, actor: &str) -> RepoResult<Employer> {
    let now = shared::util::now_millis();
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO employer (id, company_name, rc_number, address, contact_email, contact_phone, is_active, is_deleted, created_at, updated_at, created_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, 0, ?7, ?7, ?8)",
    )
    .bind(id)
    .bind(data.company_name.trim())
    .bind(data.rc_number.trim())
    .bind(&data.address)
    .bind(&data.contact_email)
    .bind(&data.contact_phone)
    .bind(now)
    .bind(actor)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employer".into()))
}

/// Persist the full editable state; `rc_number` and `created_*` are fixed.
pub async fn update(pool: &SqlitePool, employer: &Employer, actor: &str) -> RepoResult<Employer> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE employer SET company_name = ?1, address = ?2, contact_email = ?3, contact_phone = ?4, is_active = ?5, updated_at = ?6, updated_by = ?7 WHERE id = ?8 AND is_deleted = 0",
    )
    .bind(&employer.company_name)
    .bind(&employer.address)
    .bind(&employer.contact_email)
    .bind(&employer.contact_phone)
    .bind(employer.is_active)
    .bind(now)
    .bind(actor)
    .bind(employer.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employer {} not found", employer.id)));
    }
    find_by_id(pool, employer.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employer {} not found", employer.id)))
}

/// `false` when the employer is absent or already deleted
pub async fn soft_delete(pool: &SqlitePool, id: Uuid, actor: &str) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE employer SET is_deleted = 1, is_active = 0, deleted_at = ?1, deleted_by = ?2, updated_at = ?1, updated_by = ?2 WHERE id = ?3 AND is_deleted = 0",
    )
    .bind(now)
    .bind(actor)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
