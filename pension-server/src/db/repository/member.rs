//! Member Repository

use super::{RepoError, RepoResult};
use crate::db::paging::{PagedQuery, SqlFilter, fetch_page, like_pattern};
use shared::models::{Member, MemberCreate, MemberSearch, MemberStatus};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

const MEMBER_SELECT: &str = "SELECT id, first_name, last_name, email, phone_number, date_of_birth, gender, status, employer_id, is_deleted, created_at, updated_at, deleted_at, created_by, updated_by, deleted_by FROM member";

const SEARCH: PagedQuery<'static> = PagedQuery {
    select: "SELECT id, first_name, last_name, email, phone_number, date_of_birth, gender, status, employer_id, is_deleted, created_at, updated_at, deleted_at, created_by, updated_by, deleted_by",
    from: "FROM member WHERE is_deleted = 0",
    order_by: "created_at DESC, id",
};

struct MemberFilter {
    name: Option<String>,
    status: Option<MemberStatus>,
}

impl SqlFilter for MemberFilter {
    fn apply(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        if let Some(name) = &self.name {
            let pattern = like_pattern(&name.to_lowercase());
            qb.push(" AND (lower(first_name) LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR lower(last_name) LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR lower(first_name || ' ' || last_name) LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        if let Some(status) = self.status {
            qb.push(" AND status = ").push_bind(status);
        }
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ? AND is_deleted = 0");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Includes soft-deleted rows (audit / recovery)
pub async fn find_by_id_with_deleted(pool: &SqlitePool, id: Uuid) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Whether a live member other than `exclude_id` already uses `email`
pub async fn exists_by_email(
    pool: &SqlitePool,
    email: &str,
    exclude_id: Option<Uuid>,
) -> RepoResult<bool> {
    let exists: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM member WHERE email = ?1 AND is_deleted = 0 AND (?2 IS NULL OR id != ?2))",
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(exists != 0)
}

pub async fn search(pool: &SqlitePool, query: &MemberSearch) -> RepoResult<(Vec<Member>, i64)> {
    let filter = MemberFilter {
        name: query
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from),
        status: query.status,
    };
    fetch_page(pool, &SEARCH, &filter, query.page()).await
}

pub async fn create(pool: &SqlitePool, data: &MemberCreate, actor: &str) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO member (id, first_name, last_name, email, phone_number, date_of_birth, gender, status, employer_id, is_deleted, created_at, updated_at, created_by) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?10, ?11)",
    )
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email)
    .bind(&data.phone_number)
    .bind(data.date_of_birth)
    .bind(&data.gender)
    .bind(MemberStatus::Active)
    .bind(data.employer_id)
    .bind(now)
    .bind(actor)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create member".into()))
}

/// Persist the full editable state; `created_*` is never touched.
pub async fn update(pool: &SqlitePool, member: &Member, actor: &str) -> RepoResult<Member> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member SET first_name = ?1, last_name = ?2, email = ?3, phone_number = ?4, date_of_birth = ?5, gender = ?6, status = ?7, employer_id = ?8, updated_at = ?9, updated_by = ?10 WHERE id = ?11 AND is_deleted = 0",
    )
    .bind(&member.first_name)
    .bind(&member.last_name)
    .bind(&member.email)
    .bind(&member.phone_number)
    .bind(member.date_of_birth)
    .bind(&member.gender)
    .bind(member.status)
    .bind(member.employer_id)
    .bind(now)
    .bind(actor)
    .bind(member.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {} not found", member.id)));
    }
    find_by_id(pool, member.id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {} not found", member.id)))
}

/// `false` when the member is absent or already deleted
pub async fn soft_delete(pool: &SqlitePool, id: Uuid, actor: &str) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE member SET is_deleted = 1, deleted_at = ?1, deleted_by = ?2, updated_at = ?1, updated_by = ?2 WHERE id = ?3 AND is_deleted = 0",
    )
    .bind(now)
    .bind(actor)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
