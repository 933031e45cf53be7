//! Transaction Log Repository (append-only)

use super::RepoResult;
use shared::models::{AuditAction, EntityType, TransactionLog};
use sqlx::SqlitePool;
use uuid::Uuid;

/// New entry before it is stored
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    pub action: AuditAction,
    pub entity_type: EntityType,
    pub entity_id: Uuid,
    pub user_id: String,
    pub details: Option<String>,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
}

pub async fn insert(pool: &SqlitePool, entry: &NewLogEntry) -> RepoResult<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO transaction_log (id, action, entity_type, entity_id, timestamp, user_id, details, old_values, new_values) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(entry.action.as_str())
    .bind(entry.entity_type.as_str())
    .bind(entry.entity_id)
    .bind(shared::util::now_millis())
    .bind(&entry.user_id)
    .bind(&entry.details)
    .bind(&entry.old_values)
    .bind(&entry.new_values)
    .execute(pool)
    .await?;
    Ok(id)
}

/// History of one entity, oldest first
pub async fn list_for_entity(
    pool: &SqlitePool,
    entity_type: EntityType,
    entity_id: Uuid,
) -> RepoResult<Vec<TransactionLog>> {
    let rows = sqlx::query_as::<_, TransactionLog>(
        "SELECT id, action, entity_type, entity_id, timestamp, user_id, details, old_values, new_values FROM transaction_log WHERE entity_type = ? AND entity_id = ? ORDER BY timestamp ASC, rowid ASC",
    )
    .bind(entity_type.as_str())
    .bind(entity_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
