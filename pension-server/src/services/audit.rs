//! Audit trail service
//!
//! Entries are written after the mutation they describe has been stored.
//! A failed audit write is logged and never fails the operation.

use serde::Serialize;
use shared::error::AppResult;
use shared::models::{AuditAction, EntityType, TransactionLog};
use sqlx::SqlitePool;
use uuid::Uuid;

use super::contribution::contribution_not_found;
use super::employer::employer_not_found;
use super::member::member_not_found;
use crate::db::repository::transaction_log::{self, NewLogEntry};
use crate::db::repository::{contribution, employer, member};

#[derive(Clone)]
pub struct AuditService {
    pool: SqlitePool,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService").finish_non_exhaustive()
    }
}

impl AuditService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one change with optional before/after snapshots
    pub async fn log<T: Serialize>(
        &self,
        action: AuditAction,
        entity_type: EntityType,
        entity_id: Uuid,
        actor: &str,
        old: Option<&T>,
        new: Option<&T>,
    ) {
        let entry = NewLogEntry {
            action,
            entity_type,
            entity_id,
            user_id: actor.to_string(),
            details: None,
            old_values: old.and_then(snapshot),
            new_values: new.and_then(snapshot),
        };
        self.record(entry).await;
    }

    pub async fn record(&self, entry: NewLogEntry) {
        if let Err(e) = transaction_log::insert(&self.pool, &entry).await {
            tracing::warn!(
                action = %entry.action,
                entity_id = %entry.entity_id,
                error = %e,
                "Failed to write audit entry"
            );
        }
    }

    /// History of one entity, oldest first. Soft-deleted entities keep
    /// their history; an id that never existed is NotFound.
    pub async fn list_entity_history(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> AppResult<Vec<TransactionLog>> {
        self.ensure_entity(entity_type, entity_id).await?;
        Ok(transaction_log::list_for_entity(&self.pool, entity_type, entity_id).await?)
    }

    // Eligibility entries are keyed by member id
    async fn ensure_entity(&self, entity_type: EntityType, id: Uuid) -> AppResult<()> {
        match entity_type {
            EntityType::Member | EntityType::Eligibility => {
                if member::find_by_id_with_deleted(&self.pool, id).await?.is_none() {
                    return Err(member_not_found(id));
                }
            }
            EntityType::Contribution => {
                if contribution::find_by_id_with_deleted(&self.pool, id).await?.is_none() {
                    return Err(contribution_not_found(id));
                }
            }
            EntityType::Employer => {
                if employer::find_by_id_with_deleted(&self.pool, id).await?.is_none() {
                    return Err(employer_not_found(id));
                }
            }
        }
        Ok(())
    }
}

fn snapshot<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize audit snapshot");
            None
        }
    }
}
