//! Transaction Log Model
//!
//! Append-only audit trail written after every successful mutation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit action recorded in the transaction log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    MemberCreated,
    MemberUpdated,
    MemberStatusChanged,
    MemberDeleted,
    ContributionCreated,
    ContributionUpdated,
    ContributionValidated,
    ContributionDeleted,
    EmployerCreated,
    EmployerUpdated,
    EmployerDeleted,
    EligibilityRefreshed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MemberCreated => "MEMBER_CREATED",
            Self::MemberUpdated => "MEMBER_UPDATED",
            Self::MemberStatusChanged => "MEMBER_STATUS_CHANGED",
            Self::MemberDeleted => "MEMBER_DELETED",
            Self::ContributionCreated => "CONTRIBUTION_CREATED",
            Self::ContributionUpdated => "CONTRIBUTION_UPDATED",
            Self::ContributionValidated => "CONTRIBUTION_VALIDATED",
            Self::ContributionDeleted => "CONTRIBUTION_DELETED",
            Self::EmployerCreated => "EMPLOYER_CREATED",
            Self::EmployerUpdated => "EMPLOYER_UPDATED",
            Self::EmployerDeleted => "EMPLOYER_DELETED",
            Self::EligibilityRefreshed => "ELIGIBILITY_REFRESHED",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity an audit entry refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Member,
    Contribution,
    Employer,
    Eligibility,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Contribution => "contribution",
            Self::Employer => "employer",
            Self::Eligibility => "eligibility",
        }
    }
}

/// Stored log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct TransactionLog {
    pub id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub timestamp: i64,
    pub user_id: String,
    pub details: Option<String>,
    /// JSON snapshot before the change
    pub old_values: Option<String>,
    /// JSON snapshot after the change
    pub new_values: Option<String>,
}
