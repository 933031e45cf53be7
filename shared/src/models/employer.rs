//! Employer Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employer entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Employer {
    pub id: Uuid,
    pub company_name: String,
    /// Company registration number, unique across all rows
    pub rc_number: String,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
}

/// Create employer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerCreate {
    pub company_name: String,
    pub rc_number: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

/// Update employer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerUpdate {
    pub company_name: Option<String>,
    pub address: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: Option<bool>,
}

/// Employer search query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerSearch {
    pub company_name: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default = "crate::pagination::default_page_number")]
    pub page_number: i64,
    #[serde(default = "crate::pagination::default_page_size")]
    pub page_size: i64,
}

impl Default for EmployerSearch {
    fn default() -> Self {
        Self {
            company_name: None,
            is_active: None,
            page_number: crate::pagination::default_page_number(),
            page_size: crate::pagination::default_page_size(),
        }
    }
}

impl EmployerSearch {
    pub fn page(&self) -> crate::pagination::PageRequest {
        crate::pagination::PageRequest::new(self.page_number, self.page_size)
    }
}
