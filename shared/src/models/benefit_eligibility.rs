//! Benefit Eligibility Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Latest eligibility snapshot for a member, derived from contributions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitEligibility {
    pub id: Uuid,
    pub member_id: Uuid,
    pub is_eligible: bool,
    /// Date the member was found eligible, `None` while not eligible
    pub eligibility_date: Option<NaiveDate>,
    pub months_contributed: i64,
    pub total_contributions: Decimal,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub created_by: String,
    pub updated_by: Option<String>,
}
