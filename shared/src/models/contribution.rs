//! Contribution Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contribution kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ContributionType {
    /// At most one per member per calendar month
    Monthly,
    Voluntary,
}

/// Contribution entity
///
/// `amount` is exact to two decimal places. The store keeps it as integer
/// minor units, so this type carries no row derive of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: Uuid,
    pub member_id: Uuid,
    pub employer_id: Option<Uuid>,
    pub amount: Decimal,
    pub contribution_type: ContributionType,
    pub contribution_date: NaiveDate,
    pub is_validated: bool,
    pub validation_notes: Option<String>,
    /// Epoch millis of the latest validation, kept when un-validated
    pub validation_date: Option<i64>,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
}

impl Contribution {
    pub fn is_monthly(&self) -> bool {
        self.contribution_type == ContributionType::Monthly
    }

    /// Mark validated, re-stamping the validation time and replacing notes
    pub fn validate(&mut self, notes: Option<String>, now: i64) {
        self.is_validated = true;
        self.validation_date = Some(now);
        self.validation_notes = notes;
    }
}

/// Create contribution payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCreate {
    pub member_id: Uuid,
    #[serde(default)]
    pub employer_id: Option<Uuid>,
    pub amount: Decimal,
    pub contribution_type: ContributionType,
    pub contribution_date: NaiveDate,
    #[serde(default)]
    pub validation_notes: Option<String>,
}

/// Partial update payload, absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionUpdate {
    pub employer_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub contribution_type: Option<ContributionType>,
    pub contribution_date: Option<NaiveDate>,
    pub is_validated: Option<bool>,
    pub validation_notes: Option<String>,
}

/// Validate action payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributionValidate {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Contribution search query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSearch {
    pub member_id: Option<Uuid>,
    pub employer_id: Option<Uuid>,
    pub contribution_type: Option<ContributionType>,
    pub is_validated: Option<bool>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    #[serde(default = "crate::pagination::default_page_number")]
    pub page_number: i64,
    #[serde(default = "crate::pagination::default_page_size")]
    pub page_size: i64,
}

impl Default for ContributionSearch {
    fn default() -> Self {
        Self {
            member_id: None,
            employer_id: None,
            contribution_type: None,
            is_validated: None,
            from_date: None,
            to_date: None,
            min_amount: None,
            max_amount: None,
            page_number: crate::pagination::default_page_number(),
            page_size: crate::pagination::default_page_size(),
        }
    }
}

impl ContributionSearch {
    pub fn page(&self) -> crate::pagination::PageRequest {
        crate::pagination::PageRequest::new(self.page_number, self.page_size)
    }
}

/// Contribution with member/employer display names (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionView {
    pub contribution_id: Uuid,
    pub member_id: Uuid,
    pub member_name: String,
    pub employer_id: Option<Uuid>,
    pub employer_name: Option<String>,
    pub amount: Decimal,
    pub contribution_type: ContributionType,
    pub contribution_date: NaiveDate,
    pub is_validated: bool,
    pub validation_notes: Option<String>,
    pub validation_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub created_by: String,
    pub updated_by: Option<String>,
}

impl ContributionView {
    pub fn new(c: Contribution, member_name: String, employer_name: Option<String>) -> Self {
        Self {
            contribution_id: c.id,
            member_id: c.member_id,
            member_name,
            employer_id: c.employer_id,
            employer_name,
            amount: c.amount,
            contribution_type: c.contribution_type,
            contribution_date: c.contribution_date,
            is_validated: c.is_validated,
            validation_notes: c.validation_notes,
            validation_date: c.validation_date,
            created_at: c.created_at,
            updated_at: c.updated_at,
            created_by: c.created_by,
            updated_by: c.updated_by,
        }
    }
}

/// Per-member contribution totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSummary {
    pub member_id: Uuid,
    pub member_name: String,
    pub total_contributions: Decimal,
    pub total_validated_contributions: Decimal,
    pub total_contribution_count: i64,
    pub validated_contribution_count: i64,
    pub monthly_contributions: i64,
    pub voluntary_contributions: i64,
    pub first_contribution_date: Option<NaiveDate>,
    pub last_contribution_date: Option<NaiveDate>,
    pub months_contributed: i64,
    pub is_eligible_for_benefits: bool,
}

/// Validated contributions needed before a member qualifies for benefits
pub const MIN_VALIDATED_FOR_ELIGIBILITY: i64 = 6;

impl ContributionSummary {
    /// Fold a member's non-deleted contributions into a summary
    pub fn from_contributions(
        member_id: Uuid,
        member_name: String,
        contributions: &[Contribution],
    ) -> Self {
        let mut summary = Self {
            member_id,
            member_name,
            total_contributions: Decimal::ZERO,
            total_validated_contributions: Decimal::ZERO,
            total_contribution_count: 0,
            validated_contribution_count: 0,
            monthly_contributions: 0,
            voluntary_contributions: 0,
            first_contribution_date: None,
            last_contribution_date: None,
            months_contributed: 0,
            is_eligible_for_benefits: false,
        };

        for c in contributions {
            summary.total_contributions += c.amount;
            summary.total_contribution_count += 1;
            if c.is_validated {
                summary.total_validated_contributions += c.amount;
                summary.validated_contribution_count += 1;
            }
            match c.contribution_type {
                ContributionType::Monthly => summary.monthly_contributions += 1,
                ContributionType::Voluntary => summary.voluntary_contributions += 1,
            }
            let date = c.contribution_date;
            summary.first_contribution_date =
                Some(summary.first_contribution_date.map_or(date, |d| d.min(date)));
            summary.last_contribution_date =
                Some(summary.last_contribution_date.map_or(date, |d| d.max(date)));
        }

        summary.months_contributed = summary.validated_contribution_count;
        summary.is_eligible_for_benefits =
            summary.validated_contribution_count >= MIN_VALIDATED_FOR_ELIGIBILITY;
        summary
    }
}

/// Answer for the monthly-contribution pre-check
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAvailability {
    pub can_contribute: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn contribution(amount: &str, kind: ContributionType, date: &str, validated: bool) -> Contribution {
        Contribution {
            id: Uuid::new_v4(),
            member_id: Uuid::nil(),
            employer_id: None,
            amount: Decimal::from_str(amount).unwrap(),
            contribution_type: kind,
            contribution_date: NaiveDate::from_str(date).unwrap(),
            is_validated: validated,
            validation_notes: None,
            validation_date: None,
            is_deleted: false,
            created_at: 0,
            updated_at: 0,
            deleted_at: None,
            created_by: "test".into(),
            updated_by: None,
            deleted_by: None,
        }
    }

    #[test]
    fn test_validate_replaces_notes_and_stamps() {
        let mut c = contribution("10", ContributionType::Monthly, "2025-01-01", false);
        c.validate(Some("checked".into()), 100);
        assert!(c.is_validated);
        assert_eq!(c.validation_date, Some(100));
        assert_eq!(c.validation_notes.as_deref(), Some("checked"));

        c.validate(None, 200);
        assert_eq!(c.validation_date, Some(200));
        assert!(c.validation_notes.is_none());
    }

    #[test]
    fn test_summary_empty() {
        let s = ContributionSummary::from_contributions(Uuid::nil(), "A B".into(), &[]);
        assert_eq!(s.total_contributions, Decimal::ZERO);
        assert_eq!(s.total_contribution_count, 0);
        assert!(s.first_contribution_date.is_none());
        assert!(!s.is_eligible_for_benefits);
    }

    #[test]
    fn test_summary_totals_and_eligibility() {
        let mut items: Vec<Contribution> = (1..=6)
            .map(|m| {
                contribution(
                    "100.50",
                    ContributionType::Monthly,
                    &format!("2025-{:02}-05", m),
                    true,
                )
            })
            .collect();
        items.push(contribution("20", ContributionType::Voluntary, "2024-12-20", false));

        let s = ContributionSummary::from_contributions(Uuid::nil(), "A B".into(), &items);
        assert_eq!(s.total_contributions, Decimal::from_str("623.00").unwrap());
        assert_eq!(
            s.total_validated_contributions,
            Decimal::from_str("603.00").unwrap()
        );
        assert_eq!(s.total_contribution_count, 7);
        assert_eq!(s.validated_contribution_count, 6);
        assert_eq!(s.monthly_contributions, 6);
        assert_eq!(s.voluntary_contributions, 1);
        assert_eq!(s.months_contributed, 6);
        assert_eq!(
            s.first_contribution_date,
            Some(NaiveDate::from_str("2024-12-20").unwrap())
        );
        assert_eq!(
            s.last_contribution_date,
            Some(NaiveDate::from_str("2025-06-05").unwrap())
        );
        assert!(s.is_eligible_for_benefits);
    }

    #[test]
    fn test_amount_accepts_string_and_number() {
        let json = r#"{"memberId":"00000000-0000-0000-0000-000000000000","amount":"0.01","contributionType":"Monthly","contributionDate":"2025-03-10"}"#;
        let dto: ContributionCreate = serde_json::from_str(json).unwrap();
        assert_eq!(dto.amount, Decimal::from_str("0.01").unwrap());
        assert!(dto.employer_id.is_none());

        let json = r#"{"memberId":"00000000-0000-0000-0000-000000000000","amount":250,"contributionType":"Voluntary","contributionDate":"2025-03-10"}"#;
        let dto: ContributionCreate = serde_json::from_str(json).unwrap();
        assert_eq!(dto.amount, Decimal::from(250));
        assert_eq!(dto.contribution_type, ContributionType::Voluntary);
    }
}
