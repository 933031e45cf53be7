//! Contribution rules

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use shared::error::FieldError;
use shared::models::{ContributionCreate, ContributionSearch, ContributionUpdate};

use super::{MAX_NOTE_LEN, finish, optional_text, page};

/// Upper bound for a single contribution
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// How far back a contribution may be dated
pub const MAX_BACKDATE_MONTHS: u32 = 24;

pub fn validate_create(dto: &ContributionCreate, today: NaiveDate) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    amount(&mut errors, dto.amount);
    contribution_date(&mut errors, dto.contribution_date, today);
    notes(&mut errors, dto.validation_notes.as_deref());
    finish(errors)
}

/// Only fields present in the patch are checked.
pub fn validate_update(dto: &ContributionUpdate, today: NaiveDate) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if let Some(value) = dto.amount {
        amount(&mut errors, value);
    }
    if let Some(date) = dto.contribution_date {
        contribution_date(&mut errors, date, today);
    }
    notes(&mut errors, dto.validation_notes.as_deref());
    finish(errors)
}

pub fn validate_notes(value: Option<&str>) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    notes(&mut errors, value);
    finish(errors)
}

pub fn validate_search(query: &ContributionSearch) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    page(&mut errors, query.page_number, query.page_size);

    if query.min_amount.is_some_and(|v| v < Decimal::ZERO) {
        errors.push(FieldError::new("minAmount", "Minimum amount cannot be negative"));
    }
    if query.max_amount.is_some_and(|v| v < Decimal::ZERO) {
        errors.push(FieldError::new("maxAmount", "Maximum amount cannot be negative"));
    }
    if let (Some(min), Some(max)) = (query.min_amount, query.max_amount)
        && max < min
    {
        errors.push(FieldError::new(
            "maxAmount",
            "Maximum amount must be greater than or equal to minimum amount",
        ));
    }
    if let (Some(from), Some(to)) = (query.from_date, query.to_date)
        && to < from
    {
        errors.push(FieldError::new(
            "toDate",
            "To date must be greater than or equal to from date",
        ));
    }

    finish(errors)
}

fn amount(errors: &mut Vec<FieldError>, value: Decimal) {
    if value <= Decimal::ZERO {
        errors.push(FieldError::new("amount", "Amount must be greater than zero"));
    } else if value > MAX_AMOUNT {
        errors.push(FieldError::new("amount", "Amount cannot exceed 1,000,000"));
    }
    if value.normalize().scale() > 2 {
        errors.push(FieldError::new(
            "amount",
            "Amount cannot have more than 2 decimal places",
        ));
    }
}

fn contribution_date(errors: &mut Vec<FieldError>, date: NaiveDate, today: NaiveDate) {
    if date > today {
        errors.push(FieldError::new(
            "contributionDate",
            "Contribution date cannot be in the future",
        ));
    }
    let earliest = today
        .checked_sub_months(Months::new(MAX_BACKDATE_MONTHS))
        .unwrap_or(NaiveDate::MIN);
    if date <= earliest {
        errors.push(FieldError::new(
            "contributionDate",
            "Contribution date cannot be more than 2 years in the past",
        ));
    }
}

fn notes(errors: &mut Vec<FieldError>, value: Option<&str>) {
    optional_text(errors, value, "validationNotes", "Validation notes", MAX_NOTE_LEN);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use shared::models::ContributionType;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn dto(amount: &str) -> ContributionCreate {
        ContributionCreate {
            member_id: Uuid::new_v4(),
            employer_id: None,
            amount: Decimal::from_str(amount).unwrap(),
            contribution_type: ContributionType::Monthly,
            contribution_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            validation_notes: None,
        }
    }

    #[test]
    fn test_amount_bounds() {
        assert!(validate_create(&dto("0"), today()).is_err());
        assert!(validate_create(&dto("-5"), today()).is_err());
        assert!(validate_create(&dto("0.01"), today()).is_ok());
        assert!(validate_create(&dto("1000000"), today()).is_ok());
        assert!(validate_create(&dto("1000000.00"), today()).is_ok());
        assert!(validate_create(&dto("1000000.01"), today()).is_err());
    }

    #[test]
    fn test_amount_precision() {
        assert!(validate_create(&dto("10.5"), today()).is_ok());
        assert!(validate_create(&dto("10.500"), today()).is_ok());
        let errors = validate_create(&dto("10.555"), today()).unwrap_err();
        assert_eq!(errors[0].message, "Amount cannot have more than 2 decimal places");
    }

    #[test]
    fn test_date_window() {
        let at = |y, m, d| ContributionCreate {
            contribution_date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            ..dto("10")
        };
        assert!(validate_create(&at(2025, 6, 15), today()).is_ok());
        assert!(validate_create(&at(2025, 6, 16), today()).is_err());
        assert!(validate_create(&at(2023, 6, 16), today()).is_ok());
        assert!(validate_create(&at(2023, 6, 15), today()).is_err());
    }

    #[test]
    fn test_all_violations_collected() {
        let bad = ContributionCreate {
            contribution_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            validation_notes: Some("n".repeat(501)),
            ..dto("0")
        };
        let errors = validate_create(&bad, today()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["amount", "contributionDate", "validationNotes"]);
    }

    #[test]
    fn test_update_checks_present_fields_only() {
        assert!(validate_update(&ContributionUpdate::default(), today()).is_ok());
        let patch = ContributionUpdate {
            amount: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert_eq!(validate_update(&patch, today()).unwrap_err().len(), 1);
    }

    #[test]
    fn test_search_ranges() {
        let q = ContributionSearch {
            min_amount: Some(Decimal::from(100)),
            max_amount: Some(Decimal::from(50)),
            from_date: Some(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()),
            to_date: Some(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()),
            ..Default::default()
        };
        let errors = validate_search(&q).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["maxAmount", "toDate"]);

        let negative = ContributionSearch {
            min_amount: Some(Decimal::from(-1)),
            ..Default::default()
        };
        assert_eq!(validate_search(&negative).unwrap_err()[0].field, "minAmount");
    }
}
