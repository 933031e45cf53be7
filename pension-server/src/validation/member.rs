//! Member rules

use chrono::NaiveDate;
use shared::error::FieldError;
use shared::models::{MemberCreate, MemberSearch, age_on};

use super::{MAX_NAME_LEN, email, finish, page, phone, required_text};

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 70;

/// Create and update share the same rules (update is a full replace).
pub fn validate_member(dto: &MemberCreate, today: NaiveDate) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    required_text(&mut errors, &dto.first_name, "firstName", "First name", MAX_NAME_LEN);
    required_text(&mut errors, &dto.last_name, "lastName", "Last name", MAX_NAME_LEN);
    email(&mut errors, &dto.email, "email");
    phone(&mut errors, &dto.phone_number, "phoneNumber");
    date_of_birth(&mut errors, dto.date_of_birth, today);

    finish(errors)
}

fn date_of_birth(errors: &mut Vec<FieldError>, dob: NaiveDate, today: NaiveDate) {
    if dob >= today {
        errors.push(FieldError::new(
            "dateOfBirth",
            "Date of birth must be in the past",
        ));
        return;
    }
    let age = age_on(dob, today);
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        errors.push(FieldError::new(
            "dateOfBirth",
            format!("Member must be between {MIN_AGE} and {MAX_AGE} years old"),
        ));
    }
}

pub fn validate_search(query: &MemberSearch) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    page(&mut errors, query.page_number, query.page_size);
    finish(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn dto() -> MemberCreate {
        MemberCreate {
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada.obi@example.com".into(),
            phone_number: "+2348012345678".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: None,
            employer_id: None,
        }
    }

    #[test]
    fn test_valid_member_passes() {
        assert!(validate_member(&dto(), today()).is_ok());
    }

    #[test]
    fn test_every_rule_reported_in_one_pass() {
        let bad = MemberCreate {
            first_name: String::new(),
            last_name: "x".repeat(51),
            email: "nope".into(),
            phone_number: "0123".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            ..dto()
        };
        let errors = validate_member(&bad, today()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["firstName", "lastName", "email", "phoneNumber", "dateOfBirth"]
        );
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        let turns_18_today = MemberCreate {
            date_of_birth: NaiveDate::from_ymd_opt(2007, 6, 15).unwrap(),
            ..dto()
        };
        assert!(validate_member(&turns_18_today, today()).is_ok());

        let turns_18_tomorrow = MemberCreate {
            date_of_birth: NaiveDate::from_ymd_opt(2007, 6, 16).unwrap(),
            ..dto()
        };
        assert!(validate_member(&turns_18_tomorrow, today()).is_err());

        let just_70 = MemberCreate {
            date_of_birth: NaiveDate::from_ymd_opt(1955, 1, 1).unwrap(),
            ..dto()
        };
        assert!(validate_member(&just_70, today()).is_ok());

        let turned_71 = MemberCreate {
            date_of_birth: NaiveDate::from_ymd_opt(1954, 6, 15).unwrap(),
            ..dto()
        };
        let errors = validate_member(&turned_71, today()).unwrap_err();
        assert_eq!(errors[0].message, "Member must be between 18 and 70 years old");
    }

    #[test]
    fn test_search_page_bounds() {
        let q = MemberSearch {
            page_number: 0,
            ..Default::default()
        };
        assert!(validate_search(&q).is_err());
        assert!(validate_search(&MemberSearch::default()).is_ok());
    }
}
