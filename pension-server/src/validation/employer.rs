//! Employer rules

use shared::error::FieldError;
use shared::models::{EmployerCreate, EmployerSearch, EmployerUpdate};

use super::{
    MAX_COMPANY_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, email, finish, optional_text, page,
    phone, required_text,
};

pub fn validate_create(dto: &EmployerCreate) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    required_text(
        &mut errors,
        &dto.company_name,
        "companyName",
        "Company name",
        MAX_COMPANY_NAME_LEN,
    );
    required_text(&mut errors, &dto.rc_number, "rcNumber", "RC number", MAX_SHORT_TEXT_LEN);
    contact(
        &mut errors,
        dto.address.as_deref(),
        dto.contact_email.as_deref(),
        dto.contact_phone.as_deref(),
    );
    finish(errors)
}

pub fn validate_update(dto: &EmployerUpdate) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if let Some(name) = &dto.company_name {
        required_text(&mut errors, name, "companyName", "Company name", MAX_COMPANY_NAME_LEN);
    }
    contact(
        &mut errors,
        dto.address.as_deref(),
        dto.contact_email.as_deref(),
        dto.contact_phone.as_deref(),
    );
    finish(errors)
}

pub fn validate_search(query: &EmployerSearch) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    page(&mut errors, query.page_number, query.page_size);
    finish(errors)
}

fn contact(
    errors: &mut Vec<FieldError>,
    address: Option<&str>,
    contact_email: Option<&str>,
    contact_phone: Option<&str>,
) {
    optional_text(errors, address, "address", "Address", MAX_NOTE_LEN);
    if let Some(value) = contact_email.filter(|v| !v.is_empty()) {
        email(errors, value, "contactEmail");
    }
    if let Some(value) = contact_phone.filter(|v| !v.is_empty()) {
        phone(errors, value, "contactPhone");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> EmployerCreate {
        EmployerCreate {
            company_name: "Acme Ltd".into(),
            rc_number: "RC123456".into(),
            address: None,
            contact_email: Some("hr@acme.test".into()),
            contact_phone: None,
        }
    }

    #[test]
    fn test_valid_employer() {
        assert!(validate_create(&dto()).is_ok());
    }

    #[test]
    fn test_missing_fields_and_bad_contact() {
        let bad = EmployerCreate {
            company_name: " ".into(),
            rc_number: String::new(),
            contact_email: Some("broken".into()),
            contact_phone: Some("000".into()),
            ..dto()
        };
        let errors = validate_create(&bad).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["companyName", "rcNumber", "contactEmail", "contactPhone"]);
    }

    #[test]
    fn test_update_ignores_absent_fields() {
        assert!(validate_update(&EmployerUpdate::default()).is_ok());
        let patch = EmployerUpdate {
            company_name: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_update(&patch).is_err());
    }
}
