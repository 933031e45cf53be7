#![allow(dead_code)]

use chrono::{Datelike, Months, NaiveDate};
use pension_server::DbService;
use pension_server::services::Services;
use rust_decimal::Decimal;
use shared::models::{ContributionCreate, ContributionType, EmployerCreate, MemberCreate};
use std::str::FromStr;
use uuid::Uuid;

pub const ACTOR: &str = "tester@epsc.local";

pub async fn setup() -> (DbService, Services) {
    let db = DbService::in_memory().await.expect("in-memory database");
    let services = Services::new(db.pool.clone());
    (db, services)
}

pub fn member_dto(n: usize) -> MemberCreate {
    MemberCreate {
        first_name: format!("Ada{n}"),
        last_name: "Obi".into(),
        email: format!("ada.obi{n}@example.com"),
        phone_number: "+2348012345678".into(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        gender: Some("F".into()),
        employer_id: None,
    }
}

pub fn employer_dto(rc: &str) -> EmployerCreate {
    EmployerCreate {
        company_name: format!("Acme {rc} Ltd"),
        rc_number: rc.into(),
        address: Some("12 Marina Road, Lagos".into()),
        contact_email: Some("hr@acme.example".into()),
        contact_phone: Some("+2341234567".into()),
    }
}

pub fn amount(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Day `day` of the month `months_back` months before today. Always in the
/// past and inside the two-year window for 1..=20 months back.
pub fn past_date(months_back: u32, day: u32) -> NaiveDate {
    let today = shared::util::today();
    let month = today.checked_sub_months(Months::new(months_back)).unwrap();
    NaiveDate::from_ymd_opt(month.year(), month.month(), day).unwrap()
}

pub fn contribution_dto(
    member_id: Uuid,
    kind: ContributionType,
    value: &str,
    date: NaiveDate,
) -> ContributionCreate {
    ContributionCreate {
        member_id,
        employer_id: None,
        amount: amount(value),
        contribution_type: kind,
        contribution_date: date,
        validation_notes: None,
    }
}

pub async fn create_member(services: &Services, n: usize) -> Uuid {
    services
        .members
        .create_member(&member_dto(n), ACTOR)
        .await
        .expect("member created")
        .member_id
}
