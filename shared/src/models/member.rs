//! Member Model

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Membership lifecycle status
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

/// Member entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<String>,
    pub status: MemberStatus,
    /// Weak reference, may point at a removed employer
    pub employer_id: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub deleted_by: Option<String>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on `today`
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.date_of_birth, today)
    }
}

/// Whole years between `date_of_birth` and `today`, decremented when the
/// birthday has not yet come round this year.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Create member payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub employer_id: Option<Uuid>,
}

/// Update member payload (full replace of the editable fields)
pub type MemberUpdate = MemberCreate;

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberStatusUpdate {
    pub status: MemberStatus,
}

/// Member search query
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearch {
    /// Case-insensitive substring over first, last and full name
    pub name: Option<String>,
    pub status: Option<MemberStatus>,
    #[serde(default = "crate::pagination::default_page_number")]
    pub page_number: i64,
    #[serde(default = "crate::pagination::default_page_size")]
    pub page_size: i64,
}

impl Default for MemberSearch {
    fn default() -> Self {
        Self {
            name: None,
            status: None,
            page_number: crate::pagination::default_page_number(),
            page_size: crate::pagination::default_page_size(),
        }
    }
}

impl MemberSearch {
    pub fn page(&self) -> crate::pagination::PageRequest {
        crate::pagination::PageRequest::new(self.page_number, self.page_size)
    }
}

/// Member view (for list/detail responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub member_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub gender: Option<String>,
    pub status: MemberStatus,
    pub employer_id: Option<Uuid>,
    pub created_at: i64,
    pub updated_at: i64,
    pub created_by: String,
    pub updated_by: Option<String>,
}

impl From<Member> for MemberView {
    fn from(m: Member) -> Self {
        Self {
            full_name: m.full_name(),
            member_id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            email: m.email,
            phone_number: m.phone_number,
            date_of_birth: m.date_of_birth,
            gender: m.gender,
            status: m.status,
            employer_id: m.employer_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
            created_by: m.created_by,
            updated_by: m.updated_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = date(2000, 6, 15);
        assert_eq!(age_on(dob, date(2025, 6, 14)), 24);
        assert_eq!(age_on(dob, date(2025, 6, 15)), 25);
        assert_eq!(age_on(dob, date(2025, 12, 1)), 25);
    }

    #[test]
    fn test_leap_day_birthday() {
        let dob = date(2004, 2, 29);
        assert_eq!(age_on(dob, date(2022, 2, 28)), 17);
        assert_eq!(age_on(dob, date(2022, 3, 1)), 18);
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&MemberStatus::Suspended).unwrap(),
            "\"Suspended\""
        );
        let s: MemberStatus = serde_json::from_str("\"Inactive\"").unwrap();
        assert_eq!(s, MemberStatus::Inactive);
    }

    #[test]
    fn test_search_defaults() {
        let q: MemberSearch = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page_number, 1);
        assert_eq!(q.page_size, 10);
    }
}
