//! Data models
//!
//! Shared between pension-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are UUID v4; timestamps are epoch millis; calendar dates are
//! `NaiveDate`.

pub mod benefit_eligibility;
pub mod contribution;
pub mod employer;
pub mod member;
pub mod transaction_log;

// Re-exports
pub use benefit_eligibility::*;
pub use contribution::*;
pub use employer::*;
pub use member::*;
pub use transaction_log::*;
