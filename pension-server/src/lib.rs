//! Pension membership and contribution service
//!
//! Members, their employers and contributions, stored in SQLite and served
//! over a JSON HTTP API.
//!
//! # Layout
//!
//! - [`validation`] pure field rules, reported in one batch
//! - [`db`] pool, migrations and per-table repository functions
//! - [`services`] business operations returning [`shared::error::AppResult`]
//! - [`api`] axum routes and handlers
//! - [`auth`] bearer JWT checks and the bootstrap admin login

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod logger;
pub mod services;
pub mod state;
pub mod validation;

pub use api::build_app;
pub use config::Config;
pub use db::DbService;
pub use state::AppState;

/// Security event logging (target `security`)
#[macro_export]
macro_rules! security_log {
    (WARN, $event:expr, $($arg:tt)*) => {
        tracing::warn!(target: "security", event = $event, $($arg)*)
    };
    (INFO, $event:expr, $($arg:tt)*) => {
        tracing::info!(target: "security", event = $event, $($arg)*)
    };
}
