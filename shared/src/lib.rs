//! Shared types for the pension service
//!
//! Domain models, the unified error system, response envelope and
//! pagination types used by the server and its API clients.

pub mod error;
pub mod models;
pub mod pagination;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode, FieldError};
pub use pagination::{PageMeta, PageRequest, PagedResponse};
