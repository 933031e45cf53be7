//! Authentication
//!
//! Bearer JWTs checked by [`require_auth`]; the bootstrap administrator
//! logs in with credentials from the environment.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, CurrentUser, JwtError, JwtService};
pub use middleware::require_auth;
pub use password::{hash_password, verify_password};

/// Role carried by tokens issued to the bootstrap administrator
pub const ADMIN_ROLE: &str = "admin";
