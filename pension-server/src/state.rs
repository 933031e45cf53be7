//! Shared application state

use std::sync::Arc;

use crate::auth::{JwtService, hash_password};
use crate::config::Config;
use crate::db::DbService;
use crate::services::Services;
use shared::error::AppError;

/// Bootstrap administrator, password kept only as an argon2 hash
#[derive(Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password_hash: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Cloned into every handler; everything inside is cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub services: Services,
    pub jwt: JwtService,
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    pub fn new(config: Config, db: DbService) -> Result<Self, AppError> {
        let password_hash = hash_password(&config.admin_password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
        let admin = AdminCredentials {
            email: config.admin_email.clone(),
            password_hash,
        };

        Ok(Self {
            services: Services::new(db.pool.clone()),
            jwt: JwtService::new(config.jwt.clone()),
            admin: Arc::new(admin),
            config: Arc::new(config),
            db,
        })
    }
}
