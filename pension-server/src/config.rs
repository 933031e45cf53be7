//! Server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Minimum JWT secret length outside development
const MIN_SECRET_LEN: usize = 32;

/// Server configuration
#[derive(Clone)]
pub struct Config {
    /// SQLite URL, e.g. `sqlite:pension.db`
    pub database_url: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Whole-request deadline
    pub request_timeout: Duration,
    pub db_max_connections: u32,
    /// Pool acquire deadline
    pub db_acquire_timeout: Duration,
    pub jwt: JwtConfig,
    /// Bootstrap administrator allowed to request tokens
    pub admin_email: String,
    pub admin_password: String,
    pub log_level: String,
    /// Daily rolling log files go here when the directory exists
    pub log_dir: Option<String>,
}

/// Token signing settings
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiration_minutes: i64,
}

// Secrets never reach logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("http_port", &self.http_port)
            .field("environment", &self.environment)
            .field("request_timeout", &self.request_timeout)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout", &self.db_acquire_timeout)
            .field("jwt", &self.jwt)
            .field("admin_email", &self.admin_email)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production-use")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let jwt_secret = Self::require_secret("JWT_SECRET", &environment)?;
        if environment != "development" && jwt_secret.len() < MIN_SECRET_LEN {
            return Err(format!("JWT_SECRET must be at least {MIN_SECRET_LEN} characters").into());
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:pension.db".into()),
            http_port: Self::parse_or("HTTP_PORT", 8080),
            request_timeout: Duration::from_millis(Self::parse_or("REQUEST_TIMEOUT_MS", 30_000)),
            db_max_connections: Self::parse_or("DB_MAX_CONNECTIONS", 5),
            db_acquire_timeout: Duration::from_millis(Self::parse_or(
                "DB_ACQUIRE_TIMEOUT_MS",
                5_000,
            )),
            jwt: JwtConfig {
                secret: jwt_secret,
                issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "pension-server".into()),
                audience: std::env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "pension-clients".into()),
                expiration_minutes: Self::parse_or("JWT_EXPIRATION_MINUTES", 60),
            },
            admin_email: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@epsc.local".into()),
            admin_password: Self::require_secret("ADMIN_PASSWORD", &environment)?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Fixed configuration for tests and local tooling
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "development".into(),
            request_timeout: Duration::from_secs(30),
            db_max_connections: 1,
            db_acquire_timeout: Duration::from_secs(5),
            jwt: JwtConfig {
                secret: "test-secret-with-at-least-32-characters!".into(),
                issuer: "pension-server".into(),
                audience: "pension-clients".into(),
                expiration_minutes: 60,
            },
            admin_email: "admin@epsc.local".into(),
            admin_password: "correct horse battery staple".into(),
            log_level: "debug".into(),
            log_dir: None,
        }
    }
}
