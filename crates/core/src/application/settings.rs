// Process-wide settings (immutable after startup)

use crate::error::{AppError, Result};
use tracing::debug;

pub const DEFAULT_SALT: &str = "Otus";
pub const DEFAULT_ADMIN_LOGIN: &str = "admin";
pub const DEFAULT_ADMIN_SALT: &str = "42";

pub const ENV_SALT: &str = "SCORING_SALT";
pub const ENV_ADMIN_LOGIN: &str = "SCORING_ADMIN_LOGIN";
pub const ENV_ADMIN_SALT: &str = "SCORING_ADMIN_SALT";

/// Shared secrets and the admin identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    salt: String,
    admin_login: String,
    admin_salt: String,
    admin_score: i64,
}

impl Settings {
    /// Build settings, checking that the admin salt doubles as an integer score
    pub fn new(
        salt: impl Into<String>,
        admin_login: impl Into<String>,
        admin_salt: impl Into<String>,
    ) -> Result<Self> {
        let salt = salt.into();
        let admin_login = admin_login.into();
        let admin_salt = admin_salt.into();

        if salt.is_empty() || admin_salt.is_empty() {
            return Err(AppError::Config("salts must not be empty".to_string()));
        }
        if admin_login.is_empty() {
            return Err(AppError::Config("admin login must not be empty".to_string()));
        }

        let admin_score = admin_salt.trim().parse::<i64>().map_err(|_| {
            AppError::Config(format!(
                "admin salt '{}' must be an integer (it is the admin score)",
                admin_salt
            ))
        })?;

        Ok(Self {
            salt,
            admin_login,
            admin_salt,
            admin_score,
        })
    }

    /// Load from SCORING_SALT / SCORING_ADMIN_LOGIN / SCORING_ADMIN_SALT,
    /// falling back to the defaults
    pub fn from_env() -> Result<Self> {
        let salt = std::env::var(ENV_SALT).unwrap_or_else(|_| DEFAULT_SALT.to_string());
        let admin_login =
            std::env::var(ENV_ADMIN_LOGIN).unwrap_or_else(|_| DEFAULT_ADMIN_LOGIN.to_string());
        let admin_salt =
            std::env::var(ENV_ADMIN_SALT).unwrap_or_else(|_| DEFAULT_ADMIN_SALT.to_string());

        debug!(admin_login = %admin_login, "Loaded settings from environment");

        Self::new(salt, admin_login, admin_salt)
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn admin_login(&self) -> &str {
        &self.admin_login
    }

    pub fn admin_salt(&self) -> &str {
        &self.admin_salt
    }

    /// Sentinel score returned to the admin identity
    pub fn admin_score(&self) -> i64 {
        self.admin_score
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            salt: DEFAULT_SALT.to_string(),
            admin_login: DEFAULT_ADMIN_LOGIN.to_string(),
            admin_salt: DEFAULT_ADMIN_SALT.to_string(),
            admin_score: 42,
        }
    }
}
