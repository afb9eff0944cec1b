//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub media_storage_root: String,
    pub font_dir: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub verification_token_expiry_minutes: u64,
    pub reset_token_expiry_minutes: u64,
    pub email_change_code_expiry_minutes: u64,
    pub max_password_reset_requests_per_hour: u32,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub frontend_url: String,
    pub email_from_name: String,
    pub default_certificate_template_url: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// This method is used internally to populate the singleton. It panics
    /// if required variables are missing or improperly formatted.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "the-podium".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            media_storage_root: env::var("MEDIA_STORAGE_ROOT")
                .expect("MEDIA_STORAGE_ROOT is required"),
            font_dir: env::var("FONT_DIR").unwrap_or_else(|_| "assets/fonts".into()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .unwrap(),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .unwrap_or("60".into())
                .parse()
                .unwrap(),
            verification_token_expiry_minutes: env::var("VERIFICATION_TOKEN_EXPIRY_MINUTES")
                .unwrap_or("1440".into())
                .parse()
                .unwrap(),
            reset_token_expiry_minutes: env::var("RESET_TOKEN_EXPIRY_MINUTES")
                .unwrap_or("15".into())
                .parse()
                .unwrap(),
            email_change_code_expiry_minutes: env::var("EMAIL_CHANGE_CODE_EXPIRY_MINUTES")
                .unwrap_or("10".into())
                .parse()
                .unwrap(),
            max_password_reset_requests_per_hour: env::var("MAX_PASSWORD_RESET_REQUESTS_PER_HOUR")
                .unwrap_or("3".into())
                .parse()
                .unwrap(),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".into()),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            frontend_url: env::var("FRONTEND_URL").unwrap_or_default(),
            email_from_name: env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "The Podium".into()),
            default_certificate_template_url: env::var("DEFAULT_CERTIFICATE_TEMPLATE_URL")
                .unwrap_or_default(),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().unwrap();
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_media_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.media_storage_root = value.into());
    }

    pub fn set_font_dir(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.font_dir = value.into());
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value.into());
    }

    pub fn set_reset_token_expiry_minutes(value: impl Into<u64>) {
        AppConfig::set_field(|cfg| cfg.reset_token_expiry_minutes = value.into());
    }

    pub fn set_max_password_reset_requests_per_hour(value: impl Into<u32>) {
        AppConfig::set_field(|cfg| cfg.max_password_reset_requests_per_hour = value.into());
    }

    pub fn set_frontend_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.frontend_url = value.into());
    }

    pub fn set_default_certificate_template_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.default_certificate_template_url = value.into());
    }
}

// --- Free accessor functions (call-site convenience: `config::host()`) ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn media_storage_root() -> String {
    AppConfig::global().media_storage_root.clone()
}

pub fn font_dir() -> String {
    AppConfig::global().font_dir.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn verification_token_expiry_minutes() -> u64 {
    AppConfig::global().verification_token_expiry_minutes
}

pub fn reset_token_expiry_minutes() -> u64 {
    AppConfig::global().reset_token_expiry_minutes
}

pub fn email_change_code_expiry_minutes() -> u64 {
    AppConfig::global().email_change_code_expiry_minutes
}

pub fn max_password_reset_requests_per_hour() -> u32 {
    AppConfig::global().max_password_reset_requests_per_hour
}

pub fn smtp_host() -> String {
    AppConfig::global().smtp_host.clone()
}

pub fn smtp_username() -> String {
    AppConfig::global().smtp_username.clone()
}

pub fn smtp_password() -> String {
    AppConfig::global().smtp_password.clone()
}

pub fn frontend_url() -> String {
    AppConfig::global().frontend_url.clone()
}

pub fn email_from_name() -> String {
    AppConfig::global().email_from_name.clone()
}

pub fn default_certificate_template_url() -> String {
    AppConfig::global().default_certificate_template_url.clone()
}
