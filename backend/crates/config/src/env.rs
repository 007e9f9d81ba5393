use profileera_common::error::{ProfileEraError, ProfileEraResult};
use std::env;
use std::fmt;

/// Every variable the service refuses to start without.
pub const REQUIRED_VARS: [&str; 8] = [
    "PORT",
    "DATABASE_URL",
    "ADMIN_API_KEY",
    "ADMIN_PASSWORD",
    "ADMIN_EMAIL",
    "ALLOWED_ORIGINS",
    "EMAIL_USER",
    "EMAIL_PASS",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> ProfileEraResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ProfileEraError::Config(format!(
                "invalid APP_ENV: {other} (expected development or production)"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub app_env: AppEnv,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_api_key: String,
    pub allowed_origins: String,
    pub email_user: String,
    pub email_pass: String,
    pub smtp_host: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> ProfileEraResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Reports every missing required variable in a single error rather than
    /// stopping at the first one. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> ProfileEraResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|&key| get(key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ProfileEraError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let required = |key: &str| {
            get(key).ok_or_else(|| ProfileEraError::Config(format!("{key} is required but not set")))
        };
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: get_or("HOST", "0.0.0.0"),
            port: required("PORT")?
                .trim()
                .parse()
                .map_err(|e| ProfileEraError::Config(format!("invalid PORT: {e}")))?,
            log_level: get_or("LOG_LEVEL", "info"),
            app_env: AppEnv::parse(&get_or("APP_ENV", "development"))?,
            admin_email: required("ADMIN_EMAIL")?,
            admin_password: required("ADMIN_PASSWORD")?,
            admin_api_key: required("ADMIN_API_KEY")?,
            allowed_origins: required("ALLOWED_ORIGINS")?,
            email_user: required("EMAIL_USER")?,
            email_pass: required("EMAIL_PASS")?,
            smtp_host: get_or("SMTP_HOST", "smtp.gmail.com"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    /// Origins permitted by CORS, parsed from the comma-separated setting.
    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("app_env", &self.app_env)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &"<redacted>")
            .field("admin_api_key", &"<redacted>")
            .field("allowed_origins", &self.allowed_origins)
            .field("email_user", &self.email_user)
            .field("email_pass", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .finish()
    }
}
