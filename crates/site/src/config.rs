//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string
//! - `SITE_BASE_URL` - Public URL for the site
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_MEDIA_DIR` - Media blob directory (default: media)
//! - `SITE_STATIC_DIR` - Static asset directory (default: crates/site/static)
//! - `PDF_PROXY_ALLOWED_HOST` - Storage host the PDF proxy may fetch from
//! - `ADVISORY_API_KEY` - Hosted LLM API key (advisory disabled if unset)
//! - `ADVISORY_MODEL` - LLM model id (default: claude-sonnet-4-20250514)
//! - `SMTP_HOST` / `SMTP_PORT` / `SMTP_USERNAME` / `SMTP_PASSWORD` - Mail relay
//! - `MAIL_FROM_ADDRESS` - From address for transactional mail
//! - `CONTACT_RECIPIENT` - Where contact-form submissions are delivered
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Incomplete configuration: {0}")]
    Incomplete(String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Directory media blobs are served from
    pub media_dir: PathBuf,
    /// Directory static assets are served from
    pub static_dir: PathBuf,
    /// Storage host the PDF proxy may fetch from
    pub pdf_allowed_host: Option<String>,
    /// Hosted LLM configuration (advisory endpoints fall back if `None`)
    pub advisory: Option<AdvisoryConfig>,
    /// SMTP configuration (forms report unavailable if `None`)
    pub mail: Option<MailConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Hosted LLM API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AdvisoryConfig {
    /// API key for the hosted Messages API
    pub api_key: SecretString,
    /// Model id to request
    pub model: String,
}

impl std::fmt::Debug for AdvisoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

/// SMTP mail configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct MailConfig {
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP relay port
    pub smtp_port: u16,
    /// SMTP username
    pub smtp_username: String,
    /// SMTP password
    pub smtp_password: SecretString,
    /// From address for transactional mail
    pub from_address: String,
    /// Recipient for contact-form submissions
    pub contact_recipient: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("contact_recipient", &self.contact_recipient)
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if an optional subsystem is only partially configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SITE_DATABASE_URL")?;
        let host = get_env_or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("SITE_BASE_URL")?;
        let media_dir = PathBuf::from(get_env_or_default("SITE_MEDIA_DIR", "media"));
        let static_dir = PathBuf::from(get_env_or_default("SITE_STATIC_DIR", "crates/site/static"));
        let pdf_allowed_host = get_optional_env("PDF_PROXY_ALLOWED_HOST");

        let advisory = AdvisoryConfig::from_env();
        let mail = MailConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            media_dir,
            static_dir,
            pdf_allowed_host,
            advisory,
            mail,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl AdvisoryConfig {
    /// Default model when `ADVISORY_MODEL` is unset.
    pub const DEFAULT_MODEL: &'static str = "claude-sonnet-4-20250514";

    fn from_env() -> Option<Self> {
        let api_key = get_optional_env("ADVISORY_API_KEY")?;
        Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default("ADVISORY_MODEL", Self::DEFAULT_MODEL),
        })
    }
}

impl MailConfig {
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(smtp_host) = get_optional_env("SMTP_HOST") else {
            return Ok(None);
        };

        // A host without credentials is a misconfiguration, not "mail off"
        let smtp_port = get_env_or_default("SMTP_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string()))?;
        let smtp_username = get_required_env("SMTP_USERNAME")
            .map_err(|_| ConfigError::Incomplete("SMTP_HOST set but SMTP_USERNAME missing".into()))?;
        let smtp_password = get_required_env("SMTP_PASSWORD")
            .map_err(|_| ConfigError::Incomplete("SMTP_HOST set but SMTP_PASSWORD missing".into()))?;
        let from_address = get_required_env("MAIL_FROM_ADDRESS")
            .map_err(|_| ConfigError::Incomplete("SMTP_HOST set but MAIL_FROM_ADDRESS missing".into()))?;
        let contact_recipient = get_required_env("CONTACT_RECIPIENT")
            .map_err(|_| ConfigError::Incomplete("SMTP_HOST set but CONTACT_RECIPIENT missing".into()))?;

        Ok(Some(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password: SecretString::from(smtp_password),
            from_address,
            contact_recipient,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig {
            database_url: SecretString::from("postgres://localhost/verdant"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            media_dir: PathBuf::from("media"),
            static_dir: PathBuf::from("static"),
            pdf_allowed_host: None,
            advisory: None,
            mail: None,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_advisory_config_debug_redacts_key() {
        let config = AdvisoryConfig {
            api_key: SecretString::from("sk-live-supersecret"),
            model: AdvisoryConfig::DEFAULT_MODEL.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("supersecret"));
        assert!(debug_output.contains(AdvisoryConfig::DEFAULT_MODEL));
    }

    #[test]
    fn test_mail_config_debug_redacts_password() {
        let config = MailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: "mailer".to_string(),
            smtp_password: SecretString::from("hunter2-long-password"),
            from_address: "noreply@verdantgarden.example".to_string(),
            contact_recipient: "hello@verdantgarden.example".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("smtp.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }
}
