//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::advisory::AdvisoryClient;
use crate::cache::CatalogCache;
use crate::config::SiteConfig;
use crate::services::EmailService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    advisory: Option<AdvisoryClient>,
    mailer: Option<EmailService>,
    catalog_cache: CatalogCache,
    http: reqwest::Client,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The advisory client and mailer are built only when their config
    /// sections are present; the corresponding endpoints degrade per the
    /// error-handling policy when they are absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport cannot be constructed.
    pub fn new(config: SiteConfig, pool: PgPool) -> Result<Self, crate::services::MailError> {
        let advisory = config.advisory.as_ref().map(AdvisoryClient::new);
        let mailer = config.mail.as_ref().map(EmailService::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                advisory,
                mailer,
                catalog_cache: CatalogCache::new(),
                http: reqwest::Client::new(),
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the advisory client, if configured.
    #[must_use]
    pub fn advisory(&self) -> Option<&AdvisoryClient> {
        self.inner.advisory.as_ref()
    }

    /// Get the email service, if configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&EmailService> {
        self.inner.mailer.as_ref()
    }

    /// Get a reference to the catalog cache.
    #[must_use]
    pub fn catalog_cache(&self) -> &CatalogCache {
        &self.inner.catalog_cache
    }

    /// Get the shared HTTP client (PDF proxy).
    #[must_use]
    pub fn http_client(&self) -> &reqwest::Client {
        &self.inner.http
    }
}
