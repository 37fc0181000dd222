//! Short-TTL cache for public catalog reads.
//!
//! The list endpoints are the hot path and their content changes on admin
//! timescales, so responses are cached as serialized JSON for a short TTL.
//! There is no cross-process invalidation: admin writes become visible when
//! the TTL lapses.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// Cache key for one public list endpoint payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// `GET /api/products` with its filter signature.
    Products {
        category: Option<String>,
        premium: Option<bool>,
    },
    /// `GET /api/categories` tree.
    Categories,
    /// `GET /api/widgets`.
    Widgets,
    /// `GET /api/sliders`.
    Sliders,
}

/// Future-aware cache of serialized list payloads.
#[derive(Clone)]
pub struct CatalogCache {
    entries: Cache<CacheKey, Arc<JsonValue>>,
}

impl CatalogCache {
    /// Time cached payloads stay fresh.
    const TTL: Duration = Duration::from_secs(60);

    /// Maximum number of distinct payloads kept.
    const MAX_ENTRIES: u64 = 256;

    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(Self::MAX_ENTRIES)
                .time_to_live(Self::TTL)
                .build(),
        }
    }

    /// Get the payload for `key`, computing it with `init` on a miss.
    ///
    /// Concurrent misses for the same key coalesce into one `init` call.
    ///
    /// # Errors
    ///
    /// Propagates the error from `init` on a miss.
    pub async fn get_or_compute<F>(&self, key: CacheKey, init: F) -> Result<Arc<JsonValue>, AppError>
    where
        F: Future<Output = Result<JsonValue, AppError>>,
    {
        self.entries
            .try_get_with(key, async { init.await.map(Arc::new) })
            .await
            .map_err(|e: Arc<AppError>| AppError::Internal(e.to_string()))
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_miss_computes_then_hits() {
        let cache = CatalogCache::new();

        let first = cache
            .get_or_compute(CacheKey::Widgets, async { Ok(json!([1, 2, 3])) })
            .await
            .unwrap();
        assert_eq!(*first, json!([1, 2, 3]));

        // A hit must not run the init future
        let second = cache
            .get_or_compute(CacheKey::Widgets, async {
                panic!("init ran on a cache hit")
            })
            .await
            .unwrap();
        assert_eq!(*second, json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_filter_signatures_are_distinct_keys() {
        let cache = CatalogCache::new();

        let all = CacheKey::Products {
            category: None,
            premium: None,
        };
        let premium = CacheKey::Products {
            category: None,
            premium: Some(true),
        };

        cache
            .get_or_compute(all.clone(), async { Ok(json!("all")) })
            .await
            .unwrap();
        let got = cache
            .get_or_compute(premium, async { Ok(json!("premium")) })
            .await
            .unwrap();
        assert_eq!(*got, json!("premium"));

        let still_all = cache
            .get_or_compute(all, async { panic!("evicted") })
            .await
            .unwrap();
        assert_eq!(*still_all, json!("all"));
    }

    #[tokio::test]
    async fn test_error_is_not_cached() {
        let cache = CatalogCache::new();

        let err = cache
            .get_or_compute(CacheKey::Sliders, async {
                Err(AppError::Internal("boom".into()))
            })
            .await;
        assert!(err.is_err());

        // Next call recomputes
        let ok = cache
            .get_or_compute(CacheKey::Sliders, async { Ok(json!([])) })
            .await
            .unwrap();
        assert_eq!(*ok, json!([]));
    }
}
