//! Catalog route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::instrument;

use verdant_core::{CategoryNode, Product};

use crate::cache::CacheKey;
use crate::db::catalog;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Filters accepted by the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilter {
    /// Restrict to one category by slug.
    pub category: Option<String>,
    /// Filter on the premium flag.
    pub premium: Option<bool>,
}

/// List active products.
///
/// GET /api/products?category=slug&premium=bool
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Arc<JsonValue>>> {
    let key = CacheKey::Products {
        category: filter.category.clone(),
        premium: filter.premium,
    };

    let payload = state
        .catalog_cache()
        .get_or_compute(key, async {
            let products = catalog::list_active_products(
                state.pool(),
                filter.category.as_deref(),
                filter.premium,
            )
            .await?;
            serialize(&products)
        })
        .await?;

    Ok(Json(payload))
}

/// Show one active product.
///
/// GET /api/products/{slug}
#[instrument(skip(state))]
pub async fn show_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Product>> {
    let product = catalog::get_active_product(state.pool(), &slug).await?;
    Ok(Json(product))
}

/// List active categories as a one-level tree.
///
/// GET /api/categories
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Arc<JsonValue>>> {
    let payload = state
        .catalog_cache()
        .get_or_compute(CacheKey::Categories, async {
            let categories = catalog::list_active_categories(state.pool()).await?;
            serialize(&CategoryNode::build_tree(categories))
        })
        .await?;

    Ok(Json(payload))
}

/// Serialize a payload for the cache.
pub(super) fn serialize<T: serde::Serialize>(value: &T) -> Result<JsonValue> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(format!("serialize payload: {e}")))
}
