//! Product CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use verdant_core::{CategoryId, Product, ProductId};

use crate::db::{activity, products};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Create/update payload.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

const fn default_active() -> bool {
    true
}

impl ProductPayload {
    fn into_input(self) -> Result<products::ProductInput> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::BadRequest("Product name is required.".to_string()));
        }

        let slug = super::resolve_slug(self.slug.as_deref(), &name)?;

        Ok(products::ProductInput {
            name,
            slug,
            description: self.description,
            category_id: self.category_id,
            images: self.images,
            is_active: self.is_active,
            is_premium: self.is_premium,
            tags: self.tags,
        })
    }
}

/// List all products.
///
/// GET /products
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(products::list(state.pool()).await?))
}

/// Show one product.
///
/// GET /products/{id}
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    products::get(state.pool(), id)
        .await
        .map(Json)
        .map_err(|e| super::named_not_found(e, "product"))
}

/// Create a product.
///
/// POST /products
#[instrument(skip(state, admin, payload))]
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>> {
    let input = payload.into_input()?;
    let product = products::create(state.pool(), &input).await?;

    activity::log(
        state.pool(),
        &admin,
        "create",
        "product",
        Some(product.id.as_i32()),
        json!({ "name": product.name, "slug": product.slug }),
    );

    Ok(Json(product))
}

/// Update a product.
///
/// PUT /products/{id}
#[instrument(skip(state, admin, payload))]
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>> {
    let input = payload.into_input()?;
    let product = products::update(state.pool(), id, &input)
        .await
        .map_err(|e| super::named_not_found(e, "product"))?;

    activity::log(
        state.pool(),
        &admin,
        "update",
        "product",
        Some(id.as_i32()),
        json!({ "name": product.name }),
    );

    Ok(Json(product))
}

/// Delete a product.
///
/// DELETE /products/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<ProductId>,
) -> Result<Json<super::ApiSuccess>> {
    products::delete(state.pool(), id)
        .await
        .map_err(|e| super::named_not_found(e, "product"))?;

    activity::log(
        state.pool(),
        &admin,
        "delete",
        "product",
        Some(id.as_i32()),
        json!({}),
    );

    Ok(Json(super::ApiSuccess::ok()))
}
