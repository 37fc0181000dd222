//! Category CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use verdant_core::{Category, CategoryId};

use crate::db::{activity, categories};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Create/update payload.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl CategoryPayload {
    fn into_input(self) -> Result<categories::CategoryInput> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(AppError::BadRequest("Category name is required.".to_string()));
        }

        let slug = super::resolve_slug(self.slug.as_deref(), &name)?;

        Ok(categories::CategoryInput {
            name,
            slug,
            parent_id: self.parent_id,
            sort_order: self.sort_order,
            is_active: self.is_active,
        })
    }
}

/// List all categories.
///
/// GET /categories
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Category>>> {
    Ok(Json(categories::list(state.pool()).await?))
}

/// Show one category.
///
/// GET /categories/{id}
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>> {
    categories::get(state.pool(), id)
        .await
        .map(Json)
        .map_err(|e| super::named_not_found(e, "category"))
}

/// Create a category.
///
/// POST /categories
#[instrument(skip(state, admin, payload))]
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    let input = payload.into_input()?;
    let category = categories::create(state.pool(), &input).await?;

    activity::log(
        state.pool(),
        &admin,
        "create",
        "category",
        Some(category.id.as_i32()),
        json!({ "name": category.name, "slug": category.slug }),
    );

    Ok(Json(category))
}

/// Update a category.
///
/// PUT /categories/{id}
#[instrument(skip(state, admin, payload))]
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<CategoryId>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>> {
    let input = payload.into_input()?;
    let category = categories::update(state.pool(), id, &input)
        .await
        .map_err(|e| super::named_not_found(e, "category"))?;

    activity::log(
        state.pool(),
        &admin,
        "update",
        "category",
        Some(id.as_i32()),
        json!({ "name": category.name }),
    );

    Ok(Json(category))
}

/// Delete a category. Children are re-parented to the deleted node's parent.
///
/// DELETE /categories/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<CategoryId>,
) -> Result<Json<super::ApiSuccess>> {
    categories::delete(state.pool(), id)
        .await
        .map_err(|e| super::named_not_found(e, "category"))?;

    activity::log(
        state.pool(),
        &admin,
        "delete",
        "category",
        Some(id.as_i32()),
        json!({}),
    );

    Ok(Json(super::ApiSuccess::ok()))
}
