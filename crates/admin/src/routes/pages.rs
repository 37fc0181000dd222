//! Page CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use verdant_core::{Page, PageId};

use crate::db::{activity, pages};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Create/update payload.
#[derive(Debug, Deserialize)]
pub struct PagePayload {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

fn default_template() -> String {
    "default".to_string()
}

impl PagePayload {
    fn into_input(self) -> Result<pages::PageInput> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(AppError::BadRequest("Page title is required.".to_string()));
        }

        let slug = super::resolve_slug(self.slug.as_deref(), &title)?;

        Ok(pages::PageInput {
            title,
            slug,
            content: self.content,
            template: self.template,
            is_active: self.is_active,
        })
    }
}

/// List all pages.
///
/// GET /pages
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Page>>> {
    Ok(Json(pages::list(state.pool()).await?))
}

/// Show one page.
///
/// GET /pages/{id}
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<PageId>,
) -> Result<Json<Page>> {
    pages::get(state.pool(), id)
        .await
        .map(Json)
        .map_err(|e| super::named_not_found(e, "page"))
}

/// Create a page.
///
/// POST /pages
#[instrument(skip(state, admin, payload))]
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Json(payload): Json<PagePayload>,
) -> Result<Json<Page>> {
    let input = payload.into_input()?;
    let page = pages::create(state.pool(), &input).await?;

    activity::log(
        state.pool(),
        &admin,
        "create",
        "page",
        Some(page.id.as_i32()),
        json!({ "title": page.title, "slug": page.slug }),
    );

    Ok(Json(page))
}

/// Update a page.
///
/// PUT /pages/{id}
#[instrument(skip(state, admin, payload))]
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<PageId>,
    Json(payload): Json<PagePayload>,
) -> Result<Json<Page>> {
    let input = payload.into_input()?;
    let page = pages::update(state.pool(), id, &input)
        .await
        .map_err(|e| super::named_not_found(e, "page"))?;

    activity::log(
        state.pool(),
        &admin,
        "update",
        "page",
        Some(id.as_i32()),
        json!({ "title": page.title }),
    );

    Ok(Json(page))
}

/// Delete a page.
///
/// DELETE /pages/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<PageId>,
) -> Result<Json<super::ApiSuccess>> {
    pages::delete(state.pool(), id)
        .await
        .map_err(|e| super::named_not_found(e, "page"))?;

    activity::log(
        state.pool(),
        &admin,
        "delete",
        "page",
        Some(id.as_i32()),
        json!({}),
    );

    Ok(Json(super::ApiSuccess::ok()))
}
