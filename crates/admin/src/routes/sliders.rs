//! Slider CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tracing::instrument;

use verdant_core::{Slider, SliderId};

use crate::db::{activity, sliders};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Create/update payload.
#[derive(Debug, Deserialize)]
pub struct SliderPayload {
    pub title: String,
    /// JSON array of `{image_url, caption, href}` slide objects.
    #[serde(default)]
    pub slides: Option<JsonValue>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl SliderPayload {
    fn into_input(self) -> Result<sliders::SliderInput> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(AppError::BadRequest("Slider title is required.".to_string()));
        }

        let slides = match self.slides {
            None => json!([]),
            Some(value) if value.is_array() => value,
            Some(_) => {
                return Err(AppError::BadRequest(
                    "Slides must be an array.".to_string(),
                ));
            }
        };

        Ok(sliders::SliderInput {
            title,
            slides,
            position: self.position,
            is_active: self.is_active,
        })
    }
}

/// List all sliders.
///
/// GET /sliders
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Slider>>> {
    Ok(Json(sliders::list(state.pool()).await?))
}

/// Show one slider.
///
/// GET /sliders/{id}
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<SliderId>,
) -> Result<Json<Slider>> {
    sliders::get(state.pool(), id)
        .await
        .map(Json)
        .map_err(|e| super::named_not_found(e, "slider"))
}

/// Create a slider.
///
/// POST /sliders
#[instrument(skip(state, admin, payload))]
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Json(payload): Json<SliderPayload>,
) -> Result<Json<Slider>> {
    let input = payload.into_input()?;
    let slider = sliders::create(state.pool(), &input).await?;

    activity::log(
        state.pool(),
        &admin,
        "create",
        "slider",
        Some(slider.id.as_i32()),
        json!({ "title": slider.title }),
    );

    Ok(Json(slider))
}

/// Update a slider.
///
/// PUT /sliders/{id}
#[instrument(skip(state, admin, payload))]
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<SliderId>,
    Json(payload): Json<SliderPayload>,
) -> Result<Json<Slider>> {
    let input = payload.into_input()?;
    let slider = sliders::update(state.pool(), id, &input)
        .await
        .map_err(|e| super::named_not_found(e, "slider"))?;

    activity::log(
        state.pool(),
        &admin,
        "update",
        "slider",
        Some(id.as_i32()),
        json!({ "title": slider.title }),
    );

    Ok(Json(slider))
}

/// Delete a slider.
///
/// DELETE /sliders/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<SliderId>,
) -> Result<Json<super::ApiSuccess>> {
    sliders::delete(state.pool(), id)
        .await
        .map_err(|e| super::named_not_found(e, "slider"))?;

    activity::log(
        state.pool(),
        &admin,
        "delete",
        "slider",
        Some(id.as_i32()),
        json!({}),
    );

    Ok(Json(super::ApiSuccess::ok()))
}
