//! Widget CRUD route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tracing::instrument;

use verdant_core::{Widget, WidgetId, WidgetKind};

use crate::db::{activity, widgets};
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdminAuth, RequireEditor};
use crate::state::AppState;

/// Create/update payload.
#[derive(Debug, Deserialize)]
pub struct WidgetPayload {
    pub kind: WidgetKind,
    pub title: String,
    /// Free-form settings object; must be a JSON object when present.
    #[serde(default)]
    pub settings: Option<JsonValue>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl WidgetPayload {
    fn into_input(self) -> Result<widgets::WidgetInput> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return Err(AppError::BadRequest("Widget title is required.".to_string()));
        }

        let settings = match self.settings {
            None => json!({}),
            Some(value) if value.is_object() => value,
            Some(_) => {
                return Err(AppError::BadRequest(
                    "Widget settings must be an object.".to_string(),
                ));
            }
        };

        Ok(widgets::WidgetInput {
            kind: self.kind,
            title,
            settings,
            position: self.position,
            is_active: self.is_active,
        })
    }
}

/// List all widgets.
///
/// GET /widgets
#[instrument(skip(state, _admin))]
pub async fn list(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
) -> Result<Json<Vec<Widget>>> {
    Ok(Json(widgets::list(state.pool()).await?))
}

/// Show one widget.
///
/// GET /widgets/{id}
#[instrument(skip(state, _admin))]
pub async fn show(
    State(state): State<AppState>,
    _admin: RequireAdminAuth,
    Path(id): Path<WidgetId>,
) -> Result<Json<Widget>> {
    widgets::get(state.pool(), id)
        .await
        .map(Json)
        .map_err(|e| super::named_not_found(e, "widget"))
}

/// Create a widget.
///
/// POST /widgets
#[instrument(skip(state, admin, payload))]
pub async fn create(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Json(payload): Json<WidgetPayload>,
) -> Result<Json<Widget>> {
    let input = payload.into_input()?;
    let widget = widgets::create(state.pool(), &input).await?;

    activity::log(
        state.pool(),
        &admin,
        "create",
        "widget",
        Some(widget.id.as_i32()),
        json!({ "title": widget.title, "kind": widget.kind }),
    );

    Ok(Json(widget))
}

/// Update a widget.
///
/// PUT /widgets/{id}
#[instrument(skip(state, admin, payload))]
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<WidgetId>,
    Json(payload): Json<WidgetPayload>,
) -> Result<Json<Widget>> {
    let input = payload.into_input()?;
    let widget = widgets::update(state.pool(), id, &input)
        .await
        .map_err(|e| super::named_not_found(e, "widget"))?;

    activity::log(
        state.pool(),
        &admin,
        "update",
        "widget",
        Some(id.as_i32()),
        json!({ "title": widget.title }),
    );

    Ok(Json(widget))
}

/// Delete a widget.
///
/// DELETE /widgets/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<WidgetId>,
) -> Result<Json<super::ApiSuccess>> {
    widgets::delete(state.pool(), id)
        .await
        .map_err(|e| super::named_not_found(e, "widget"))?;

    activity::log(
        state.pool(),
        &admin,
        "delete",
        "widget",
        Some(id.as_i32()),
        json!({}),
    );

    Ok(Json(super::ApiSuccess::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_rejects_non_object_settings() {
        let payload = WidgetPayload {
            kind: WidgetKind::Hero,
            title: "Hero".to_string(),
            settings: Some(json!([1, 2, 3])),
            position: 0,
            is_active: true,
        };
        assert!(payload.into_input().is_err());
    }

    #[test]
    fn test_payload_defaults_settings_to_empty_object() {
        let payload = WidgetPayload {
            kind: WidgetKind::Hero,
            title: "Hero".to_string(),
            settings: None,
            position: 0,
            is_active: true,
        };
        let input = payload.into_input().expect("valid");
        assert_eq!(input.settings, json!({}));
    }
}
