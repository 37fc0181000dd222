//! Page, widget, and slider route handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::instrument;

use verdant_core::{Page, Widget, WidgetId, WidgetKind};

use crate::cache::CacheKey;
use crate::db::catalog;
use crate::error::Result;
use crate::state::AppState;

/// Show one active content page.
///
/// GET /api/pages/{slug}
#[instrument(skip(state))]
pub async fn show_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Page>> {
    let page = catalog::get_active_page(state.pool(), &slug).await?;
    Ok(Json(page))
}

/// A widget as served publicly: settings carry the per-kind defaults.
#[derive(Debug, Serialize)]
struct PublicWidget {
    id: WidgetId,
    kind: WidgetKind,
    title: String,
    settings: JsonValue,
    position: i32,
}

impl From<Widget> for PublicWidget {
    fn from(widget: Widget) -> Self {
        let settings = widget.settings_with_defaults();
        Self {
            id: widget.id,
            kind: widget.kind,
            title: widget.title,
            settings,
            position: widget.position,
        }
    }
}

/// List active widgets with merged settings.
///
/// GET /api/widgets
#[instrument(skip(state))]
pub async fn list_widgets(State(state): State<AppState>) -> Result<Json<Arc<JsonValue>>> {
    let payload = state
        .catalog_cache()
        .get_or_compute(CacheKey::Widgets, async {
            let widgets: Vec<PublicWidget> = catalog::list_active_widgets(state.pool())
                .await?
                .into_iter()
                .map(PublicWidget::from)
                .collect();
            super::catalog::serialize(&widgets)
        })
        .await?;

    Ok(Json(payload))
}

/// List active sliders.
///
/// GET /api/sliders
#[instrument(skip(state))]
pub async fn list_sliders(State(state): State<AppState>) -> Result<Json<Arc<JsonValue>>> {
    let payload = state
        .catalog_cache()
        .get_or_compute(CacheKey::Sliders, async {
            let sliders = catalog::list_active_sliders(state.pool()).await?;
            super::catalog::serialize(&sliders)
        })
        .await?;

    Ok(Json(payload))
}
