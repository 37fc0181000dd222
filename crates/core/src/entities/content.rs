//! Page, widget, and slider records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use crate::types::{PageId, SliderId, Slug, WidgetId, WidgetKind};

/// An editable content page (HTML body, rendered by the frontend).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub slug: Slug,
    pub content: String,
    pub template: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An admin-configurable content block rendered on public pages.
///
/// `settings` is a free-form JSON object; [`Widget::settings_with_defaults`]
/// merges the per-kind defaults under it before the public API serves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Widget {
    pub id: WidgetId,
    pub kind: WidgetKind,
    pub title: String,
    pub settings: JsonValue,
    pub position: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Widget {
    /// The stored settings merged over the defaults for this widget's kind.
    ///
    /// Stored keys win; defaults only fill gaps. Non-object stored settings
    /// (legacy rows) are replaced wholesale by the defaults.
    #[must_use]
    pub fn settings_with_defaults(&self) -> JsonValue {
        let mut merged = default_settings(self.kind);
        if let (Some(base), Some(stored)) = (merged.as_object_mut(), self.settings.as_object()) {
            for (key, value) in stored {
                base.insert(key.clone(), value.clone());
            }
        }
        merged
    }
}

/// Per-kind default settings.
fn default_settings(kind: WidgetKind) -> JsonValue {
    match kind {
        WidgetKind::Hero => json!({
            "headline": "",
            "subheadline": "",
            "image_url": "",
            "cta_label": "Shop now",
            "cta_href": "/products",
        }),
        WidgetKind::ProductGrid => json!({
            "heading": "",
            "limit": 8,
            "premium_only": false,
        }),
        WidgetKind::RichText => json!({ "html": "" }),
        WidgetKind::Testimonial => json!({
            "quote": "",
            "author": "",
        }),
        WidgetKind::PdfViewer => json!({
            "pdf_url": "",
            "title": "",
        }),
        WidgetKind::Newsletter => json!({
            "heading": "Stay in the loop",
            "blurb": "",
        }),
    }
}

/// A carousel configuration for public pages.
///
/// `slides` is a JSON array of `{image_url, caption, href}` objects, edited
/// as a unit in the back-office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Slider {
    pub id: SliderId,
    pub title: String,
    pub slides: JsonValue,
    pub position: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn widget(kind: WidgetKind, settings: JsonValue) -> Widget {
        Widget {
            id: WidgetId::new(1),
            kind,
            title: "test".to_owned(),
            settings,
            position: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_settings_defaults_fill_gaps() {
        let w = widget(WidgetKind::ProductGrid, json!({ "heading": "Bestsellers" }));
        let merged = w.settings_with_defaults();
        assert_eq!(merged.get("heading").unwrap(), "Bestsellers");
        assert_eq!(merged.get("limit").unwrap(), 8);
        assert_eq!(merged.get("premium_only").unwrap(), false);
    }

    #[test]
    fn test_settings_stored_keys_win() {
        let w = widget(WidgetKind::ProductGrid, json!({ "limit": 4 }));
        assert_eq!(w.settings_with_defaults().get("limit").unwrap(), 4);
    }

    #[test]
    fn test_settings_extra_keys_survive() {
        let w = widget(WidgetKind::Hero, json!({ "custom_badge": "New" }));
        let merged = w.settings_with_defaults();
        assert_eq!(merged.get("custom_badge").unwrap(), "New");
        assert_eq!(merged.get("cta_label").unwrap(), "Shop now");
    }

    #[test]
    fn test_settings_non_object_replaced() {
        let w = widget(WidgetKind::RichText, json!("not an object"));
        assert_eq!(w.settings_with_defaults(), json!({ "html": "" }));
    }
}
