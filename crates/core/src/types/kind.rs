//! Widget and media kind enums.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Kind of an admin-configurable content block rendered on public pages.
///
/// The `settings` map of a widget is free-form; the kind tells the frontend
/// which renderer (and which setting defaults) apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Large hero banner with headline, image, and call-to-action.
    Hero,
    /// Grid of featured products.
    ProductGrid,
    /// Free-form rich-text block.
    RichText,
    /// Customer testimonial / quote block.
    Testimonial,
    /// Embedded PDF catalog viewer.
    PdfViewer,
    /// Newsletter signup block.
    Newsletter,
}

impl WidgetKind {
    /// Canonical text form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::ProductGrid => "product_grid",
            Self::RichText => "rich_text",
            Self::Testimonial => "testimonial",
            Self::PdfViewer => "pdf_viewer",
            Self::Newsletter => "newsletter",
        }
    }

    /// Parse from the stored text form.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "hero" => Some(Self::Hero),
            "product_grid" => Some(Self::ProductGrid),
            "rich_text" => Some(Self::RichText),
            "testimonial" => Some(Self::Testimonial),
            "pdf_viewer" => Some(Self::PdfViewer),
            "newsletter" => Some(Self::Newsletter),
            _ => None,
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad category of a stored media blob, derived from its content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Pdf,
    Video,
}

impl MediaKind {
    /// Classify a MIME content type, returning `None` for disallowed types.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "image/jpeg" | "image/png" | "image/webp" | "image/gif" | "image/svg+xml" => {
                Some(Self::Image)
            }
            "application/pdf" => Some(Self::Pdf),
            "video/mp4" => Some(Self::Video),
            _ => None,
        }
    }

    /// Canonical text form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "pdf",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! text_sqlx_impls {
    ($ty:ident) => {
        #[cfg(feature = "postgres")]
        impl sqlx::Type<sqlx::Postgres> for $ty {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $ty {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Self::from_str_opt(&s)
                    .ok_or_else(|| format!(concat!("unknown ", stringify!($ty), ": {}"), s).into())
            }
        }

        #[cfg(feature = "postgres")]
        impl sqlx::Encode<'_, sqlx::Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

impl MediaKind {
    /// Parse from the stored text form.
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "image" => Some(Self::Image),
            "pdf" => Some(Self::Pdf),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

text_sqlx_impls!(WidgetKind);
text_sqlx_impls!(MediaKind);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_kind_roundtrip() {
        for kind in [
            WidgetKind::Hero,
            WidgetKind::ProductGrid,
            WidgetKind::RichText,
            WidgetKind::Testimonial,
            WidgetKind::PdfViewer,
            WidgetKind::Newsletter,
        ] {
            assert_eq!(WidgetKind::from_str_opt(kind.as_str()), Some(kind));
        }
        assert_eq!(WidgetKind::from_str_opt("carousel"), None);
    }

    #[test]
    fn test_media_kind_from_content_type() {
        assert_eq!(MediaKind::from_content_type("image/png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_content_type("application/pdf"), Some(MediaKind::Pdf));
        assert_eq!(MediaKind::from_content_type("video/mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_content_type("application/zip"), None);
        assert_eq!(MediaKind::from_content_type("text/html"), None);
    }
}
