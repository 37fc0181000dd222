//! URL-safe slug type.
//!
//! Slugs identify products, categories, and pages in public URLs. They are
//! derived from human-readable titles and stored alongside the record;
//! uniqueness is enforced by the database, not by this type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty, or empty after normalization.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains characters outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens")]
    InvalidCharacter,
}

/// A URL-safe identifier derived from a human-readable title.
///
/// Canonical form: lowercase ASCII letters, digits, and single hyphens, with
/// no leading or trailing hyphen.
///
/// ## Examples
///
/// ```
/// use verdant_core::Slug;
///
/// let slug = Slug::generate("Fiskars® Pruning Shears — 21\"", &[]);
/// assert_eq!(slug.as_str(), "fiskars-pruning-shears-21");
///
/// // Configured prefixes are trimmed before slugging
/// let slug = Slug::generate("SKU: Jardinière Émaillée", &["sku:"]);
/// assert_eq!(slug.as_str(), "jardiniere-emaillee");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 120;

    /// Parse a `Slug` from a string already in canonical form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, or contains
    /// characters outside `[a-z0-9-]`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        let canonical = s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !canonical || s.starts_with('-') || s.ends_with('-') || s.contains("--") {
            return Err(SlugError::InvalidCharacter);
        }
        Ok(Self(s.to_owned()))
    }

    /// Generate a slug from a human-readable title.
    ///
    /// Normalization:
    /// 1. Trim any of `prefixes` from the start (case-insensitive).
    /// 2. Lowercase and fold Latin diacritics to ASCII.
    /// 3. Replace every run of non-alphanumeric characters with one hyphen.
    /// 4. Trim leading/trailing hyphens and truncate to [`Self::MAX_LENGTH`].
    ///
    /// A title that normalizes to nothing yields the slug `untitled`.
    #[must_use]
    pub fn generate(title: &str, prefixes: &[&str]) -> Self {
        let mut rest = title.trim();
        for prefix in prefixes {
            if rest.len() >= prefix.len()
                && rest
                    .get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
            {
                rest = rest.get(prefix.len()..).unwrap_or("").trim_start();
            }
        }

        let mut out = String::with_capacity(rest.len());
        let mut pending_hyphen = false;
        for c in rest.chars().flat_map(char::to_lowercase) {
            for folded in fold_char(c) {
                if folded.is_ascii_alphanumeric() {
                    if pending_hyphen && !out.is_empty() {
                        out.push('-');
                    }
                    pending_hyphen = false;
                    out.push(folded);
                } else {
                    pending_hyphen = true;
                }
            }
            if out.len() >= Self::MAX_LENGTH {
                break;
            }
        }

        out.truncate(Self::MAX_LENGTH);
        while out.ends_with('-') {
            out.pop();
        }

        if out.is_empty() {
            out.push_str("untitled");
        }

        Self(out)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Fold a single lowercase character to its ASCII approximation.
///
/// Covers the Latin-1 and Latin Extended-A ranges that show up in European
/// plant and product names; callers lowercase first. Anything else passes
/// through unchanged and is dropped later if it is not ASCII-alphanumeric.
fn fold_char(c: char) -> impl Iterator<Item = char> {
    let folded: &str = match c {
        'à' | 'á' | 'â' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ä' | 'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'ğ' | 'ģ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => "i",
        'ľ' | 'ł' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ø' | 'ō' => "o",
        'ö' | 'œ' => "oe",
        'ŕ' | 'ř' => "r",
        'ś' | 'š' | 'ş' => "s",
        'ß' => "ss",
        'ť' | 'ţ' => "t",
        'ù' | 'ú' | 'û' | 'ū' | 'ů' | 'ų' => "u",
        'ü' => "ue",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'þ' => "th",
        _ => {
            return FoldChars::Single(Some(c));
        }
    };
    FoldChars::Str(folded.chars())
}

enum FoldChars {
    Single(Option<char>),
    Str(std::str::Chars<'static>),
}

impl Iterator for FoldChars {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            Self::Single(c) => c.take(),
            Self::Str(chars) => chars.next(),
        }
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_basic() {
        assert_eq!(Slug::generate("Raised Garden Bed", &[]).as_str(), "raised-garden-bed");
    }

    #[test]
    fn test_generate_lowercases() {
        assert_eq!(Slug::generate("TOMATO Seeds", &[]).as_str(), "tomato-seeds");
    }

    #[test]
    fn test_generate_strips_diacritics() {
        assert_eq!(
            Slug::generate("Jardinière Émaillée", &[]).as_str(),
            "jardiniere-emaillee"
        );
        assert_eq!(Slug::generate("Gärtner-Öl für Rosen", &[]).as_str(), "gaertner-oel-fuer-rosen");
    }

    #[test]
    fn test_generate_collapses_separators() {
        assert_eq!(
            Slug::generate("  compost -- &  mulch!! ", &[]).as_str(),
            "compost-mulch"
        );
    }

    #[test]
    fn test_generate_trims_prefixes() {
        assert_eq!(
            Slug::generate("SKU: Watering Can", &["sku:"]).as_str(),
            "watering-can"
        );
        // Prefix match is case-insensitive
        assert_eq!(
            Slug::generate("sku: Watering Can", &["SKU:"]).as_str(),
            "watering-can"
        );
        // Non-matching prefix is left alone
        assert_eq!(
            Slug::generate("Watering Can", &["sku:"]).as_str(),
            "watering-can"
        );
    }

    #[test]
    fn test_generate_empty_falls_back() {
        assert_eq!(Slug::generate("", &[]).as_str(), "untitled");
        assert_eq!(Slug::generate("!!!", &[]).as_str(), "untitled");
    }

    #[test]
    fn test_generate_truncates() {
        let long = "a ".repeat(200);
        let slug = Slug::generate(&long, &[]);
        assert!(slug.as_str().len() <= Slug::MAX_LENGTH);
        assert!(!slug.as_str().ends_with('-'));
    }

    #[test]
    fn test_parse_canonical() {
        assert!(Slug::parse("raised-garden-bed").is_ok());
        assert!(Slug::parse("bed-2024").is_ok());
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
        assert!(matches!(Slug::parse("Raised-Bed"), Err(SlugError::InvalidCharacter)));
        assert!(matches!(Slug::parse("-leading"), Err(SlugError::InvalidCharacter)));
        assert!(matches!(Slug::parse("trailing-"), Err(SlugError::InvalidCharacter)));
        assert!(matches!(Slug::parse("double--hyphen"), Err(SlugError::InvalidCharacter)));
        assert!(matches!(Slug::parse("with space"), Err(SlugError::InvalidCharacter)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(Slug::MAX_LENGTH + 1);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
    }

    #[test]
    fn test_generate_output_parses() {
        let slug = Slug::generate("Fiskars® Pruning Shears — 21\"", &[]);
        assert!(Slug::parse(slug.as_str()).is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::generate("Raised Garden Bed", &[]);
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"raised-garden-bed\"");
        let back: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slug);
    }
}
