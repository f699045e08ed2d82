//! Data model types for the motorcycle catalog.
//!
//! These types are the canonical output schema: one [`Moto`] per
//! brand + model (+ year), each carrying an open map of normalized specs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

// ── Spec values ─────────────────────────────────────────────────────────────

/// A coerced spreadsheet value.
///
/// `Null` means the column was present but the cell was empty, which is
/// distinct from the key being absent from [`Specs`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SpecValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for SpecValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serialize_number(*n, serializer),
            Self::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Largest integer an f64 holds exactly (2^53).
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Write integral numbers as JSON integers (`34990`, not `34990.0`).
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(n as i64)
    } else {
        serializer.serialize_f64(n)
    }
}

fn serialize_price<S: Serializer>(price: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match price {
        Some(n) => serialize_number(*n, serializer),
        None => serializer.serialize_none(),
    }
}

/// Normalized key → coerced value. Sorted so output is byte-stable.
pub type Specs = BTreeMap<String, SpecValue>;

// ── Moto ────────────────────────────────────────────────────────────────────

/// One catalog entry: a specific brand + model (+ year) motorcycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moto {
    /// `brandSlug-modelSlug[-year]`, see [`crate::identity::make_id`].
    pub id: String,
    pub brand: String,
    pub model: String,
    pub brand_slug: String,
    pub model_slug: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, serialize_with = "serialize_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub specs: Specs,
    pub source_file: String,
    pub sheet: String,
    /// RFC 3339 timestamp of first creation; never touched by merges.
    pub created_at: String,
}

impl Moto {
    /// Number of populated spec entries (non-null).
    pub fn filled_specs(&self) -> usize {
        self.specs.values().filter(|v| !v.is_null()).count()
    }
}
