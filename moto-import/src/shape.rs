//! Worksheet layout detection.

use std::fmt;

use moto_catalog::normalize_key;

use crate::cell::RawCell;

/// Minimum column count of a pivot sheet: two label columns plus at least
/// two model columns.
pub const PIVOT_MIN_COLUMNS: usize = 4;

/// How a worksheet lays out its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetShape {
    /// One row per record, one column per field.
    Tabular,
    /// One row per attribute (`category`, `subcategory`), one column per record.
    Pivot,
}

impl SheetShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tabular => "tabular",
            Self::Pivot => "pivot",
        }
    }
}

impl fmt::Display for SheetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a sheet from its first row.
///
/// A sheet is a pivot iff it has at least [`PIVOT_MIN_COLUMNS`] columns, its
/// first header normalizes to `categorie` and its second header contains
/// `sous`. Everything else is tabular.
pub fn detect_shape(first_row: &[RawCell]) -> SheetShape {
    if first_row.len() < PIVOT_MIN_COLUMNS {
        return SheetShape::Tabular;
    }

    let header = |i: usize| {
        first_row[i]
            .display_text()
            .map(|t| normalize_key(&t))
            .unwrap_or_default()
    };

    if header(0) == "categorie" && header(1).contains("sous") {
        SheetShape::Pivot
    } else {
        SheetShape::Tabular
    }
}
