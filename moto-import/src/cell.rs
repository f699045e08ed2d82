//! Raw spreadsheet cells.
//!
//! Everything the extractors see is a [`RawCell`]; calamine's cell type is
//! converted at the workbook boundary and never travels further.

use calamine::Data;
use chrono::{NaiveDateTime, NaiveTime};
use moto_catalog::SpecValue;
use moto_catalog::coerce::CoercionRules;

/// An untyped spreadsheet cell as read from a worksheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawCell {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// Shared empty cell for short rows.
pub(crate) static EMPTY_CELL: RawCell = RawCell::Empty;

impl RawCell {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Empty cells and whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The cell as trimmed display text, or `None` when empty.
    ///
    /// Integral floats print without a fractional part so a model named `690`
    /// stored as a number reads back as `"690"`.
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some((*f as i64).to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
        }
    }

    /// Coerce the cell under a normalized key.
    ///
    /// Typed numeric and boolean cells keep their type whatever the key says;
    /// only text runs through the heuristic chain in [`CoercionRules`].
    pub fn coerce(&self, key: &str, rules: &CoercionRules) -> SpecValue {
        match self {
            Self::Empty => SpecValue::Null,
            Self::Text(s) => rules.coerce_text(key, s),
            Self::Int(i) => SpecValue::Number(*i as f64),
            Self::Float(f) => SpecValue::Number(*f),
            Self::Bool(b) => SpecValue::Bool(*b),
        }
    }
}

impl From<&Data> for RawCell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) => Self::Text(s.clone()),
            Data::Int(i) => Self::Int(*i),
            Data::Float(f) => Self::Float(*f),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(dt) => Self::Text(format_datetime(dt)),
                None => Self::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Self::Text(s.clone()),
        }
    }
}

/// Dates at midnight print as `YYYY-MM-DD`, anything else as full ISO 8601.
fn format_datetime(dt: NaiveDateTime) -> String {
    if dt.time() == NaiveTime::MIN {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

/// Convert one worksheet row.
pub fn convert_row(row: &[Data]) -> Vec<RawCell> {
    row.iter().map(RawCell::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text_integral_float() {
        assert_eq!(RawCell::Float(690.0).display_text().as_deref(), Some("690"));
        assert_eq!(RawCell::Float(12.5).display_text().as_deref(), Some("12.5"));
        assert_eq!(RawCell::text("  ").display_text(), None);
    }

    #[test]
    fn test_typed_cells_bypass_text_rules() {
        let rules = CoercionRules::default();
        assert_eq!(RawCell::Int(1).coerce("abs", &rules), SpecValue::Number(1.0));
        assert_eq!(RawCell::text("1").coerce("abs", &rules), SpecValue::Bool(true));
        assert_eq!(RawCell::Bool(false).coerce("prix", &rules), SpecValue::Bool(false));
    }

    #[test]
    fn test_from_calamine_data() {
        assert_eq!(RawCell::from(&Data::String("MT-07".into())), RawCell::text("MT-07"));
        assert_eq!(RawCell::from(&Data::Empty), RawCell::Empty);
        assert_eq!(RawCell::from(&Data::Float(34990.0)), RawCell::Float(34990.0));
    }
}
