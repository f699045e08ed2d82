//! Motorcycle catalog data model, label normalization, value coercion and
//! JSON output.
//!
//! This crate has no spreadsheet dependency. `moto-import` feeds it raw
//! labels and cells; consumers of the generated JSON can use [`Moto`] to read
//! it back.

pub mod coerce;
pub mod fields;
pub mod identity;
pub mod image;
pub mod json;
pub mod normalize;
pub mod types;

pub use coerce::{CoercionRules, coerce};
pub use fields::CoreField;
pub use identity::make_id;
pub use json::{JsonError, OutputSummary, load_catalog, partition_by_brand, write_output};
pub use normalize::{normalize_key, slugify};
pub use types::*;
