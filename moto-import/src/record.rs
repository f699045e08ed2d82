//! Record candidates and the single validation step that turns them into
//! catalog entries.

use moto_catalog::coerce::{CoercionRules, parse_number};
use moto_catalog::fields::{CoreField, is_reserved_key};
use moto_catalog::image::{DEFAULT_IMAGE_BASE, normalize_image_url};
use moto_catalog::{Moto, SpecValue, Specs, make_id, slugify};

use crate::cell::RawCell;

/// Years outside this range are treated as noise, not a model year.
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1885..=2100;

/// Settings shared by both extractors for one run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Value coercion vocabulary.
    pub rules: CoercionRules,
    /// Directory prefix for bare image filenames.
    pub image_base: String,
    /// Run timestamp stamped on every newly created record.
    pub created_at: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            rules: CoercionRules::default(),
            image_base: DEFAULT_IMAGE_BASE.to_string(),
            created_at: String::new(),
        }
    }
}

impl ExtractOptions {
    pub fn new(created_at: impl Into<String>) -> Self {
        Self {
            created_at: created_at.into(),
            ..Self::default()
        }
    }
}

/// Provenance of the sheet being extracted.
#[derive(Debug, Clone, Default)]
pub struct SheetContext {
    /// Workbook file name (without directory).
    pub source_file: String,
    pub sheet: String,
}

impl SheetContext {
    pub fn new(source_file: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            sheet: sheet.into(),
        }
    }
}

/// Records extracted from one worksheet.
#[derive(Debug, Clone, Default)]
pub struct SheetExtraction {
    pub records: Vec<Moto>,
    /// Candidate rows/columns dropped for lacking brand or model.
    pub skipped: usize,
}

/// A record candidate assembled from one row (tabular) or one column (pivot).
///
/// Nothing here is trusted yet; [`RawRecord::into_moto`] validates it.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub specs: Specs,
}

impl RawRecord {
    /// Route a normalized key and its cell: core aliases fill their field,
    /// other reserved keys are dropped, everything else becomes a spec.
    pub fn absorb(&mut self, key: &str, cell: &RawCell, opts: &ExtractOptions) {
        if key.is_empty() {
            return;
        }
        if let Some(field) = CoreField::from_key(key) {
            self.set_core(field, cell, opts);
            return;
        }
        if is_reserved_key(key) {
            log::debug!("Dropping reserved key '{}'", key);
            return;
        }
        let value = cell.coerce(key, &opts.rules);
        self.set_spec(key.to_string(), value);
    }

    /// Fill a core field from a cell if it is still unset.
    ///
    /// Returns `true` if the field was set by this call.
    pub fn set_core(&mut self, field: CoreField, cell: &RawCell, opts: &ExtractOptions) -> bool {
        match field {
            CoreField::Brand => fill(&mut self.brand, cell.display_text()),
            CoreField::Model => fill(&mut self.model, cell.display_text()),
            CoreField::Category => fill(&mut self.category, cell.display_text()),
            CoreField::Image => fill(
                &mut self.image,
                cell.display_text()
                    .and_then(|t| normalize_image_url(&t, &opts.image_base)),
            ),
            CoreField::Year => fill(&mut self.year, cell_year(cell)),
            CoreField::Price => fill(&mut self.price, cell_number(cell)),
        }
    }

    /// Insert a spec; an existing non-null value for the same key wins.
    pub fn set_spec(&mut self, key: String, value: SpecValue) {
        match self.specs.get_mut(&key) {
            Some(existing) if existing.is_null() => *existing = value,
            Some(_) => {}
            None => {
                self.specs.insert(key, value);
            }
        }
    }

    /// Validate into a [`Moto`].
    ///
    /// Returns `None` when brand or model is missing, or when either has no
    /// characters a slug can keep (`ヤマハ`), since such a record would have
    /// no usable identity or shard file.
    pub fn into_moto(self, ctx: &SheetContext, created_at: &str) -> Option<Moto> {
        let brand = self.brand?.trim().to_string();
        let model = self.model?.trim().to_string();
        if brand.is_empty() || model.is_empty() {
            return None;
        }

        let brand_slug = slugify(&brand);
        let model_slug = slugify(&model);
        if brand_slug.is_empty() || model_slug.is_empty() {
            log::debug!(
                "{} / {}: '{} {}' has no sluggable brand or model",
                ctx.source_file,
                ctx.sheet,
                brand,
                model
            );
            return None;
        }

        Some(Moto {
            id: make_id(&brand, &model, self.year),
            brand_slug,
            model_slug,
            brand,
            model,
            year: self.year,
            price: self.price,
            category: self.category,
            image_url: self.image,
            specs: self.specs,
            source_file: ctx.source_file.clone(),
            sheet: ctx.sheet.clone(),
            created_at: created_at.to_string(),
        })
    }
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    if slot.is_none() && value.is_some() {
        *slot = value;
        true
    } else {
        false
    }
}

fn cell_number(cell: &RawCell) -> Option<f64> {
    match cell {
        RawCell::Int(i) => Some(*i as f64),
        RawCell::Float(f) => Some(*f),
        RawCell::Text(s) => parse_number(s),
        RawCell::Empty | RawCell::Bool(_) => None,
    }
}

fn cell_year(cell: &RawCell) -> Option<i32> {
    let n = cell_number(cell)?;
    if n.fract() != 0.0 {
        return None;
    }
    let year = n as i32;
    YEAR_RANGE.contains(&year).then_some(year)
}
