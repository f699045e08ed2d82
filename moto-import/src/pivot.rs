//! Row-per-attribute extraction.
//!
//! Pivot sheets look like this:
//! ```text
//! Catégorie               | Sous-catégorie | Yamaha MT-07 | Honda CB500F
//! Informations générales  | Marque         | Yamaha       | Honda
//!                         | Modèle         | MT-07        | CB500F
//!                         | Prix (TND)     | 34 990       | 29 500
//! Moteur                  | Cylindrée      | 689 cc       | 471 cc
//!                         | Puissance      | 73,4 ch      | 47 ch
//! ```
//! Columns 0 and 1 label the attribute; each further column is one record.

use moto_catalog::fields::{CoreField, is_general_info};
use moto_catalog::image::looks_like_image;
use moto_catalog::normalize_key;

use crate::cell::{EMPTY_CELL, RawCell};
use crate::record::{ExtractOptions, RawRecord, SheetContext, SheetExtraction};

/// First column holding a record.
const FIRST_RECORD_COLUMN: usize = 2;

/// A resolved attribute row.
#[derive(Debug)]
struct AttributeRow {
    /// `normalize_key(category + " " + subcategory)`
    spec_key: String,
    /// Normalized subcategory, set only inside the general-info block.
    general_key: Option<String>,
}

/// Extract one record per model column of a pivot sheet.
///
/// Inside the general-info block, sub-categories naming a core field
/// (Marque, Modèle, Année, Prix, Segment, Image...) fill that field. Every
/// other attribute becomes a spec keyed by category + subcategory. A blank
/// category cell continues the category above it.
///
/// When no image was tagged explicitly, the first text spec that looks like
/// an image file is promoted to the record's image.
pub fn extract_pivot(
    rows: &[Vec<RawCell>],
    ctx: &SheetContext,
    opts: &ExtractOptions,
) -> SheetExtraction {
    let mut result = SheetExtraction::default();
    let Some((header, body)) = rows.split_first() else {
        return result;
    };

    let attributes = resolve_attributes(body);

    for col in FIRST_RECORD_COLUMN..header.len() {
        let mut raw = RawRecord::default();
        let mut image_candidate: Option<String> = None;

        for (row, attr) in body.iter().zip(&attributes) {
            let Some(attr) = attr else {
                continue;
            };
            let cell = row.get(col).unwrap_or(&EMPTY_CELL);

            if let Some(field) = attr.general_key.as_deref().and_then(CoreField::from_key) {
                raw.set_core(field, cell, opts);
                continue;
            }

            if CoreField::from_key(&attr.spec_key).is_none()
                && image_candidate.is_none()
                && matches!(cell, RawCell::Text(s) if looks_like_image(s))
            {
                image_candidate = Some(attr.spec_key.clone());
            }
            raw.absorb(&attr.spec_key, cell, opts);
        }

        if raw.image.is_none() {
            if let Some(key) = image_candidate {
                promote_image(&mut raw, &key, opts);
            }
        }

        match raw.into_moto(ctx, &opts.created_at) {
            Some(moto) => result.records.push(moto),
            None => {
                let label = header[col].display_text().unwrap_or_default();
                log::debug!(
                    "{} / {}: skipping column {} '{}' without brand and model",
                    ctx.source_file,
                    ctx.sheet,
                    col,
                    label
                );
                result.skipped += 1;
            }
        }
    }

    result
}

/// Resolve the label columns of every body row once, carrying the category
/// forward over blank cells. Rows with no labels at all map to `None`.
fn resolve_attributes(body: &[Vec<RawCell>]) -> Vec<Option<AttributeRow>> {
    let mut current_category = String::new();

    body.iter()
        .map(|row| {
            let category = row.first().and_then(RawCell::display_text);
            let subcategory = row.get(1).and_then(RawCell::display_text);
            if category.is_none() && subcategory.is_none() {
                return None;
            }
            if let Some(category) = category {
                current_category = category;
            }
            let subcategory = subcategory.unwrap_or_default();

            let spec_key = normalize_key(&format!("{current_category} {subcategory}"));
            let general_key = is_general_info(&normalize_key(&current_category))
                .then(|| normalize_key(&subcategory));
            if spec_key.is_empty() {
                return None;
            }

            Some(AttributeRow {
                spec_key,
                general_key,
            })
        })
        .collect()
}

/// Move a spec value into the image field.
fn promote_image(raw: &mut RawRecord, key: &str, opts: &ExtractOptions) {
    let Some(value) = raw.specs.get(key).and_then(|v| v.as_str()).map(str::to_string) else {
        return;
    };
    if raw.set_core(CoreField::Image, &RawCell::Text(value), opts) {
        raw.specs.remove(key);
    }
}
