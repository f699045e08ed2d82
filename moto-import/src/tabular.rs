//! Row-per-record extraction.

use moto_catalog::normalize_key;

use crate::cell::{EMPTY_CELL, RawCell};
use crate::record::{ExtractOptions, RawRecord, SheetContext, SheetExtraction};

/// Extract records from a tabular sheet: row 0 holds the headers, every
/// following row is one record candidate.
///
/// Rows without brand or model (trailing blank rows, notes, totals) are
/// dropped and counted in [`SheetExtraction::skipped`]. Rows shorter than the
/// header read their missing cells as empty.
pub fn extract_tabular(
    rows: &[Vec<RawCell>],
    ctx: &SheetContext,
    opts: &ExtractOptions,
) -> SheetExtraction {
    let mut result = SheetExtraction::default();
    let Some((header, body)) = rows.split_first() else {
        return result;
    };

    let keys: Vec<String> = header
        .iter()
        .map(|cell| {
            cell.display_text()
                .map(|label| normalize_key(&label))
                .unwrap_or_default()
        })
        .collect();

    for row in body {
        if row.iter().all(RawCell::is_empty) {
            result.skipped += 1;
            continue;
        }

        let mut raw = RawRecord::default();
        for (col, key) in keys.iter().enumerate() {
            if key.is_empty() {
                continue;
            }
            let cell = row.get(col).unwrap_or(&EMPTY_CELL);
            raw.absorb(key, cell, opts);
        }

        match raw.into_moto(ctx, &opts.created_at) {
            Some(moto) => result.records.push(moto),
            None => result.skipped += 1,
        }
    }

    if result.skipped > 0 {
        log::debug!(
            "{} / {}: skipped {} row(s) without brand and model",
            ctx.source_file,
            ctx.sheet,
            result.skipped
        );
    }

    result
}
