//! Workbook discovery, loading and per-directory ingestion.
//!
//! Files are processed in file-name order and sheets in workbook order so the
//! merge order, and therefore which source wins a conflicting field, is
//! reproducible from run to run.

use std::path::{Path, PathBuf};

use calamine::{Reader, open_workbook_auto};
use moto_catalog::Moto;

use crate::cell::{RawCell, convert_row};
use crate::error::ImportError;
use crate::merge::{CatalogAssembler, Disagreement, MergeOutcome};
use crate::pivot::extract_pivot;
use crate::progress::ImportProgress;
use crate::record::{ExtractOptions, SheetContext, SheetExtraction};
use crate::shape::{SheetShape, detect_shape};
use crate::tabular::extract_tabular;

/// File extensions treated as workbooks (compared case-insensitively).
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Statistics from one directory import.
#[derive(Debug, Default, Clone)]
pub struct ImportStats {
    pub files_found: usize,
    pub files_imported: usize,
    pub files_failed: usize,
    pub sheets_tabular: usize,
    pub sheets_pivot: usize,
    pub sheets_failed: usize,
    pub records_extracted: usize,
    pub records_created: usize,
    pub records_merged: usize,
    pub fields_filled: usize,
    pub candidates_skipped: usize,
    pub disagreements: usize,
}

/// One worksheet loaded into memory.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<RawCell>>,
}

/// Extraction result for one sheet of a workbook.
#[derive(Debug, Clone)]
pub struct SheetImport {
    pub sheet: String,
    pub shape: SheetShape,
    pub extraction: SheetExtraction,
}

/// The assembled catalog of a directory import.
#[derive(Debug, Default)]
pub struct DirectoryImport {
    /// Records in first-insertion order.
    pub motos: Vec<Moto>,
    pub stats: ImportStats,
    pub disagreements: Vec<Disagreement>,
}

/// Find all workbooks directly inside `dir`, sorted by file name.
///
/// Office lock files (`~$Book.xlsx`) are ignored.
pub fn discover_workbooks(dir: &Path) -> Result<Vec<PathBuf>, ImportError> {
    if !dir.is_dir() {
        return Err(ImportError::InputDirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| ImportError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| !e.file_name().to_string_lossy().starts_with("~$"))
        .filter(|e| is_workbook(&e.path()))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    Ok(entries.into_iter().map(|e| e.path()).collect())
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Load every sheet of a workbook into memory.
///
/// A sheet that fails to load is logged and left out; a workbook that fails
/// to open is an error.
pub fn read_workbook(path: &Path) -> Result<(Vec<SheetGrid>, usize), ImportError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ImportError::Workbook {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut sheets = Vec::new();
    let mut failed = 0;
    for name in workbook.sheet_names() {
        match workbook.worksheet_range(&name) {
            Ok(range) => sheets.push(SheetGrid {
                rows: range.rows().map(convert_row).collect(),
                name,
            }),
            Err(e) => {
                log::warn!("Skipping sheet '{}' in {}: {}", name, path.display(), e);
                failed += 1;
            }
        }
    }

    Ok((sheets, failed))
}

/// Detect a sheet's shape and run the matching extractor.
pub fn extract_sheet(
    grid: &SheetGrid,
    source_file: &str,
    opts: &ExtractOptions,
) -> SheetImport {
    let ctx = SheetContext::new(source_file, grid.name.as_str());
    let shape = grid
        .rows
        .first()
        .map(|first| detect_shape(first))
        .unwrap_or(SheetShape::Tabular);

    let extraction = match shape {
        SheetShape::Tabular => extract_tabular(&grid.rows, &ctx, opts),
        SheetShape::Pivot => extract_pivot(&grid.rows, &ctx, opts),
    };

    SheetImport {
        sheet: grid.name.clone(),
        shape,
        extraction,
    }
}

/// Read and extract every sheet of one workbook.
pub fn import_workbook(
    path: &Path,
    opts: &ExtractOptions,
) -> Result<(Vec<SheetImport>, usize), ImportError> {
    let source_file = file_name(path);
    let (sheets, failed) = read_workbook(path)?;
    let imports = sheets
        .iter()
        .map(|grid| extract_sheet(grid, &source_file, opts))
        .collect();
    Ok((imports, failed))
}

/// Ingest every workbook in `dir` into one merged catalog.
///
/// Only a missing or unreadable `dir` is an error. A workbook that fails to
/// open is logged and excluded; the remaining files still contribute.
pub fn import_directory(
    dir: &Path,
    opts: &ExtractOptions,
    progress: Option<&dyn ImportProgress>,
) -> Result<DirectoryImport, ImportError> {
    let paths = discover_workbooks(dir)?;
    let mut stats = ImportStats {
        files_found: paths.len(),
        ..ImportStats::default()
    };
    let mut assembler = CatalogAssembler::new();
    let mut disagreements = Vec::new();

    for (i, path) in paths.iter().enumerate() {
        if let Some(p) = progress {
            p.on_file(i + 1, paths.len(), path);
        }

        let (sheets, failed_sheets) = match import_workbook(path, opts) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Skipping workbook: {}", e);
                stats.files_failed += 1;
                continue;
            }
        };
        stats.files_imported += 1;
        stats.sheets_failed += failed_sheets;

        let source_file = file_name(path);
        for sheet in sheets {
            match sheet.shape {
                SheetShape::Tabular => stats.sheets_tabular += 1,
                SheetShape::Pivot => stats.sheets_pivot += 1,
            }
            let SheetExtraction { records, skipped } = sheet.extraction;
            stats.candidates_skipped += skipped;
            stats.records_extracted += records.len();

            if let Some(p) = progress {
                p.on_sheet(&source_file, &sheet.sheet, sheet.shape, records.len(), skipped);
            }

            for moto in records {
                match assembler.insert(moto) {
                    MergeOutcome::Created => stats.records_created += 1,
                    MergeOutcome::Merged(report) => {
                        stats.records_merged += 1;
                        stats.fields_filled += report.filled.len();
                        for d in &report.disagreements {
                            log::debug!(
                                "{}: '{}' kept {} from {}, ignored {} from {}",
                                d.id,
                                d.field,
                                d.kept,
                                d.kept_source,
                                d.discarded,
                                d.other_source
                            );
                        }
                        stats.disagreements += report.disagreements.len();
                        disagreements.extend(report.disagreements);
                    }
                }
            }
        }
    }

    if let Some(p) = progress {
        p.on_complete(&stats);
    }

    Ok(DirectoryImport {
        motos: assembler.into_motos(),
        stats,
        disagreements,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
