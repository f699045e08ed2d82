//! Spreadsheet-to-catalog ingestion.
//!
//! This crate owns the ETL side: loading workbooks, detecting each sheet's
//! layout, extracting record candidates, and merging them into one catalog
//! keyed by record ID.

pub mod cell;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod pivot;
pub mod progress;
pub mod record;
pub mod shape;
pub mod tabular;
pub mod workbook;

pub use cell::RawCell;
pub use error::ImportError;
pub use merge::{CatalogAssembler, Disagreement, MergeOutcome, MergeReport, merge, merge_into};
pub use pipeline::{IngestConfig, IngestReport, ingest};
pub use pivot::extract_pivot;
pub use progress::{ImportProgress, SilentProgress};
pub use record::{ExtractOptions, RawRecord, SheetContext, SheetExtraction};
pub use shape::{SheetShape, detect_shape};
pub use tabular::extract_tabular;
pub use workbook::{
    DirectoryImport, ImportStats, SheetGrid, SheetImport, discover_workbooks, extract_sheet,
    import_directory, import_workbook, read_workbook,
};
