//! Import progress reporting.

use std::path::Path;

use crate::shape::SheetShape;
use crate::workbook::ImportStats;

/// Trait for receiving import progress updates.
pub trait ImportProgress {
    /// Called before each workbook is opened.
    fn on_file(&self, current: usize, total: usize, path: &Path);

    /// Called after a sheet has been extracted and merged.
    fn on_sheet(&self, file: &str, sheet: &str, shape: SheetShape, records: usize, skipped: usize);

    /// Called once every workbook has been processed.
    fn on_complete(&self, stats: &ImportStats);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_file(&self, _current: usize, _total: usize, _path: &Path) {}
    fn on_sheet(
        &self,
        _file: &str,
        _sheet: &str,
        _shape: SheetShape,
        _records: usize,
        _skipped: usize,
    ) {
    }
    fn on_complete(&self, _stats: &ImportStats) {}
}
