//! The full batch run: read a directory of workbooks, write the catalog.

use std::path::PathBuf;

use moto_catalog::json::{DEFAULT_BASE_NAME, OutputSummary, write_output};

use crate::error::ImportError;
use crate::progress::ImportProgress;
use crate::record::ExtractOptions;
use crate::workbook::{DirectoryImport, import_directory};

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Base output file name: `<base>.json` and `<base>-<brand>.json`.
    pub base_name: String,
    pub options: ExtractOptions,
}

impl IngestConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            base_name: DEFAULT_BASE_NAME.to_string(),
            options: ExtractOptions::default(),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct IngestReport {
    pub import: DirectoryImport,
    pub output: OutputSummary,
}

impl IngestReport {
    pub fn record_count(&self) -> usize {
        self.import.motos.len()
    }
}

/// Rebuild the whole catalog from `config.input_dir` into `config.output_dir`.
///
/// Per-file failures are absorbed by the import; directory and output
/// failures are returned.
pub fn ingest(
    config: &IngestConfig,
    progress: Option<&dyn ImportProgress>,
) -> Result<IngestReport, ImportError> {
    let import = import_directory(&config.input_dir, &config.options, progress)?;
    let output = write_output(&config.output_dir, &config.base_name, &import.motos)?;

    log::debug!(
        "Wrote {} and {} brand shard(s)",
        output.catalog_path.display(),
        output.shards.len()
    );
    for path in &output.removed {
        log::info!("Removed stale shard {}", path.display());
    }

    Ok(IngestReport { import, output })
}
