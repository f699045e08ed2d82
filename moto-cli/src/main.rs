//! moto-ingest CLI
//!
//! Rebuilds the motorcycle catalog JSON files from a directory of Excel
//! workbooks.

mod cli_types;
mod error;
mod settings;

use std::io::Write;
use std::path::Path;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use moto_import::{ImportProgress, ImportStats, SheetShape, ingest};

use crate::cli_types::Cli;
use crate::error::CliError;
use crate::settings::resolve_config;

fn main() {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Set up `env_logger`.
///
/// Normal runs print bare messages at info level. `--verbose` adds
/// timestamps, the level and debug output; `--quiet` keeps warnings and
/// errors only. `RUST_LOG` overrides both.
fn init_logger(quiet: bool, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if !verbose {
        builder.format(|buf, record| match record.level() {
            log::Level::Error => writeln!(
                buf,
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                record.args()
            ),
            log::Level::Warn => writeln!(
                buf,
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                record.args()
            ),
            _ => writeln!(buf, "{}", record.args()),
        });
    }
    builder.parse_default_env();
    builder.init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = resolve_config(cli)?;
    log::debug!(
        "Input: {}, output: {}, base name: {}",
        config.input_dir.display(),
        config.output_dir.display(),
        config.base_name
    );

    let report = ingest(&config, Some(&CliProgress))?;

    for (brand, path, count) in &report.output.shards {
        log::info!(
            "  {} {} ({} moto(s)) -> {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            brand,
            count,
            path.display()
        );
    }
    if report.import.stats.disagreements > 0 {
        log::warn!(
            "{} conflicting value(s) ignored; run with --verbose for details",
            report.import.stats.disagreements
        );
    }

    println!("Generated {} motos.", report.record_count());
    Ok(())
}

/// Progress reporter printing one line per workbook and sheet.
struct CliProgress;

impl ImportProgress for CliProgress {
    fn on_file(&self, current: usize, total: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::info!(
            "[{}/{}] {}",
            current,
            total,
            name.if_supports_color(Stdout, |t| t.bold())
        );
    }

    fn on_sheet(
        &self,
        _file: &str,
        sheet: &str,
        shape: SheetShape,
        records: usize,
        skipped: usize,
    ) {
        let mark = if records > 0 {
            format!("{}", "\u{2714}".if_supports_color(Stdout, |t| t.green()))
        } else {
            format!("{}", "-".if_supports_color(Stdout, |t| t.dimmed()))
        };
        let skipped = if skipped > 0 {
            format!(", {} skipped", skipped)
        } else {
            String::new()
        };
        log::info!(
            "  {} {} ({}): {} record(s){}",
            mark,
            sheet,
            shape,
            records,
            skipped
        );
    }

    fn on_complete(&self, stats: &ImportStats) {
        log::info!(
            "{} workbook(s) read, {} failed; {} tabular and {} pivot sheet(s)",
            stats.files_imported,
            stats.files_failed,
            stats.sheets_tabular,
            stats.sheets_pivot
        );
        log::info!(
            "{} record(s) extracted: {} new, {} merged ({} field(s) filled)",
            stats.records_extracted,
            stats.records_created,
            stats.records_merged,
            stats.fields_filled
        );
        if stats.files_failed > 0 || stats.sheets_failed > 0 {
            log::warn!(
                "{} workbook(s) and {} sheet(s) could not be read",
                stats.files_failed,
                stats.sheets_failed
            );
        }
    }
}
