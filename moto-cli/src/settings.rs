//! Run settings: where to read workbooks, where to write the catalog, and any
//! vocabulary extensions.
//!
//! Each directory is resolved through a priority chain:
//!
//! 1. CLI flag (`--input` / `--output`)
//! 2. Environment variable (`MOTO_INGEST_INPUT` / `MOTO_INGEST_OUTPUT`)
//! 3. `[ingest]` table of `moto-ingest.toml`
//! 4. Built-in default

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use moto_catalog::json::DEFAULT_BASE_NAME;
use moto_import::{ExtractOptions, IngestConfig};
use serde::Deserialize;

use crate::cli_types::Cli;
use crate::error::CliError;

pub(crate) const SETTINGS_FILE: &str = "moto-ingest.toml";
pub(crate) const DEFAULT_INPUT_DIR: &str = "data/excel";
pub(crate) const DEFAULT_OUTPUT_DIR: &str = "data/generated";
pub(crate) const INPUT_ENV: &str = "MOTO_INGEST_INPUT";
pub(crate) const OUTPUT_ENV: &str = "MOTO_INGEST_OUTPUT";

/// Contents of `moto-ingest.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SettingsFile {
    pub ingest: IngestSection,
    pub vocabulary: VocabularySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct IngestSection {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub base_name: Option<String>,
    pub image_base: Option<String>,
}

/// Extra entries appended to the built-in coercion tables.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct VocabularySection {
    pub numeric_hints: Vec<String>,
    pub true_words: Vec<String>,
    pub false_words: Vec<String>,
}

/// Load a settings file.
///
/// A missing file is fine for the implicit default path and an error for an
/// explicitly requested one.
pub(crate) fn load_settings(path: &Path, explicit: bool) -> Result<SettingsFile, CliError> {
    if !path.exists() {
        if explicit {
            return Err(CliError::config(format!(
                "settings file not found: {}",
                path.display()
            )));
        }
        return Ok(SettingsFile::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("cannot read {}: {}", path.display(), e)))?;
    toml::from_str(&contents)
        .map_err(|e| CliError::config(format!("invalid {}: {}", path.display(), e)))
}

/// Pick the first available source for a directory.
pub(crate) fn resolve_dir(
    flag: Option<PathBuf>,
    env: Option<OsString>,
    file: Option<PathBuf>,
    default: &str,
) -> PathBuf {
    if let Some(p) = flag {
        return p;
    }
    if let Some(p) = env.filter(|v| !v.is_empty()) {
        return PathBuf::from(p);
    }
    file.unwrap_or_else(|| PathBuf::from(default))
}

/// Build the run configuration from CLI flags, environment and settings file.
pub(crate) fn resolve_config(cli: &Cli) -> Result<IngestConfig, CliError> {
    let (settings_path, explicit) = match &cli.config {
        Some(p) => (p.clone(), true),
        None => (PathBuf::from(SETTINGS_FILE), false),
    };
    let settings = load_settings(&settings_path, explicit)?;

    Ok(build_config(
        cli,
        settings,
        std::env::var_os(INPUT_ENV),
        std::env::var_os(OUTPUT_ENV),
    ))
}

fn build_config(
    cli: &Cli,
    settings: SettingsFile,
    input_env: Option<OsString>,
    output_env: Option<OsString>,
) -> IngestConfig {
    let SettingsFile { ingest, vocabulary } = settings;

    let mut options = ExtractOptions::new(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    options.rules.extend(
        &vocabulary.numeric_hints,
        &vocabulary.true_words,
        &vocabulary.false_words,
    );
    if let Some(base) = ingest.image_base {
        options.image_base = base;
    }

    IngestConfig {
        input_dir: resolve_dir(
            cli.input.clone(),
            input_env,
            ingest.input_dir,
            DEFAULT_INPUT_DIR,
        ),
        output_dir: resolve_dir(
            cli.output.clone(),
            output_env,
            ingest.output_dir,
            DEFAULT_OUTPUT_DIR,
        ),
        base_name: cli
            .base_name
            .clone()
            .or(ingest.base_name)
            .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string()),
        options,
    }
}
