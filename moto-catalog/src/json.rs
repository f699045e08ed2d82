//! JSON catalog output: the full catalog file plus one shard per brand.
//!
//! Output layout for base name `motos`:
//! ```text
//! output_dir/
//!   motos.json            every record, catalog order
//!   motos-honda.json      records with brandSlug "honda"
//!   motos-yamaha.json
//!   ...
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::types::Moto;

/// Default base file name for catalog output.
pub const DEFAULT_BASE_NAME: &str = "motos";

#[derive(Debug, Error)]
pub enum JsonError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON serialization error for {path}: {source}")]
    Serialize {
        path: String,
        source: serde_json::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Files produced by [`write_output`].
#[derive(Debug, Clone, Default)]
pub struct OutputSummary {
    pub catalog_path: PathBuf,
    /// `(brand_slug, path, record_count)` per shard, in brand-slug order.
    pub shards: Vec<(String, PathBuf, usize)>,
    /// Shards left by an earlier run for brands no longer in the catalog.
    pub removed: Vec<PathBuf>,
}

/// Group records by `brand_slug`, keeping catalog order inside each group.
pub fn partition_by_brand(motos: &[Moto]) -> BTreeMap<&str, Vec<&Moto>> {
    let mut groups: BTreeMap<&str, Vec<&Moto>> = BTreeMap::new();
    for moto in motos {
        groups.entry(moto.brand_slug.as_str()).or_default().push(moto);
    }
    groups
}

/// File name of the shard for one brand: `<base>-<brand_slug>.json`.
pub fn shard_file_name(base_name: &str, brand_slug: &str) -> String {
    format!("{base_name}-{brand_slug}.json")
}

/// Write the full catalog and every per-brand shard into `output_dir`,
/// creating the directory if needed.
///
/// Each run is a full rebuild: `<base>-<slug>.json` files from earlier runs
/// whose brand is gone are deleted once the new shards are in place.
pub fn write_output(
    output_dir: &Path,
    base_name: &str,
    motos: &[Moto],
) -> Result<OutputSummary, JsonError> {
    std::fs::create_dir_all(output_dir).map_err(|e| JsonError::Io {
        path: output_dir.display().to_string(),
        source: e,
    })?;

    let catalog_path = output_dir.join(format!("{base_name}.json"));
    write_json_atomic(&catalog_path, motos)?;

    let mut shards = Vec::new();
    for (brand_slug, group) in partition_by_brand(motos) {
        let path = output_dir.join(shard_file_name(base_name, brand_slug));
        write_json_atomic(&path, &group)?;
        shards.push((brand_slug.to_string(), path, group.len()));
    }

    let removed = remove_stale_shards(output_dir, base_name, &shards)?;

    Ok(OutputSummary {
        catalog_path,
        shards,
        removed,
    })
}

fn remove_stale_shards(
    output_dir: &Path,
    base_name: &str,
    current: &[(String, PathBuf, usize)],
) -> Result<Vec<PathBuf>, JsonError> {
    let io_err = |path: &Path, e| JsonError::Io {
        path: path.display().to_string(),
        source: e,
    };
    let prefix = format!("{base_name}-");

    let mut removed = Vec::new();
    for entry in std::fs::read_dir(output_dir).map_err(|e| io_err(output_dir, e))? {
        let entry = entry.map_err(|e| io_err(output_dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(slug) = name
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_suffix(".json"))
        else {
            continue;
        };
        if !is_slug(slug) || current.iter().any(|(s, _, _)| s == slug) {
            continue;
        }
        let path = entry.path();
        if path.is_file() {
            std::fs::remove_file(&path).map_err(|e| io_err(&path, e))?;
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}

fn is_slug(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Serialize `value` as 2-space pretty JSON and move it into place atomically.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), JsonError> {
    let mut serialized =
        serde_json::to_string_pretty(value).map_err(|e| JsonError::Serialize {
            path: path.display().to_string(),
            source: e,
        })?;
    serialized.push('\n');

    let io_err = |e| JsonError::Io {
        path: path.display().to_string(),
        source: e,
    };
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serialized).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// Load a catalog or shard file.
pub fn load_catalog(path: &Path) -> Result<Vec<Moto>, JsonError> {
    let contents = std::fs::read_to_string(path).map_err(|e| JsonError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| JsonError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}
