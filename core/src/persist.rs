use crate::index::{PageId, SearchIndex, INDEX_VERSION};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Failure to obtain a usable artifact. Kept distinct from an empty result
/// set so callers can tell "search unavailable" apart from "no matches".
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read search index: {0}")]
    Io(#[from] std::io::Error),
    #[error("search index is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported search index version {found} (expected {INDEX_VERSION})")]
    UnsupportedVersion { found: u32 },
    #[error("corrupt search index: {0}")]
    Corrupt(String),
}

/// Write one language's artifact as a flat JSON blob, creating parent
/// directories as needed.
pub fn save_index(path: &Path, index: &SearchIndex) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string(index)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn load_index(path: &Path) -> Result<SearchIndex, IndexError> {
    let raw = fs::read_to_string(path)?;
    load_index_str(&raw)
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Parse and validate an artifact from its JSON text. The version field is
/// probed before the full schema so a future-versioned artifact reports
/// `UnsupportedVersion` rather than a parse failure.
pub fn load_index_str(raw: &str) -> Result<SearchIndex, IndexError> {
    let probe: VersionProbe = serde_json::from_str(raw)?;
    if probe.version != INDEX_VERSION {
        return Err(IndexError::UnsupportedVersion {
            found: probe.version,
        });
    }
    let index: SearchIndex = serde_json::from_str(raw)?;
    validate(&index)?;
    Ok(index)
}

fn validate(index: &SearchIndex) -> Result<(), IndexError> {
    let page_count = index.pages.len() as u64;
    let maps = index
        .inverted_index
        .iter()
        .chain(index.title_tokens.iter());
    for (token, ids) in maps {
        let mut prev: Option<PageId> = None;
        for &id in ids {
            if u64::from(id) >= page_count {
                return Err(IndexError::Corrupt(format!(
                    "token {token:?} references missing page {id}"
                )));
            }
            if prev.map_or(false, |p| p >= id) {
                return Err(IndexError::Corrupt(format!(
                    "token {token:?} posting list is not strictly ascending"
                )));
            }
            prev = Some(id);
        }
    }
    Ok(())
}
