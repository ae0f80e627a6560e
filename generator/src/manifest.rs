use anyhow::{bail, Context, Result};
use docsite_core::LanguageCode;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct RawManifestEntry {
    url: String,
    slug: String,
    en: String,
    zh_tw: String,
    #[serde(default)]
    assets_downloaded: Vec<String>,
}

/// One manifest entry with source paths resolved against the manifest's
/// directory.
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    pub source_url: String,
    pub slug: String,
    pub en_path: PathBuf,
    pub zh_tw_path: PathBuf,
    pub assets_downloaded: Vec<PathBuf>,
}

impl ManifestEntry {
    pub fn path_for(&self, lang: LanguageCode) -> &Path {
        match lang {
            LanguageCode::En => &self.en_path,
            LanguageCode::ZhTw => &self.zh_tw_path,
        }
    }
}

pub fn load_manifest(path: &Path) -> Result<Vec<ManifestEntry>> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let root = path.parent().unwrap_or(Path::new("."));
    parse_manifest(&raw, root).with_context(|| format!("loading {}", path.display()))
}

pub fn parse_manifest(raw: &str, root: &Path) -> Result<Vec<ManifestEntry>> {
    let entries: Vec<RawManifestEntry> = serde_json::from_str(raw)?;
    let mut slugs = HashSet::new();
    let mut out = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        if entry.url.is_empty()
            || entry.slug.is_empty()
            || entry.en.is_empty()
            || entry.zh_tw.is_empty()
        {
            bail!("manifest entry {idx} is missing required keys");
        }
        if !slugs.insert(entry.slug.clone()) {
            bail!("duplicate slug in manifest: {}", entry.slug);
        }
        out.push(ManifestEntry {
            source_url: entry.url,
            slug: entry.slug,
            en_path: root.join(&entry.en),
            zh_tw_path: root.join(&entry.zh_tw),
            assets_downloaded: entry
                .assets_downloaded
                .iter()
                .map(|a| root.join(a))
                .collect(),
        });
    }
    Ok(out)
}

/// Existence checks before a build: a missing markdown source is fatal, a
/// missing pre-downloaded asset only warrants a warning.
pub fn validate_inputs(
    entries: &[ManifestEntry],
    langs: &[LanguageCode],
) -> Result<Vec<String>> {
    let mut warnings = Vec::new();
    for entry in entries {
        for &lang in langs {
            let path = entry.path_for(lang);
            if !path.is_file() {
                bail!("missing markdown file: {}", path.display());
            }
        }
        for asset in &entry.assets_downloaded {
            if !asset.exists() {
                warnings.push(format!("missing manifest asset file: {}", asset.display()));
            }
        }
    }
    Ok(warnings)
}
