use docsite_core::LanguageCode;
use std::path::{Path, PathBuf};

/// Normalize a base URL to `/…/` form.
pub fn normalize_base_url(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    };
    if !out.starts_with('/') {
        out.insert(0, '/');
    }
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Route of a page: `index` maps to the language root, everything else to
/// `<base>/<lang>/<slug>/`.
pub fn slug_to_route(lang: LanguageCode, slug: &str, base_url: &str) -> String {
    let base = normalize_base_url(base_url);
    if slug == "index" {
        format!("{base}{lang}/")
    } else {
        format!("{base}{lang}/{slug}/")
    }
}

pub fn route_to_output_path(lang: LanguageCode, slug: &str, out_dir: &Path) -> PathBuf {
    if slug == "index" {
        out_dir.join(lang.as_str()).join("index.html")
    } else {
        out_dir.join(lang.as_str()).join(slug).join("index.html")
    }
}

pub fn join_url(base_url: &str, rel: &str) -> String {
    format!("{}{}", normalize_base_url(base_url), rel.trim_start_matches('/'))
}
