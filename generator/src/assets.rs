use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const STYLES_CSS: &str = include_str!("../static/styles.css");
const SEARCH_JS: &str = include_str!("../static/search.js");
const SITE_JS: &str = include_str!("../static/site.js");

/// Remove and recreate a directory.
pub fn empty_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).with_context(|| format!("removing {}", dir.display()))?;
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(())
}

/// Recursively copy `src` into `dest`, preserving the relative layout.
pub fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("creating {}", target.display()))?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)
                .with_context(|| format!("copying {}", entry.path().display()))?;
        }
    }
    Ok(())
}

/// Write the embedded client files into `<out>/_static/`.
pub fn write_static_assets(out_dir: &Path) -> Result<()> {
    let dir = out_dir.join("_static");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("styles.css"), STYLES_CSS)?;
    fs::write(dir.join("search.js"), SEARCH_JS)?;
    fs::write(dir.join("site.js"), SITE_JS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_dir_preserves_nested_layout() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("a.txt"), "a").unwrap();
        fs::write(src.join("nested/b.txt"), "b").unwrap();

        let dest = dir.path().join("dest");
        copy_dir(&src, &dest).unwrap();
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dest.join("nested/b.txt")).unwrap(), "b");
    }

    #[test]
    fn empty_dir_clears_previous_contents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("stale.html"), "old").unwrap();
        empty_dir(&target).unwrap();
        assert!(target.exists());
        assert!(!target.join("stale.html").exists());
    }

    #[test]
    fn static_assets_land_under_static_dir() {
        let dir = tempdir().unwrap();
        write_static_assets(dir.path()).unwrap();
        for name in ["styles.css", "search.js", "site.js"] {
            assert!(dir.path().join("_static").join(name).is_file());
        }
    }
}
