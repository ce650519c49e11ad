//! Desktop storage: albums are plain directories.
//!
//! Desktop galleries watch the filesystem, so the scanner only logs.

use std::path::PathBuf;

use album_core::store::require_root;
use album_core::{AlbumConfig, AlbumResult, LegacyStore, LogScanner};

/// Picks the legacy root: config override first, then the host fallback.
pub fn resolve_root(configured: Option<PathBuf>, fallback: Option<PathBuf>) -> Option<PathBuf> {
    configured.or(fallback)
}

pub fn desktop_store(
    config: &AlbumConfig,
    fallback_root: Option<PathBuf>,
) -> AlbumResult<LegacyStore<LogScanner>> {
    let root = require_root(resolve_root(config.legacy_root.clone(), fallback_root))?;
    tracing::debug!(root = %root.display(), "desktop album root");
    Ok(LegacyStore::new(root, config.collections(), LogScanner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use album_core::{AlbumStore, MediaClassification};
    use std::fs;

    #[test]
    fn config_root_wins() {
        let root = resolve_root(Some("/a".into()), Some("/b".into()));
        assert_eq!(root, Some(PathBuf::from("/a")));
        assert_eq!(resolve_root(None, Some("/b".into())), Some(PathBuf::from("/b")));
        assert_eq!(resolve_root(None, None), None);
    }

    #[test]
    fn missing_root_is_an_error() {
        let err = desktop_store(&AlbumConfig::default(), None).unwrap_err();
        assert_eq!(err.code(), "102");
    }

    #[test]
    fn saves_below_fallback_root() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a.jpg");
        fs::write(&src, b"jpeg").unwrap();
        let pictures = tmp.path().join("Pictures");

        let store = desktop_store(&AlbumConfig::default(), Some(pictures.clone())).unwrap();
        assert_eq!(store.root(), pictures.as_path());

        let media = MediaClassification::from_path(&src.to_string_lossy());
        store.save("Vacation", &src, "1.jpg", &media).unwrap();
        assert_eq!(fs::read(pictures.join("DCIM/Vacation/1.jpg")).unwrap(), b"jpeg");
    }
}
