//! Plugin configuration, read from `plugins.album` in the Tauri config.

use std::path::PathBuf;

use serde::Deserialize;

use crate::media::Collections;
use crate::store::StorageMode;

/// Which storage strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StorageModePreference {
    /// Pick from the detected platform capability.
    #[default]
    Auto,
    Indexed,
    Legacy,
}

impl StorageModePreference {
    /// Resolves the preference against what the platform supports.
    ///
    /// `detected` is `None` when the platform has no content index at all,
    /// in which case legacy storage is the only option.
    pub fn resolve(self, detected: Option<StorageMode>) -> StorageMode {
        match (self, detected) {
            (StorageModePreference::Legacy, _) => StorageMode::Legacy,
            (StorageModePreference::Auto, Some(mode)) => mode,
            (StorageModePreference::Indexed, Some(StorageMode::Indexed)) => StorageMode::Indexed,
            (StorageModePreference::Indexed, _) => {
                tracing::warn!("indexed storage requested but unavailable, using legacy storage");
                StorageMode::Legacy
            }
            (StorageModePreference::Auto, None) => StorageMode::Legacy,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlbumConfig {
    pub storage_mode: StorageModePreference,
    /// Overrides the root directory used by legacy storage.
    pub legacy_root: Option<PathBuf>,
    pub image_directory: Option<String>,
    pub video_directory: Option<String>,
}

impl AlbumConfig {
    pub fn collections(&self) -> Collections {
        let defaults = Collections::default();
        Collections {
            image: self.image_directory.clone().unwrap_or(defaults.image),
            video: self.video_directory.clone().unwrap_or(defaults.video),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AlbumConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.storage_mode, StorageModePreference::Auto);
        assert!(config.legacy_root.is_none());
        assert_eq!(config.collections(), Collections::default());
    }

    #[test]
    fn absent_plugin_block_deserializes() {
        // Tauri hands the plugin `null` when `plugins.album` is missing.
        let config: Option<AlbumConfig> = serde_json::from_value(serde_json::Value::Null).unwrap();
        assert!(config.is_none());
        assert_eq!(config.unwrap_or_default().storage_mode, StorageModePreference::Auto);
    }

    #[test]
    fn camel_case_keys() {
        let config: AlbumConfig = serde_json::from_value(serde_json::json!({
            "storageMode": "legacy",
            "legacyRoot": "/storage/emulated/0",
            "imageDirectory": "Pictures",
        }))
        .unwrap();
        assert_eq!(config.storage_mode, StorageModePreference::Legacy);
        assert_eq!(config.legacy_root, Some(PathBuf::from("/storage/emulated/0")));
        let collections = config.collections();
        assert_eq!(collections.image, "Pictures");
        assert_eq!(collections.video, "Movies");
    }

    #[test]
    fn preference_resolution() {
        use StorageModePreference::*;
        assert_eq!(Auto.resolve(Some(StorageMode::Indexed)), StorageMode::Indexed);
        assert_eq!(Auto.resolve(Some(StorageMode::Legacy)), StorageMode::Legacy);
        assert_eq!(Auto.resolve(None), StorageMode::Legacy);
        assert_eq!(Legacy.resolve(Some(StorageMode::Indexed)), StorageMode::Legacy);
        assert_eq!(Indexed.resolve(Some(StorageMode::Indexed)), StorageMode::Indexed);
        assert_eq!(Indexed.resolve(Some(StorageMode::Legacy)), StorageMode::Legacy);
        assert_eq!(Indexed.resolve(None), StorageMode::Legacy);
    }
}
