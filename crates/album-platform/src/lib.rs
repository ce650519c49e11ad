//! Storage bindings for the platforms the album plugin runs on.
//!
//! # Supported Platforms
//!
//! - **Android**: MediaStore on API 29+, public directories plus a media
//!   scanner broadcast below that. All calls go through JNI.
//! - **Desktop**: plain directories below the user's picture folder.
//!
//! # Usage
//!
//! ```ignore
//! use album_platform::{StorageHost, platform_store};
//!
//! let host = StorageHost::attach(Some(pictures_dir))?;
//! let store = platform_store(&config, &host)?;
//! let writer = AlbumWriter::new(store.into());
//! ```

use std::path::PathBuf;

use album_core::{AlbumConfig, AlbumResult, BoxedStore, StorageMode};

#[cfg(target_os = "android")]
pub mod android;

pub mod desktop;

/// Handles the stores need to reach platform storage.
///
/// Built once when the plugin starts and dropped when it stops.
#[derive(Debug)]
pub struct StorageHost {
    #[cfg(target_os = "android")]
    pub context: std::sync::Arc<android::AndroidContext>,

    /// Root used by legacy storage when neither the config nor the platform
    /// names one.
    pub fallback_root: Option<PathBuf>,
}

impl StorageHost {
    #[cfg(target_os = "android")]
    pub fn attach(fallback_root: Option<PathBuf>) -> AlbumResult<Self> {
        Ok(Self {
            context: std::sync::Arc::new(android::AndroidContext::from_ndk()?),
            fallback_root,
        })
    }

    #[cfg(not(target_os = "android"))]
    pub fn attach(fallback_root: Option<PathBuf>) -> AlbumResult<Self> {
        Ok(Self { fallback_root })
    }

    /// Storage mode the platform supports natively, if it has a content index.
    #[cfg(target_os = "android")]
    pub fn detected_mode(&self) -> AlbumResult<Option<StorageMode>> {
        let level = self.context.sdk_int()?;
        tracing::debug!(api_level = level, "detected Android API level");
        Ok(Some(StorageMode::for_api_level(level)))
    }

    #[cfg(not(target_os = "android"))]
    pub fn detected_mode(&self) -> AlbumResult<Option<StorageMode>> {
        Ok(None)
    }
}

/// Builds the storage strategy for the current platform.
///
/// Called once at plugin setup. The mode never changes afterwards.
#[cfg(target_os = "android")]
pub fn platform_store(config: &AlbumConfig, host: &StorageHost) -> AlbumResult<BoxedStore> {
    let mode = config.storage_mode.resolve(host.detected_mode()?);
    tracing::info!(platform = std::env::consts::OS, %mode, "album storage selected");
    android::android_store(mode, config, host)
}

#[cfg(not(target_os = "android"))]
pub fn platform_store(config: &AlbumConfig, host: &StorageHost) -> AlbumResult<BoxedStore> {
    let mode = config.storage_mode.resolve(host.detected_mode()?);
    tracing::info!(platform = std::env::consts::OS, %mode, "album storage selected");
    Ok(Box::new(desktop::desktop_store(config, host.fallback_root.clone())?))
}
