use std::path::PathBuf;

use tauri::plugin::{Builder, TauriPlugin};
use tauri::{Manager, Runtime};

use album_core::{AlbumConfig, AlbumResult, AlbumWriter};
use album_platform::{platform_store, StorageHost};

mod commands;
mod state;

pub use album_core::{BridgeError, MediaKind, SavedMedia, StorageMode};
pub use commands::{create_album, invoke_method, save_album, save_album_detailed};
pub use state::AlbumState;

/// Access to the album writer from Rust code.
pub trait AlbumExt<R: Runtime> {
    fn album(&self) -> &AlbumState;
}

impl<R: Runtime, T: Manager<R>> AlbumExt<R> for T {
    fn album(&self) -> &AlbumState {
        self.state::<AlbumState>().inner()
    }
}

/// Initializes the album plugin.
///
/// `plugins.album` may be missing from the app config, in which case every
/// key takes its default.
pub fn init<R: Runtime>() -> TauriPlugin<R, Option<AlbumConfig>> {
    Builder::<R, Option<AlbumConfig>>::new("album")
        .setup(|app, api| {
            let config = api.config().clone().unwrap_or_default();
            let fallback_root = app
                .path()
                .picture_dir()
                .or_else(|_| app.path().home_dir())
                .ok();

            app.manage(setup_state(&config, fallback_root));
            Ok(())
        })
        .on_drop(|app| {
            if let Some(state) = app.try_state::<AlbumState>() {
                state.clear();
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::create_album,
            commands::save_album,
            commands::save_album_detailed,
            commands::invoke_method,
        ])
        .build()
}

/// Builds the managed state. A storage failure leaves the state unbound so
/// commands report `103` instead of the app failing to start.
fn setup_state(config: &AlbumConfig, fallback_root: Option<PathBuf>) -> AlbumState {
    let state = AlbumState::default();
    match build_writer(config, fallback_root) {
        Ok(writer) => {
            tracing::info!(mode = %writer.mode(), "album plugin initialized");
            state.bind(writer);
        }
        Err(err) => {
            tracing::error!(error = %err, "album storage setup failed");
        }
    }
    state
}

fn build_writer(config: &AlbumConfig, fallback_root: Option<PathBuf>) -> AlbumResult<AlbumWriter> {
    let host = StorageHost::attach(fallback_root)?;
    let store = platform_store(config, &host)?;
    Ok(AlbumWriter::new(store.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use album_core::StorageModePreference;
    use serde_json::{json, Value};

    fn plugin_config(value: Value) -> AlbumConfig {
        serde_json::from_value::<Option<AlbumConfig>>(value)
            .unwrap()
            .unwrap_or_default()
    }

    #[test]
    fn missing_plugin_config_uses_defaults() {
        let config = plugin_config(Value::Null);
        assert_eq!(config.storage_mode, StorageModePreference::Auto);
        assert!(config.legacy_root.is_none());
    }

    #[test]
    #[cfg(not(target_os = "android"))]
    fn setup_without_config_binds_writer() {
        let tmp = tempfile::tempdir().unwrap();
        let state = setup_state(&plugin_config(Value::Null), Some(tmp.path().to_path_buf()));

        let writer = state.writer().unwrap();
        assert_eq!(writer.mode(), StorageMode::Legacy);
        assert!(writer.create_album(Some("Vacation".into())).unwrap());
        assert!(tmp.path().join("DCIM/Vacation").is_dir());
    }

    #[test]
    #[cfg(not(target_os = "android"))]
    fn setup_reads_configured_block() {
        let tmp = tempfile::tempdir().unwrap();
        let config = plugin_config(json!({
            "legacyRoot": tmp.path().join("configured"),
            "imageDirectory": "Pictures",
        }));
        let state = setup_state(&config, None);

        let writer = state.writer().unwrap();
        assert!(writer.create_album(Some("Vacation".into())).unwrap());
        assert!(tmp.path().join("configured/Pictures/Vacation").is_dir());
    }

    #[test]
    #[cfg(not(target_os = "android"))]
    fn failed_setup_leaves_state_unbound() {
        let state = setup_state(&plugin_config(Value::Null), None);
        assert_eq!(state.writer().unwrap_err().code, "103");
    }

    #[test]
    #[cfg(not(target_os = "android"))]
    fn desktop_writer_uses_legacy_storage() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = build_writer(&AlbumConfig::default(), Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(writer.mode(), StorageMode::Legacy);
    }

    #[test]
    #[cfg(not(target_os = "android"))]
    fn configured_root_overrides_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let configured = tmp.path().join("configured");
        let config = AlbumConfig {
            storage_mode: StorageModePreference::Legacy,
            legacy_root: Some(configured.clone()),
            ..AlbumConfig::default()
        };
        let writer = build_writer(&config, Some(tmp.path().join("fallback"))).unwrap();
        assert!(writer.create_album(Some("Vacation".into())).unwrap());
        assert!(configured.join("DCIM/Vacation").is_dir());
        assert!(!tmp.path().join("fallback").exists());
    }

    #[test]
    #[cfg(not(target_os = "android"))]
    fn no_root_fails_setup() {
        let err = build_writer(&AlbumConfig::default(), None).unwrap_err();
        assert_eq!(err.code(), "102");
    }
}
