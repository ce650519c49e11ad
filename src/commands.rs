//! Album commands exposed to the webview.
//!
//! - `create_album`: make sure an album exists
//! - `save_album`: copy files into an album, in order, stopping at the first failure
//! - `save_album_detailed`: same as `save_album`, returning where each file landed
//! - `invoke_method`: the same two calls dispatched by name (`createAlbum`, `saveAlbum`)
//!
//! Errors come back as `{ code, message }` with codes `100`..`104` or
//! `notImplemented`.

use album_core::{BridgeError, SavedMedia};
use serde_json::Value;
use tauri::{command, AppHandle, Runtime};

use crate::AlbumExt;

/// Create an album.
///
/// # Arguments
/// - `album_name`: Name of the album
#[command]
pub async fn create_album<R: Runtime>(
    app: AppHandle<R>,
    #[allow(non_snake_case)] albumName: Option<String>,
) -> Result<bool, BridgeError> {
    let writer = app.album().writer()?;
    writer
        .create_album_async(albumName)
        .await
        .map_err(BridgeError::from)
}

/// Save files into an album.
///
/// # Arguments
/// - `album_name`: Name of the album
/// - `file_paths`: Absolute paths of the files to copy
///
/// # Returns
/// `true` once every file has been copied.
#[command]
pub async fn save_album<R: Runtime>(
    app: AppHandle<R>,
    #[allow(non_snake_case)] albumName: Option<String>,
    #[allow(non_snake_case)] filePaths: Option<Vec<String>>,
) -> Result<bool, BridgeError> {
    let writer = app.album().writer()?;
    writer
        .save_album_async(albumName, filePaths)
        .await
        .map_err(BridgeError::from)
}

/// Save files into an album and report each destination.
///
/// # Returns
/// One entry per file, in request order. `location` is a content URI on
/// indexed storage and an absolute path otherwise.
#[command]
pub async fn save_album_detailed<R: Runtime>(
    app: AppHandle<R>,
    #[allow(non_snake_case)] albumName: Option<String>,
    #[allow(non_snake_case)] filePaths: Option<Vec<String>>,
) -> Result<Vec<SavedMedia>, BridgeError> {
    let writer = app.album().writer()?;
    writer
        .save_album_detailed_async(albumName, filePaths)
        .await
        .map_err(BridgeError::from)
}

/// Dispatch an album call by method name.
#[command]
pub async fn invoke_method<R: Runtime>(
    app: AppHandle<R>,
    method: String,
    args: Option<Value>,
) -> Result<bool, BridgeError> {
    let writer = app.album().writer()?;
    let args = args.unwrap_or(Value::Null);
    album_core::dispatch(&writer, &method, &args).await
}
