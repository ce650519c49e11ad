//! The album writer: validates requests and drives a storage strategy.
//!
//! Blocking work runs on `spawn_blocking` through the `*_async` methods so
//! the caller's thread never waits on file or index I/O. Within one save
//! the files are copied strictly in order, and the first failure stops the
//! loop. Files written before the failure stay where they are.

use std::path::Path;
use std::sync::Arc;

use crate::error::{AlbumError, AlbumResult};
use crate::media::MediaClassification;
use crate::naming::{self, Clock, SystemClock};
use crate::request::{self, AlbumRequest};
use crate::store::{AlbumStore, SavedMedia, StorageMode};

#[derive(Debug)]
pub struct AlbumWriter {
    store: Arc<dyn AlbumStore>,
    clock: Arc<dyn Clock>,
}

impl AlbumWriter {
    pub fn new(store: Arc<dyn AlbumStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn AlbumStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn mode(&self) -> StorageMode {
        self.store.mode()
    }

    /// Ensures the album exists. Always `true` once the name is valid.
    pub fn create_album(&self, album_name: Option<String>) -> AlbumResult<bool> {
        let album = request::validate_album_name(album_name)?;
        self.store.create_album(&album)?;
        tracing::info!(album = %album, mode = %self.mode(), "album ready");
        Ok(true)
    }

    /// Copies every file of the request. `true` only if all of them made it.
    pub fn save_album(
        &self,
        album_name: Option<String>,
        file_paths: Option<Vec<String>>,
    ) -> AlbumResult<bool> {
        let request = AlbumRequest::new(album_name, file_paths)?;
        self.save_request(&request).map(|_| true)
    }

    /// Like [`save_album`](Self::save_album) but returns where each file went.
    pub fn save_album_detailed(
        &self,
        album_name: Option<String>,
        file_paths: Option<Vec<String>>,
    ) -> AlbumResult<Vec<SavedMedia>> {
        let request = AlbumRequest::new(album_name, file_paths)?;
        self.save_request(&request)
    }

    pub fn save_request(&self, request: &AlbumRequest) -> AlbumResult<Vec<SavedMedia>> {
        let album = request.album_name.as_str();
        let mut saved = Vec::with_capacity(request.file_paths.len());

        for (position, path) in request.file_paths.iter().enumerate() {
            match self.save_one(album, path) {
                Ok(media) => saved.push(media),
                Err(e) => {
                    tracing::error!(
                        album,
                        path = %path,
                        position,
                        saved = saved.len(),
                        error = %e,
                        "save aborted"
                    );
                    return Err(AlbumError::Io(format!("Error saving album: {}", e.cause())));
                }
            }
        }

        Ok(saved)
    }

    fn save_one(&self, album: &str, path: &str) -> AlbumResult<SavedMedia> {
        let media = MediaClassification::from_path(path);
        let file_name = naming::file_name(self.clock.now_millis(), &media);
        tracing::debug!(
            path,
            kind = %media.kind,
            extension = %media.extension,
            file_name = %file_name,
            "classified source"
        );

        let saved = self.store.save(album, Path::new(path), &file_name, &media)?;
        tracing::info!(
            album,
            kind = %saved.kind,
            location = %saved.location,
            "media saved"
        );
        Ok(saved)
    }

    /// [`create_album`](Self::create_album) on a blocking worker.
    pub async fn create_album_async(self: &Arc<Self>, album_name: Option<String>) -> AlbumResult<bool> {
        let writer = Arc::clone(self);
        run_blocking(move || writer.create_album(album_name)).await
    }

    /// [`save_album`](Self::save_album) on a blocking worker.
    pub async fn save_album_async(
        self: &Arc<Self>,
        album_name: Option<String>,
        file_paths: Option<Vec<String>>,
    ) -> AlbumResult<bool> {
        // Argument errors come back without a trip through the pool.
        let request = AlbumRequest::new(album_name, file_paths)?;
        let writer = Arc::clone(self);
        run_blocking(move || writer.save_request(&request).map(|_| true)).await
    }

    /// [`save_album_detailed`](Self::save_album_detailed) on a blocking worker.
    pub async fn save_album_detailed_async(
        self: &Arc<Self>,
        album_name: Option<String>,
        file_paths: Option<Vec<String>>,
    ) -> AlbumResult<Vec<SavedMedia>> {
        let request = AlbumRequest::new(album_name, file_paths)?;
        let writer = Arc::clone(self);
        run_blocking(move || writer.save_request(&request)).await
    }
}

async fn run_blocking<T, F>(f: F) -> AlbumResult<T>
where
    F: FnOnce() -> AlbumResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AlbumError::Internal(format!("album task failed: {e}")))?
}
