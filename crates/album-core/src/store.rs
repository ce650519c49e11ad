//! Storage strategies for album writes.
//!
//! Two variants exist, picked once when the plugin starts:
//!
//! - [`IndexedStore`]: inserts a pending record into a content index,
//!   streams bytes into it, then publishes it.
//! - [`LegacyStore`]: copies into a public directory below a storage root
//!   and asks a scanner to pick the new file up.

use std::fmt::{self, Debug};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{AlbumError, AlbumResult};
use crate::media::{Collections, MediaClassification, MediaKind};

/// API level from which the content index accepts relative paths and
/// pending records.
pub const INDEXED_MIN_API_LEVEL: i32 = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageMode {
    Indexed,
    Legacy,
}

impl StorageMode {
    pub const fn for_api_level(level: i32) -> Self {
        if level >= INDEXED_MIN_API_LEVEL {
            StorageMode::Indexed
        } else {
            StorageMode::Legacy
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            StorageMode::Indexed => "indexed",
            StorageMode::Legacy => "legacy",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of copying one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedMedia {
    pub source: PathBuf,
    pub file_name: String,
    pub kind: MediaKind,
    /// Content URI for indexed writes, absolute path for legacy writes.
    pub location: String,
}

/// Persistence strategy behind the album writer.
pub trait AlbumStore: Send + Sync + Debug {
    fn mode(&self) -> StorageMode;

    /// Makes sure the album can receive files.
    fn create_album(&self, album: &str) -> AlbumResult<()>;

    /// Copies `source` into the album under `file_name`.
    fn save(
        &self,
        album: &str,
        source: &Path,
        file_name: &str,
        media: &MediaClassification,
    ) -> AlbumResult<SavedMedia>;
}

pub type BoxedStore = Box<dyn AlbumStore>;

// ---------------------------------------------------------------------------
// Indexed
// ---------------------------------------------------------------------------

/// Record inserted into the content index before any byte is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMedia {
    pub display_name: String,
    pub mime_type: String,
    pub relative_path: String,
    pub kind: MediaKind,
}

/// Handle to a record created by [`MediaIndex::insert_pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub uri: String,
    pub kind: MediaKind,
}

/// Content-indexing service that owns shared media.
pub trait MediaIndex: Send + Sync + Debug {
    /// Inserts a record flagged as pending.
    fn insert_pending(&self, media: &PendingMedia) -> AlbumResult<MediaRecord>;

    /// Opens a write stream on the record. Dropping the writer closes it.
    fn open_writer(&self, record: &MediaRecord) -> AlbumResult<Box<dyn Write + Send>>;

    /// Clears the pending flag so galleries show the record.
    fn publish(&self, record: &MediaRecord) -> AlbumResult<()>;
}

#[derive(Debug)]
pub struct IndexedStore<I: MediaIndex> {
    index: I,
    collections: Collections,
}

impl<I: MediaIndex> IndexedStore<I> {
    pub fn new(index: I, collections: Collections) -> Self {
        Self { index, collections }
    }

    pub fn index(&self) -> &I {
        &self.index
    }
}

impl<I: MediaIndex> AlbumStore for IndexedStore<I> {
    fn mode(&self) -> StorageMode {
        StorageMode::Indexed
    }

    fn create_album(&self, album: &str) -> AlbumResult<()> {
        // Albums appear in the index with their first record.
        tracing::debug!(album, "indexed storage creates albums on first write");
        Ok(())
    }

    fn save(
        &self,
        album: &str,
        source: &Path,
        file_name: &str,
        media: &MediaClassification,
    ) -> AlbumResult<SavedMedia> {
        let mut reader = BufReader::new(File::open(source)?);

        let pending = PendingMedia {
            display_name: file_name.to_string(),
            mime_type: media.mime_type(),
            relative_path: self.collections.relative_path(media.kind, album),
            kind: media.kind,
        };
        let record = self.index.insert_pending(&pending)?;

        {
            let mut writer = self.index.open_writer(&record)?;
            io::copy(&mut reader, &mut writer)?;
            writer.flush()?;
        }

        self.index.publish(&record)?;

        Ok(SavedMedia {
            source: source.to_path_buf(),
            file_name: file_name.to_string(),
            kind: media.kind,
            location: record.uri,
        })
    }
}

// ---------------------------------------------------------------------------
// Legacy
// ---------------------------------------------------------------------------

/// Notifies the platform that a file appeared in shared storage.
pub trait MediaScanner: Send + Sync + Debug {
    fn scan_file(&self, path: &Path) -> AlbumResult<()>;
}

#[derive(Debug)]
pub struct LegacyStore<S: MediaScanner> {
    root: PathBuf,
    collections: Collections,
    scanner: S,
}

impl<S: MediaScanner> LegacyStore<S> {
    pub fn new(root: impl Into<PathBuf>, collections: Collections, scanner: S) -> Self {
        Self {
            root: root.into(),
            collections,
            scanner,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scanner(&self) -> &S {
        &self.scanner
    }

    pub fn album_dir(&self, kind: MediaKind, album: &str) -> PathBuf {
        self.collections.album_dir(&self.root, kind, album)
    }
}

impl<S: MediaScanner> AlbumStore for LegacyStore<S> {
    fn mode(&self) -> StorageMode {
        StorageMode::Legacy
    }

    fn create_album(&self, album: &str) -> AlbumResult<()> {
        let dir = self.album_dir(MediaKind::Image, album);
        // Not surfaced to the caller; a later save reports the real failure.
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!(path = %dir.display(), error = %e, "failed to create album directory");
        }
        Ok(())
    }

    fn save(
        &self,
        album: &str,
        source: &Path,
        file_name: &str,
        media: &MediaClassification,
    ) -> AlbumResult<SavedMedia> {
        let dir = self.album_dir(media.kind, album);
        fs::create_dir_all(&dir)?;

        let mut reader = BufReader::new(File::open(source)?);
        let target = dir.join(file_name);
        {
            let mut writer = BufWriter::new(File::create(&target)?);
            io::copy(&mut reader, &mut writer)?;
            writer.flush()?;
        }

        self.scanner.scan_file(&target)?;

        Ok(SavedMedia {
            source: source.to_path_buf(),
            file_name: file_name.to_string(),
            kind: media.kind,
            location: target.to_string_lossy().into_owned(),
        })
    }
}

/// Scanner for hosts whose galleries watch the filesystem themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogScanner;

impl MediaScanner for LogScanner {
    fn scan_file(&self, path: &Path) -> AlbumResult<()> {
        tracing::info!(path = %path.display(), "new media file");
        Ok(())
    }
}

/// Maps a missing storage root to a platform error.
pub fn require_root(root: Option<PathBuf>) -> AlbumResult<PathBuf> {
    root.ok_or_else(|| AlbumError::platform("no public storage directory available"))
}
