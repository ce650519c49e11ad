//! In-memory index and scanner used by unit tests.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{AlbumError, AlbumResult};
use crate::store::{MediaIndex, MediaRecord, MediaScanner, PendingMedia};

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub uri: String,
    pub media: PendingMedia,
    pub pending: bool,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MemoryIndex {
    entries: Mutex<Vec<IndexEntry>>,
    buffers: Mutex<Vec<Arc<Mutex<Vec<u8>>>>>,
    /// Fail the insert whose zero-based position matches.
    pub fail_insert_at: Option<usize>,
}

impl MemoryIndex {
    pub fn failing_at(position: usize) -> Self {
        Self {
            fail_insert_at: Some(position),
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<IndexEntry> {
        let entries = self.entries.lock().unwrap();
        let buffers = self.buffers.lock().unwrap();
        entries
            .iter()
            .zip(buffers.iter())
            .map(|(entry, buf)| IndexEntry {
                bytes: buf.lock().unwrap().clone(),
                ..entry.clone()
            })
            .collect()
    }

    fn position(uri: &str) -> usize {
        uri.rsplit('/')
            .next()
            .and_then(|id| id.parse().ok())
            .unwrap_or(usize::MAX)
    }
}

impl MediaIndex for MemoryIndex {
    fn insert_pending(&self, media: &PendingMedia) -> AlbumResult<MediaRecord> {
        let mut entries = self.entries.lock().unwrap();
        if self.fail_insert_at == Some(entries.len()) {
            return Err(AlbumError::platform("insert rejected"));
        }
        let uri = format!("content://media/external/{}/{}", media.kind, entries.len());
        entries.push(IndexEntry {
            uri: uri.clone(),
            media: media.clone(),
            pending: true,
            bytes: Vec::new(),
        });
        self.buffers.lock().unwrap().push(Arc::default());
        Ok(MediaRecord {
            uri,
            kind: media.kind,
        })
    }

    fn open_writer(&self, record: &MediaRecord) -> AlbumResult<Box<dyn Write + Send>> {
        let buffers = self.buffers.lock().unwrap();
        let buf = buffers
            .get(Self::position(&record.uri))
            .cloned()
            .ok_or_else(|| AlbumError::platform("unknown record"))?;
        Ok(Box::new(SharedBuf(buf)))
    }

    fn publish(&self, record: &MediaRecord) -> AlbumResult<()> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .get_mut(Self::position(&record.uri))
            .ok_or_else(|| AlbumError::platform("unknown record"))?;
        entry.pending = false;
        Ok(())
    }
}

struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingScanner {
    scanned: Mutex<Vec<PathBuf>>,
}

impl RecordingScanner {
    pub fn scanned(&self) -> Vec<PathBuf> {
        self.scanned.lock().unwrap().clone()
    }
}

impl MediaScanner for RecordingScanner {
    fn scan_file(&self, path: &Path) -> AlbumResult<()> {
        self.scanned.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
