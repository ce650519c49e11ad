//! Writer slot managed by the plugin.
//!
//! Bound during plugin setup, cleared when the plugin is dropped. Commands
//! arriving while the slot is empty fail with code `103`.

use std::sync::{Arc, RwLock};

use album_core::{AlbumError, AlbumWriter, BridgeError};

#[derive(Debug, Default)]
pub struct AlbumState {
    writer: RwLock<Option<Arc<AlbumWriter>>>,
}

impl AlbumState {
    pub fn bind(&self, writer: AlbumWriter) {
        match self.writer.write() {
            Ok(mut slot) => *slot = Some(Arc::new(writer)),
            Err(e) => tracing::error!(error = %e, "album state lock poisoned"),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.writer.write() {
            if slot.take().is_some() {
                tracing::debug!("album writer released");
            }
        }
    }

    /// The bound writer, or `NotAttached`.
    pub fn writer(&self) -> Result<Arc<AlbumWriter>, BridgeError> {
        let slot = self
            .writer
            .read()
            .map_err(|e| AlbumError::Internal(e.to_string()))?;
        slot.clone().ok_or_else(|| AlbumError::NotAttached.into())
    }
}
