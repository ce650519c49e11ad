//! Album requests, media classification and the storage strategies behind
//! `createAlbum` / `saveAlbum`.

pub mod channel;
pub mod config;
pub mod error;
pub mod media;
pub mod naming;
pub mod request;
pub mod store;
pub mod writer;

#[cfg(test)]
mod fakes;

pub use channel::{BridgeError, MethodCall, dispatch};
pub use config::{AlbumConfig, StorageModePreference};
pub use error::{AlbumError, AlbumResult};
pub use media::{Collections, MediaClassification, MediaKind, VIDEO_EXTENSIONS};
pub use naming::{Clock, SystemClock};
pub use request::AlbumRequest;
pub use store::{
    AlbumStore, BoxedStore, IndexedStore, LegacyStore, LogScanner, MediaIndex, MediaRecord,
    MediaScanner, PendingMedia, SavedMedia, StorageMode,
};
pub use writer::AlbumWriter;
