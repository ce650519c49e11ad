//! Media classification by file extension.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Extensions routed to the video collection. Compared case-insensitively.
pub const VIDEO_EXTENSIONS: [&str; 7] = ["mp4", "3gp", "mkv", "avi", "mov", "flv", "wmv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Subtype used when the source has no extension.
    pub const fn default_subtype(self) -> &'static str {
        match self {
            MediaKind::Image => "jpeg",
            MediaKind::Video => "mp4",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extension and kind derived from a source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaClassification {
    pub extension: String,
    pub kind: MediaKind,
}

impl MediaClassification {
    /// Classifies `path` by the text after its last `.`.
    ///
    /// The whole path is inspected, not just the file name, so a dot in a
    /// parent directory with an extensionless file yields that tail as the
    /// extension. Callers pass absolute file paths, which keeps this rare.
    pub fn from_path(path: &str) -> Self {
        let extension = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .unwrap_or_default();
        let kind = if is_video_extension(&extension) {
            MediaKind::Video
        } else {
            MediaKind::Image
        };
        Self { extension, kind }
    }

    pub fn has_extension(&self) -> bool {
        !self.extension.is_empty()
    }

    /// `<image|video>/<extension>`, falling back to jpeg/mp4.
    pub fn mime_type(&self) -> String {
        if self.has_extension() {
            format!("{}/{}", self.kind, self.extension.to_ascii_lowercase())
        } else {
            format!("{}/{}", self.kind, self.kind.default_subtype())
        }
    }
}

pub fn is_video_extension(extension: &str) -> bool {
    VIDEO_EXTENSIONS
        .iter()
        .any(|v| v.eq_ignore_ascii_case(extension))
}

/// Top-level public directories that hold each kind of media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub image: String,
    pub video: String,
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            image: "DCIM".to_string(),
            video: "Movies".to_string(),
        }
    }
}

impl Collections {
    pub fn dir_for(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Image => &self.image,
            MediaKind::Video => &self.video,
        }
    }

    /// Logical path of an album inside the shared storage, e.g. `DCIM/Vacation`.
    pub fn relative_path(&self, kind: MediaKind, album: &str) -> String {
        format!("{}/{}", self.dir_for(kind), album)
    }

    /// Absolute album directory below a storage root.
    pub fn album_dir(&self, root: &Path, kind: MediaKind, album: &str) -> std::path::PathBuf {
        root.join(self.dir_for(kind)).join(album)
    }
}
