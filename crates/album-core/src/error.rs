//! Error types.

use thiserror::Error;

pub type AlbumResult<T> = Result<T, AlbumError>;

#[derive(Debug, Error)]
pub enum AlbumError {
    #[error("albumName cannot be null")]
    MissingAlbumName,

    #[error("filePaths cannot be null")]
    MissingFilePaths,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Album writer is not attached")]
    NotAttached,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for AlbumError {
    fn from(e: std::io::Error) -> Self {
        AlbumError::Io(e.to_string())
    }
}

impl AlbumError {
    pub fn platform(msg: impl Into<String>) -> Self {
        AlbumError::Platform(msg.into())
    }

    /// Numeric code reported to the calling layer.
    pub fn code(&self) -> &'static str {
        match self {
            AlbumError::MissingAlbumName => "100",
            AlbumError::MissingFilePaths => "101",
            AlbumError::Io(_) | AlbumError::Platform(_) => "102",
            AlbumError::NotAttached => "103",
            AlbumError::Internal(_) => "104",
        }
    }

    /// True for errors raised before any I/O happened.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            AlbumError::MissingAlbumName | AlbumError::MissingFilePaths
        )
    }

    /// Text of the underlying cause, without the variant prefix.
    pub fn cause(&self) -> String {
        match self {
            AlbumError::Io(msg) | AlbumError::Platform(msg) | AlbumError::Internal(msg) => {
                msg.clone()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_channel_contract() {
        assert_eq!(AlbumError::MissingAlbumName.code(), "100");
        assert_eq!(AlbumError::MissingFilePaths.code(), "101");
        assert_eq!(AlbumError::Io("boom".into()).code(), "102");
        assert_eq!(AlbumError::platform("insert").code(), "102");
        assert_eq!(AlbumError::NotAttached.code(), "103");
    }

    #[test]
    fn io_errors_keep_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = AlbumError::from(io);
        assert!(!err.is_invalid_argument());
        assert_eq!(err.cause(), "no such file");
    }
}
