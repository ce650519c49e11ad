//! Validated album requests.

use crate::error::{AlbumError, AlbumResult};

/// Album name plus the ordered source files to copy into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumRequest {
    pub album_name: String,
    pub file_paths: Vec<String>,
}

/// Checks the album name of a `createAlbum` call.
pub fn validate_album_name(album_name: Option<String>) -> AlbumResult<String> {
    match album_name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(AlbumError::MissingAlbumName),
    }
}

impl AlbumRequest {
    /// Builds a request from raw call arguments.
    ///
    /// The album name is checked before the path list. An empty path list
    /// is valid.
    pub fn new(album_name: Option<String>, file_paths: Option<Vec<String>>) -> AlbumResult<Self> {
        let album_name = validate_album_name(album_name)?;
        let file_paths = file_paths.ok_or(AlbumError::MissingFilePaths)?;
        Ok(Self {
            album_name,
            file_paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_album_name() {
        let err = AlbumRequest::new(None, Some(vec![])).unwrap_err();
        assert!(matches!(err, AlbumError::MissingAlbumName));
        let err = AlbumRequest::new(Some(String::new()), None).unwrap_err();
        assert!(matches!(err, AlbumError::MissingAlbumName));
    }

    #[test]
    fn missing_file_paths() {
        let err = AlbumRequest::new(Some("Vacation".into()), None).unwrap_err();
        assert!(matches!(err, AlbumError::MissingFilePaths));
    }

    #[test]
    fn empty_path_list_is_valid() {
        let request = AlbumRequest::new(Some("Vacation".into()), Some(vec![])).unwrap();
        assert!(request.file_paths.is_empty());
    }
}
