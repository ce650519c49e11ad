//! Name-dispatched invocation surface.
//!
//! Hosts that route calls by method name (`createAlbum`, `saveAlbum`) parse
//! them here. Results come back as `true` or a [`BridgeError`] carrying the
//! numeric code the calling layer switches on.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::AlbumError;
use crate::writer::AlbumWriter;

pub const CREATE_ALBUM: &str = "createAlbum";
pub const SAVE_ALBUM: &str = "saveAlbum";
pub const NOT_IMPLEMENTED: &str = "notImplemented";

/// Error shape returned across the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgeError {
    pub code: String,
    pub message: String,
}

impl BridgeError {
    pub fn not_implemented(method: &str) -> Self {
        Self {
            code: NOT_IMPLEMENTED.to_string(),
            message: format!("method {method} is not implemented"),
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        self.code == NOT_IMPLEMENTED
    }
}

impl From<AlbumError> for BridgeError {
    fn from(e: AlbumError) -> Self {
        Self {
            code: e.code().to_string(),
            message: e.cause(),
        }
    }
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for BridgeError {}

/// A recognised call with its raw arguments.
///
/// Arguments stay optional here; validation belongs to the writer so that
/// every entry point reports the same codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodCall {
    CreateAlbum {
        album_name: Option<String>,
    },
    SaveAlbum {
        album_name: Option<String>,
        file_paths: Option<Vec<String>>,
    },
}

impl MethodCall {
    /// Parses a call. Unknown method names yield `notImplemented`.
    pub fn parse(method: &str, args: &Value) -> Result<Self, BridgeError> {
        match method {
            CREATE_ALBUM => Ok(MethodCall::CreateAlbum {
                album_name: string_arg(args, "albumName"),
            }),
            SAVE_ALBUM => Ok(MethodCall::SaveAlbum {
                album_name: string_arg(args, "albumName"),
                file_paths: args
                    .get("filePaths")
                    .and_then(|v| serde_json::from_value(v.clone()).ok()),
            }),
            other => Err(BridgeError::not_implemented(other)),
        }
    }

    pub fn method(&self) -> &'static str {
        match self {
            MethodCall::CreateAlbum { .. } => CREATE_ALBUM,
            MethodCall::SaveAlbum { .. } => SAVE_ALBUM,
        }
    }

    /// Runs the call on the writer's blocking worker.
    pub async fn invoke(self, writer: &Arc<AlbumWriter>) -> Result<bool, BridgeError> {
        let result = match self {
            MethodCall::CreateAlbum { album_name } => writer.create_album_async(album_name).await,
            MethodCall::SaveAlbum {
                album_name,
                file_paths,
            } => writer.save_album_async(album_name, file_paths).await,
        };
        result.map_err(BridgeError::from)
    }
}

/// Parses and runs a call in one step.
pub async fn dispatch(
    writer: &Arc<AlbumWriter>,
    method: &str,
    args: &Value,
) -> Result<bool, BridgeError> {
    let call = MethodCall::parse(method, args)?;
    tracing::debug!(method = call.method(), "dispatching album call");
    call.invoke(writer).await
}

fn string_arg(args: &Value, key: &str) -> Option<String> {
    args.get(key).and_then(Value::as_str).map(str::to_owned)
}
