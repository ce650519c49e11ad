//! Destination file names.
//!
//! Names are the current time in milliseconds plus the source extension.
//! Two files handled within the same millisecond get the same name; the
//! clock has to advance between files for names to stay distinct.

use std::fmt::Debug;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::media::MediaClassification;

/// Source of the timestamp token used in file names.
pub trait Clock: Send + Sync + Debug {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u128;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }
}

/// Builds `<token>` or `<token>.<extension>`.
pub fn file_name(token: u128, classification: &MediaClassification) -> String {
    if classification.has_extension() {
        format!("{}.{}", token, classification.extension)
    } else {
        token.to_string()
    }
}
