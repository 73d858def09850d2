//! Error types for store mutations and file loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors surfaced by the configuration store.
///
/// Missing or unreadable files are not represented here: the loader skips
/// them silently so optional override layers can be listed unconditionally.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `push` found an existing value at the path that is not an array.
    #[error("expected an array at '{path}', found {found}")]
    InvalidTarget { path: String, found: &'static str },

    /// No reader is registered for a file's extension. This aborts the
    /// whole `load` call, remaining files included.
    #[error("no reader registered for the extension '{extension}'")]
    UnsupportedFormat { extension: String },

    /// A reader failed to parse a file it could read.
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A reader failed to read a file that passed the loader's existence
    /// check.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Human-readable name of a value's type, for error messages.
pub(crate) fn value_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
