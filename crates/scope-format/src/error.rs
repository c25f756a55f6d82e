//! Error types for scope-format

use crate::Scope;

/// Result type for scope-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding, encoding, validating or merging configs
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Invalid config entry {key}: {reason}")]
    Validation { key: String, reason: String },

    #[error("Scope '{scope}' is not a physical configuration source")]
    NotPhysical { scope: Scope },

    #[error("Scope '{scope}' supplied more than once")]
    DuplicateScope { scope: Scope },
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn validation(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
