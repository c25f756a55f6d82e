//! Error types for scope-core

use scope_format::Scope;

/// Result type for scope-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by resolution and persistence
///
/// Every variant that comes from a single scope names it, so callers can
/// report which file was at fault.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store failed to read a scope for a reason other than absence
    #[error("Failed to read {scope} config: {source}")]
    Read {
        scope: Scope,
        #[source]
        source: scope_fs::Error,
    },

    /// A scope's content is not valid config syntax
    #[error("Failed to parse {scope} config: {source}")]
    Parse {
        scope: Scope,
        #[source]
        source: scope_format::Error,
    },

    /// A config about to be written breaks the format rules
    #[error("Invalid {scope} config: {source}")]
    Validation {
        scope: Scope,
        #[source]
        source: scope_format::Error,
    },

    /// No writable stream could be obtained for a scope
    #[error("Cannot open {scope} config for writing: {source}")]
    WriteAccess {
        scope: Scope,
        #[source]
        source: scope_fs::Error,
    },

    /// Writing or closing an opened stream failed
    #[error("Failed to write {scope} config: {source}")]
    Write {
        scope: Scope,
        #[source]
        source: scope_fs::Error,
    },

    /// Format error not tied to one scope
    #[error(transparent)]
    Format(#[from] scope_format::Error),
}

impl Error {
    /// The scope the error originated from, if any.
    pub fn scope(&self) -> Option<Scope> {
        match self {
            Self::Read { scope, .. }
            | Self::Parse { scope, .. }
            | Self::Validation { scope, .. }
            | Self::WriteAccess { scope, .. }
            | Self::Write { scope, .. } => Some(*scope),
            Self::Format(_) => None,
        }
    }
}
