//! Filesystem-backed scope store for layered configuration
//!
//! Maps the system, user and local scopes onto files and hands out raw
//! bytes and atomic writers for them. Parsing and precedence live in
//! `scope-format` and `scope-core`.

pub mod error;
pub mod io;
pub mod layout;
pub mod store;

pub use error::{Error, Result};
pub use io::AtomicFile;
pub use layout::{LOCAL_CONFIG_FILE, ScopeLayout, discover_metadata_dir};
pub use store::{FsScopeStore, ScopeStore, ScopeWriter};
