//! Shared test fixtures for the scopecfg workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`memory`]: [`MemoryStore`], an in-memory scope store with fault injection
//! - [`scopes`]: [`TestScopes`], real scope files in a temporary directory

pub mod memory;
pub mod scopes;

pub use memory::MemoryStore;
pub use scopes::{TEST_TOOL, TestScopes};
