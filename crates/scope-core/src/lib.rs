//! Layered configuration resolution and persistence
//!
//! Given a [`ScopeStore`](scope_fs::ScopeStore) this crate provides:
//!
//! - **Reading**: [`ScopeReader`] returns raw bytes per scope, absent sources as empty
//! - **Resolution**: [`ConfigResolver`] parses System, User and Local and merges them
//! - **Persistence**: [`ConfigWriter`] validates and writes one scope or all three
//! - **Facade**: [`ConfigStorage`] bundles both pipelines over one store
//!
//! # Architecture
//!
//! ```text
//!                  scope-cli
//!                      |
//!                 scope-core
//!                  /        \
//!        scope-format     scope-fs
//!        (codec, merge)   (files, locks)
//! ```
//!
//! # Example
//!
//! ```rust
//! use scope_core::ConfigStorage;
//! use scope_format::{Key, Scope};
//! use scope_test_utils::MemoryStore;
//!
//! let storage = ConfigStorage::new(MemoryStore::new());
//! let mut merged = storage.resolve().unwrap();
//! merged.set(&Key::parse("user.name").unwrap(), "Alice");
//! storage.persist(merged.scoped(Scope::Local).unwrap()).unwrap();
//!
//! let merged = storage.resolve().unwrap();
//! assert_eq!(merged.get(&Key::parse("user.name").unwrap()), Some("Alice"));
//! ```

pub mod error;
pub mod reader;
pub mod resolver;
pub mod storage;
pub mod writer;

pub use error::{Error, Result};
pub use reader::ScopeReader;
pub use resolver::ConfigResolver;
pub use storage::ConfigStorage;
pub use writer::{ConfigRef, ConfigWriter};
