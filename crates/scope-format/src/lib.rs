//! Scoped configuration data model and codec
//!
//! This crate knows nothing about where configuration lives. It provides:
//!
//! - [`Scope`]: the closed set of configuration scopes
//! - [`Config`]: sections, subsections, keys and string values
//! - [`ScopedConfig`] / [`MergedConfig`]: scope-tagged configs and the merged view
//! - [`decode`] / [`encode`]: the git-style INI text format
//! - [`validate`]: structural checks run before anything is written
//! - [`merge`]: Local > User > System precedence per fully-qualified key
//!
//! # Example
//!
//! ```
//! use scope_format::{Key, Scope, ScopedConfig, merge};
//!
//! let system = ScopedConfig::unmarshal(Scope::System, b"[core]\nbare = false\n").unwrap();
//! let local = ScopedConfig::unmarshal(Scope::Local, b"[core]\nbare = true\n").unwrap();
//! let merged = merge([system, local]).unwrap();
//!
//! assert_eq!(merged.get(&Key::parse("core.bare").unwrap()), Some("true"));
//! ```

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod key;
pub mod scope;
pub mod scoped;
pub mod validate;

pub use config::{Config, ConfigOption, Options, Section, Subsection};
pub use decode::{decode, decode_bytes};
pub use encode::encode;
pub use error::{Error, Result};
pub use key::Key;
pub use scope::Scope;
pub use scoped::{MergedConfig, ScopedConfig, merge};
pub use validate::validate;
