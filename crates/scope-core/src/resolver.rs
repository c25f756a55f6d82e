//! Resolution of the three scopes into one merged configuration
//!
//! The resolver reads System, User and Local in that order, parses each into
//! a [`ScopedConfig`] and merges them with precedence Local > User > System
//! per fully-qualified key. Nothing is cached: every call reflects the
//! current content of the store.

use crate::{Error, Result, ScopeReader};
use scope_format::{MergedConfig, Scope, ScopedConfig};
use scope_fs::ScopeStore;

/// Builds a [`MergedConfig`] from a scope store.
#[derive(Debug)]
pub struct ConfigResolver<'a, S> {
    reader: ScopeReader<'a, S>,
}

impl<'a, S: ScopeStore> ConfigResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            reader: ScopeReader::new(store),
        }
    }

    /// Read, parse and merge all physical scopes.
    ///
    /// Absent scopes count as empty. A read failure or a parse failure in
    /// any scope aborts resolution; no partial result is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scope_core::ConfigResolver;
    /// use scope_format::{Key, Scope};
    /// use scope_test_utils::MemoryStore;
    ///
    /// let store = MemoryStore::new()
    ///     .with_file(Scope::System, "[core]\n\tbare = false\n")
    ///     .with_file(Scope::Local, "[core]\n\tbare = true\n");
    ///
    /// let merged = ConfigResolver::new(&store).resolve().unwrap();
    /// assert_eq!(merged.get(&Key::parse("core.bare").unwrap()), Some("true"));
    /// ```
    pub fn resolve(&self) -> Result<MergedConfig> {
        let mut scoped = Vec::with_capacity(Scope::PHYSICAL.len());

        for scope in Scope::PHYSICAL {
            let bytes = self.reader.read(scope)?;
            let config = ScopedConfig::unmarshal(scope, &frame(&bytes))
                .map_err(|source| Error::Parse { scope, source })?;
            tracing::debug!(
                scope = %scope,
                bytes = bytes.len(),
                sections = config.sections().len(),
                "Loaded scope"
            );
            scoped.push(config);
        }

        Ok(scope_format::merge(scoped)?)
    }
}

/// Surround `bytes` with newlines so a scope's content always starts and
/// ends on a line boundary.
fn frame(bytes: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(bytes.len() + 2);
    framed.push(b'\n');
    framed.extend_from_slice(bytes);
    framed.push(b'\n');
    framed
}
