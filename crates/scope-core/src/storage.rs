//! [`ConfigStorage`]: one handle for resolving and persisting

use crate::{ConfigRef, ConfigResolver, ConfigWriter, Result};
use scope_format::MergedConfig;
use scope_fs::{FsScopeStore, ScopeLayout, ScopeStore};

/// A scope store with the read and write pipelines attached.
#[derive(Debug, Clone)]
pub struct ConfigStorage<S> {
    store: S,
}

impl ConfigStorage<FsScopeStore> {
    /// Storage over the files named by `layout`.
    pub fn open(layout: ScopeLayout) -> Self {
        Self::new(FsScopeStore::new(layout))
    }
}

impl<S: ScopeStore> ConfigStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// See [`ConfigResolver::resolve`].
    pub fn resolve(&self) -> Result<MergedConfig> {
        ConfigResolver::new(&self.store).resolve()
    }

    /// See [`ConfigWriter::persist`].
    pub fn persist<'c>(&self, config: impl Into<ConfigRef<'c>>) -> Result<()> {
        ConfigWriter::new(&self.store).persist(config)
    }
}
