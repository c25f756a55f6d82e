//! Persistence of scoped and merged configurations
//!
//! A write validates first and touches the store only once validation has
//! passed. Each scope is written through its own stream, which is released
//! on every exit path. A merged config fans out to System, User and Local in
//! that order; the fan-out is not transactional, so a failure leaves earlier
//! scopes written.

use crate::{Error, Result};
use scope_format::{MergedConfig, Scope, ScopedConfig};
use scope_fs::{ScopeStore, ScopeWriter};
use std::io::Write;

/// Anything [`ConfigWriter::persist`] accepts.
#[derive(Debug, Clone, Copy)]
pub enum ConfigRef<'a> {
    Scoped(&'a ScopedConfig),
    Merged(&'a MergedConfig),
}

impl ConfigRef<'_> {
    pub fn scope(&self) -> Scope {
        match self {
            Self::Scoped(config) => config.scope(),
            Self::Merged(config) => config.scope(),
        }
    }
}

impl<'a> From<&'a ScopedConfig> for ConfigRef<'a> {
    fn from(config: &'a ScopedConfig) -> Self {
        Self::Scoped(config)
    }
}

impl<'a> From<&'a MergedConfig> for ConfigRef<'a> {
    fn from(config: &'a MergedConfig) -> Self {
        Self::Merged(config)
    }
}

/// Writes configurations back to a scope store.
#[derive(Debug)]
pub struct ConfigWriter<'a, S> {
    store: &'a S,
}

impl<'a, S: ScopeStore> ConfigWriter<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Write `config` to the scope (or scopes) it belongs to.
    pub fn persist<'c>(&self, config: impl Into<ConfigRef<'c>>) -> Result<()> {
        match config.into() {
            ConfigRef::Scoped(config) => self.set_config(config),
            ConfigRef::Merged(config) => self.set_merged(config),
        }
    }

    /// Write a single scope.
    ///
    /// If the System writer cannot be opened because access is denied, the
    /// call succeeds without writing anything.
    pub fn set_config(&self, config: &ScopedConfig) -> Result<()> {
        validate(config)?;
        self.write_scope(config)
    }

    /// Write every constituent of a merged config.
    ///
    /// All three scopes are validated before the first one is written.
    pub fn set_merged(&self, config: &MergedConfig) -> Result<()> {
        let scoped = config.scoped_configs();
        scoped.into_iter().try_for_each(validate)?;
        scoped
            .into_iter()
            .try_for_each(|config| self.write_scope(config))
    }

    fn write_scope(&self, config: &ScopedConfig) -> Result<()> {
        let scope = config.scope();
        let Some(mut writer) = self.open_writer(scope)? else {
            return Ok(());
        };

        let bytes = config
            .marshal()
            .map_err(|source| Error::Validation { scope, source })?;
        writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| Error::Write {
                scope,
                source: scope_fs::Error::Stream(e),
            })?;
        writer
            .close()
            .map_err(|source| Error::Write { scope, source })?;

        tracing::debug!(scope = %scope, bytes = bytes.len(), "Wrote scope");
        Ok(())
    }

    /// Open the writer for `scope`, or `None` when a denied System write is
    /// to be skipped.
    fn open_writer(&self, scope: Scope) -> Result<Option<S::Writer>> {
        let opened = match scope {
            Scope::System => self.store.system_config_writer(),
            Scope::User => self.store.user_config_writer(),
            Scope::Local => self.store.local_config_writer(),
            Scope::Merged => return Err(scope_format::Error::NotPhysical { scope }.into()),
        };

        match opened {
            Ok(writer) => Ok(Some(writer)),
            Err(err) if scope == Scope::System && err.is_permission_denied() => {
                tracing::debug!(error = %err, "System config not writable, skipping");
                Ok(None)
            }
            Err(source) => Err(Error::WriteAccess { scope, source }),
        }
    }
}

fn validate(config: &ScopedConfig) -> Result<()> {
    config.validate().map_err(|source| Error::Validation {
        scope: config.scope(),
        source,
    })
}
