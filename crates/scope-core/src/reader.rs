//! Raw bytes per scope, with absent sources read as empty

use crate::{Error, Result};
use scope_format::Scope;
use scope_fs::ScopeStore;
use std::io::Read;

/// Reads the raw content of one physical scope at a time.
///
/// A source the store reports as not found yields an empty buffer. Every
/// other store failure is returned as [`Error::Read`]. The local stream is
/// owned by the read call and dropped before it returns, on every path.
#[derive(Debug)]
pub struct ScopeReader<'a, S> {
    store: &'a S,
}

impl<'a, S: ScopeStore> ScopeReader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read the scope selected by `scope`.
    ///
    /// [`Scope::Merged`] has no source and is rejected.
    pub fn read(&self, scope: Scope) -> Result<Vec<u8>> {
        match scope {
            Scope::System => self.read_system(),
            Scope::User => self.read_user(),
            Scope::Local => self.read_local(),
            Scope::Merged => Err(scope_format::Error::NotPhysical { scope }.into()),
        }
    }

    pub fn read_system(&self) -> Result<Vec<u8>> {
        tolerate_missing(Scope::System, self.store.system_config())
    }

    pub fn read_user(&self) -> Result<Vec<u8>> {
        tolerate_missing(Scope::User, self.store.user_config())
    }

    pub fn read_local(&self) -> Result<Vec<u8>> {
        let scope = Scope::Local;
        let mut stream = match self.store.local_config() {
            Ok(stream) => stream,
            Err(err) if err.is_not_found() => {
                tracing::trace!(scope = %scope, "Scope source absent, reading as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(Error::Read { scope, source }),
        };

        let mut bytes = Vec::new();
        stream
            .read_to_end(&mut bytes)
            .map_err(|e| Error::Read {
                scope,
                source: scope_fs::Error::Stream(e),
            })?;
        Ok(bytes)
    }
}

fn tolerate_missing(scope: Scope, read: scope_fs::Result<Vec<u8>>) -> Result<Vec<u8>> {
    match read {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.is_not_found() => {
            tracing::trace!(scope = %scope, "Scope source absent, reading as empty");
            Ok(Vec::new())
        }
        Err(source) => Err(Error::Read { scope, source }),
    }
}
