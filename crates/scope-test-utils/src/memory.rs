//! [`MemoryStore`]: a scope store held in memory.
//!
//! Every scope can be seeded with content, made to fail at a chosen step
//! with a chosen [`ErrorKind`], and inspected afterwards. Clones share state,
//! so a test can hand one clone to the code under test and keep another for
//! assertions.

use scope_format::Scope;
use scope_fs::{Error, Result, ScopeStore, ScopeWriter};
use std::collections::HashMap;
use std::io::{self, Cursor, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct State {
    files: HashMap<Scope, Vec<u8>>,
    read_faults: HashMap<Scope, ErrorKind>,
    open_faults: HashMap<Scope, ErrorKind>,
    stream_faults: HashMap<Scope, ErrorKind>,
    writers_opened: Vec<Scope>,
    writes_committed: Vec<Scope>,
    open_streams: usize,
}

/// In-memory [`ScopeStore`] with fault injection.
///
/// # Example
///
/// ```rust
/// use scope_format::Scope;
/// use scope_test_utils::MemoryStore;
/// use std::io::ErrorKind;
///
/// let store = MemoryStore::new().with_file(Scope::User, "[user]\n\tname = Alice\n");
/// store.fail_open(Scope::System, ErrorKind::PermissionDenied);
/// assert!(store.writers_opened().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// A store where every scope is absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryStore::set_file`].
    pub fn with_file(self, scope: Scope, contents: impl AsRef<[u8]>) -> Self {
        self.set_file(scope, contents);
        self
    }

    pub fn set_file(&self, scope: Scope, contents: impl AsRef<[u8]>) {
        self.state()
            .files
            .insert(scope, contents.as_ref().to_vec());
    }

    /// Current bytes of `scope`, `None` if it was never written.
    pub fn file(&self, scope: Scope) -> Option<Vec<u8>> {
        self.state().files.get(&scope).cloned()
    }

    /// Current content of `scope` as text.
    pub fn file_str(&self, scope: Scope) -> Option<String> {
        self.file(scope)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Make the read accessor of `scope` fail.
    pub fn fail_read(&self, scope: Scope, kind: ErrorKind) {
        self.state().read_faults.insert(scope, kind);
    }

    /// Make opening a writer for `scope` fail.
    pub fn fail_open(&self, scope: Scope, kind: ErrorKind) {
        self.state().open_faults.insert(scope, kind);
    }

    /// Make reads from and writes to an already opened stream of `scope` fail.
    pub fn fail_stream(&self, scope: Scope, kind: ErrorKind) {
        self.state().stream_faults.insert(scope, kind);
    }

    /// Scopes for which a writer was successfully opened, in order.
    pub fn writers_opened(&self) -> Vec<Scope> {
        self.state().writers_opened.clone()
    }

    /// Scopes whose writer was closed successfully, in order.
    pub fn writes_committed(&self) -> Vec<Scope> {
        self.state().writes_committed.clone()
    }

    /// Streams handed out and not yet dropped.
    pub fn open_streams(&self) -> usize {
        self.state().open_streams
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_bytes(&self, scope: Scope) -> Result<Vec<u8>> {
        let state = self.state();
        if let Some(kind) = state.read_faults.get(&scope) {
            return Err(Error::io(path_of(scope), io::Error::from(*kind)));
        }
        state
            .files
            .get(&scope)
            .cloned()
            .ok_or_else(|| Error::io(path_of(scope), io::Error::from(ErrorKind::NotFound)))
    }

    fn open_writer(&self, scope: Scope) -> Result<MemoryWriter> {
        let mut state = self.state();
        if let Some(kind) = state.open_faults.get(&scope) {
            return Err(Error::io(path_of(scope), io::Error::from(*kind)));
        }
        state.writers_opened.push(scope);
        let fault = state.stream_faults.get(&scope).copied();
        drop(state);

        Ok(MemoryWriter {
            scope,
            buffer: Vec::new(),
            fault,
            store: self.clone(),
            _guard: StreamGuard::new(self),
        })
    }
}

fn path_of(scope: Scope) -> PathBuf {
    PathBuf::from(format!("memory://{scope}"))
}

/// Counts a stream as open until dropped.
#[derive(Debug)]
struct StreamGuard {
    store: MemoryStore,
}

impl StreamGuard {
    fn new(store: &MemoryStore) -> Self {
        store.state().open_streams += 1;
        Self {
            store: store.clone(),
        }
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.store.state().open_streams -= 1;
    }
}

/// Local config stream handed out by [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryReader {
    cursor: Cursor<Vec<u8>>,
    fault: Option<ErrorKind>,
    _guard: StreamGuard,
}

impl Read for MemoryReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.fault {
            Some(kind) => Err(io::Error::from(kind)),
            None => self.cursor.read(buf),
        }
    }
}

/// Writer handed out by [`MemoryStore`]; content lands in the store on close.
#[derive(Debug)]
pub struct MemoryWriter {
    scope: Scope,
    buffer: Vec<u8>,
    fault: Option<ErrorKind>,
    store: MemoryStore,
    _guard: StreamGuard,
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.fault {
            return Err(io::Error::from(kind));
        }
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ScopeWriter for MemoryWriter {
    fn close(self) -> Result<()> {
        let mut state = self.store.state();
        state.files.insert(self.scope, self.buffer.clone());
        state.writes_committed.push(self.scope);
        Ok(())
    }
}

impl ScopeStore for MemoryStore {
    type LocalReader = MemoryReader;
    type Writer = MemoryWriter;

    fn system_config(&self) -> Result<Vec<u8>> {
        self.read_bytes(Scope::System)
    }

    fn user_config(&self) -> Result<Vec<u8>> {
        self.read_bytes(Scope::User)
    }

    fn local_config(&self) -> Result<MemoryReader> {
        let bytes = self.read_bytes(Scope::Local)?;
        let fault = self.state().stream_faults.get(&Scope::Local).copied();
        Ok(MemoryReader {
            cursor: Cursor::new(bytes),
            fault,
            _guard: StreamGuard::new(self),
        })
    }

    fn system_config_writer(&self) -> Result<MemoryWriter> {
        self.open_writer(Scope::System)
    }

    fn user_config_writer(&self) -> Result<MemoryWriter> {
        self.open_writer(Scope::User)
    }

    fn local_config_writer(&self) -> Result<MemoryWriter> {
        self.open_writer(Scope::Local)
    }
}
