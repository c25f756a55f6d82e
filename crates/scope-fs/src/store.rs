//! The scope store seam
//!
//! [`ScopeStore`] is everything the resolver and writer need from storage:
//! raw bytes per scope on the way in, one writable stream per scope on the
//! way out. [`FsScopeStore`] backs it with the files of a [`ScopeLayout`].

use crate::io::{AtomicFile, read_file};
use crate::{Error, Result, ScopeLayout};
use std::fs::File;
use std::io::{Read, Write};

/// A writable stream for one scope.
///
/// Dropping the writer releases it; only [`ScopeWriter::close`] makes the
/// written bytes visible.
pub trait ScopeWriter: Write {
    /// Persist everything written so far and release the stream.
    fn close(self) -> Result<()>;
}

/// Source and sink of raw configuration bytes for each physical scope.
///
/// Missing sources are reported as errors for which
/// [`Error::is_not_found`] is true; refused access as errors for which
/// [`Error::is_permission_denied`] is true.
pub trait ScopeStore {
    type LocalReader: Read;
    type Writer: ScopeWriter;

    /// Contents of the machine-wide config.
    fn system_config(&self) -> Result<Vec<u8>>;

    /// Contents of the per-user config.
    fn user_config(&self) -> Result<Vec<u8>>;

    /// A stream over the repository-local config.
    fn local_config(&self) -> Result<Self::LocalReader>;

    fn system_config_writer(&self) -> Result<Self::Writer>;

    fn user_config_writer(&self) -> Result<Self::Writer>;

    fn local_config_writer(&self) -> Result<Self::Writer>;
}

impl ScopeWriter for AtomicFile {
    fn close(self) -> Result<()> {
        self.commit()
    }
}

/// Scope store over real files.
#[derive(Debug, Clone)]
pub struct FsScopeStore {
    layout: ScopeLayout,
}

impl FsScopeStore {
    pub fn new(layout: ScopeLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ScopeLayout {
        &self.layout
    }
}

impl ScopeStore for FsScopeStore {
    type LocalReader = File;
    type Writer = AtomicFile;

    fn system_config(&self) -> Result<Vec<u8>> {
        tracing::trace!(path = %self.layout.system().display(), "Reading system config");
        read_file(self.layout.system())
    }

    fn user_config(&self) -> Result<Vec<u8>> {
        tracing::trace!(path = %self.layout.user().display(), "Reading user config");
        read_file(self.layout.user())
    }

    fn local_config(&self) -> Result<File> {
        let path = self.layout.local();
        tracing::trace!(path = %path.display(), "Opening local config");
        File::open(path).map_err(|e| Error::io(path, e))
    }

    fn system_config_writer(&self) -> Result<AtomicFile> {
        AtomicFile::create(self.layout.system())
    }

    fn user_config_writer(&self) -> Result<AtomicFile> {
        AtomicFile::create(self.layout.user())
    }

    fn local_config_writer(&self) -> Result<AtomicFile> {
        AtomicFile::create(self.layout.local())
    }
}
