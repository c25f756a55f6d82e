//! Atomic file writes with locking

use crate::{Error, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A pending replacement of `target`.
///
/// Bytes go to a temp file in the target's directory that is exclusively
/// locked for the lifetime of the writer. [`AtomicFile::commit`] renames it
/// over the target; dropping the writer without committing deletes it, so
/// the target is either fully replaced or untouched.
#[derive(Debug)]
pub struct AtomicFile {
    target: PathBuf,
    temp_path: PathBuf,
    file: Option<File>,
    permissions: Option<Permissions>,
    committed: bool,
}

impl AtomicFile {
    /// Open a writer that will replace `target`.
    ///
    /// A symlinked target is followed, so the file it points to is replaced
    /// and the link stays. An existing target must itself be writable and
    /// keeps its permissions. Missing parent directories are created.
    /// Failures (a read-only target, a directory the user cannot write) are
    /// returned as [`Error::Io`] with the original [`io::ErrorKind`].
    pub fn create(target: impl Into<PathBuf>) -> Result<Self> {
        let (target, permissions) = resolve_target(target.into())?;

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let temp_path = temp_path_for(&target);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .map_err(|e| Error::io(&temp_path, e))?;

        // Constructed before locking so a lock failure still removes the temp file
        let atomic = Self {
            target,
            temp_path,
            file: Some(file),
            permissions,
            committed: false,
        };
        if let Some(file) = &atomic.file {
            file.lock_exclusive().map_err(|source| Error::LockFailed {
                path: atomic.target.clone(),
                source,
            })?;
        }

        tracing::trace!(
            path = %atomic.target.display(),
            temp = %atomic.temp_path.display(),
            "Opened atomic writer"
        );
        Ok(atomic)
    }

    /// Flush to disk, release the lock and move the temp file into place.
    pub fn commit(mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.sync_all().map_err(|e| Error::io(&self.temp_path, e))?;
            FileExt::unlock(&file).map_err(|source| Error::LockFailed {
                path: self.target.clone(),
                source,
            })?;
        }
        if let Some(permissions) = self.permissions.take() {
            fs::set_permissions(&self.temp_path, permissions)
                .map_err(|e| Error::io(&self.temp_path, e))?;
        }

        fs::rename(&self.temp_path, &self.target).map_err(|e| Error::io(&self.target, e))?;
        self.committed = true;
        tracing::trace!(path = %self.target.display(), "Committed atomic write");
        Ok(())
    }

    fn file_mut(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("atomic writer already closed"))
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file_mut()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file_mut()?.flush()
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if !self.committed {
            // Close the handle before removing so this also works on Windows
            drop(self.file.take());
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

/// The file to replace and the permissions to carry over, if it exists.
fn resolve_target(requested: PathBuf) -> Result<(PathBuf, Option<Permissions>)> {
    let metadata = match fs::metadata(&requested) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok((requested, None)),
        Err(e) => return Err(Error::io(&requested, e)),
    };

    let target = dunce::canonicalize(&requested).map_err(|e| Error::io(&requested, e))?;
    OpenOptions::new()
        .write(true)
        .open(&target)
        .map_err(|e| Error::io(&target, e))?;

    tracing::trace!(
        requested = %requested.display(),
        path = %target.display(),
        "Resolved existing config"
    );
    Ok((target, Some(metadata.permissions())))
}

fn temp_path_for(target: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id(),
        TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed)
    );
    target.with_file_name(temp_name)
}

/// Read a whole file, keeping the path in the error.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}
