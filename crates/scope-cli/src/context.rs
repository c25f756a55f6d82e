//! Command context detection
//!
//! Locates the tool's metadata directory from any subdirectory and derives
//! the scope layout, so commands work from anywhere inside a repository.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use scope_core::ConfigStorage;
use scope_format::Scope;
use scope_fs::{FsScopeStore, ScopeLayout, discover_metadata_dir};

use crate::error::{CliError, Result};

/// Where a command runs and which files it operates on.
#[derive(Debug, Clone)]
pub struct ConfigContext {
    tool: String,
    metadata_dir: Option<PathBuf>,
    layout: ScopeLayout,
}

impl ConfigContext {
    /// Detect the context for `tool` starting at `cwd`.
    pub fn detect(tool: &str, cwd: &Path) -> Result<Self> {
        Self::detect_with_env(tool, cwd, |name| std::env::var_os(name))
    }

    /// Like [`ConfigContext::detect`] with an explicit environment lookup.
    pub fn detect_with_env<F>(tool: &str, cwd: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let metadata_dir = match discover_metadata_dir(tool, cwd) {
            Ok(dir) => Some(dir),
            Err(scope_fs::Error::RepositoryNotFound { .. }) => None,
            Err(e) => return Err(e.into()),
        };

        // Outside a repository the local file does not exist and reads as empty
        let local_dir = metadata_dir
            .clone()
            .unwrap_or_else(|| cwd.join(format!(".{tool}")));
        let layout = ScopeLayout::for_tool_with_env(tool, &local_dir, env)?;

        tracing::debug!(
            tool,
            in_repository = metadata_dir.is_some(),
            "Detected command context"
        );
        Ok(Self {
            tool: tool.to_string(),
            metadata_dir,
            layout,
        })
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn layout(&self) -> &ScopeLayout {
        &self.layout
    }

    /// Whether a `.<tool>` directory was found.
    pub fn in_repository(&self) -> bool {
        self.metadata_dir.is_some()
    }

    pub fn storage(&self) -> ConfigStorage<FsScopeStore> {
        ConfigStorage::open(self.layout.clone())
    }

    /// Refuse to write repository config when there is no repository.
    pub fn require_writable(&self, scope: Scope) -> Result<()> {
        if scope == Scope::Local && !self.in_repository() {
            return Err(CliError::user(format!(
                "not in a {tool} repository (no .{tool} directory found); use --global or --system",
                tool = self.tool
            )));
        }
        Ok(())
    }
}
