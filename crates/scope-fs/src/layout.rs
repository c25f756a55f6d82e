//! Where each scope's file lives
//!
//! For a tool named `git` the default layout is:
//!
//! | scope  | path                    | override env var    |
//! |--------|-------------------------|---------------------|
//! | system | `/etc/gitconfig`        | `GIT_CONFIG_SYSTEM` |
//! | user   | `~/.gitconfig`          | `GIT_CONFIG_GLOBAL` |
//! | local  | `<repo>/.git/config`    | –                   |

use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name of the local config inside the metadata directory.
pub const LOCAL_CONFIG_FILE: &str = "config";

/// Paths of the three physical scope files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeLayout {
    system: PathBuf,
    user: PathBuf,
    local: PathBuf,
}

impl ScopeLayout {
    /// Use explicit paths for every scope.
    pub fn new(
        system: impl Into<PathBuf>,
        user: impl Into<PathBuf>,
        local: impl Into<PathBuf>,
    ) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            local: local.into(),
        }
    }

    /// Derive the standard layout for `tool` from the process environment.
    ///
    /// # Arguments
    ///
    /// * `tool` - Tool name, e.g. `git`
    /// * `metadata_dir` - The tool's per-repository directory, e.g. `.git`
    pub fn for_tool(tool: &str, metadata_dir: impl AsRef<Path>) -> Result<Self> {
        Self::for_tool_with_env(tool, metadata_dir, |name| std::env::var_os(name))
    }

    /// Like [`ScopeLayout::for_tool`] with an explicit environment lookup.
    pub fn for_tool_with_env<F>(tool: &str, metadata_dir: impl AsRef<Path>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let prefix = tool.to_ascii_uppercase().replace('-', "_");

        let system = match env(&format!("{prefix}_CONFIG_SYSTEM")) {
            Some(path) => PathBuf::from(path),
            None => system_config_dir(&env).join(format!("{tool}config")),
        };

        let user = match env(&format!("{prefix}_CONFIG_GLOBAL")) {
            Some(path) => PathBuf::from(path),
            None => dirs::home_dir()
                .ok_or(Error::HomeDirNotFound)?
                .join(format!(".{tool}config")),
        };

        let local = metadata_dir.as_ref().join(LOCAL_CONFIG_FILE);

        tracing::debug!(
            system = %system.display(),
            user = %user.display(),
            local = %local.display(),
            "Resolved scope layout"
        );
        Ok(Self {
            system,
            user,
            local,
        })
    }

    pub fn system(&self) -> &Path {
        &self.system
    }

    pub fn user(&self) -> &Path {
        &self.user
    }

    pub fn local(&self) -> &Path {
        &self.local
    }
}

#[cfg(windows)]
fn system_config_dir<F: Fn(&str) -> Option<OsString>>(env: &F) -> PathBuf {
    env("PROGRAMDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"))
}

#[cfg(not(windows))]
fn system_config_dir<F: Fn(&str) -> Option<OsString>>(_env: &F) -> PathBuf {
    PathBuf::from("/etc")
}

/// Find the nearest `.<tool>` directory at or above `start`.
///
/// Walks up the directory tree the way the tool itself locates its
/// repository, so commands work from any subdirectory.
pub fn discover_metadata_dir(tool: &str, start: &Path) -> Result<PathBuf> {
    let start = dunce::canonicalize(start).map_err(|e| Error::io(start, e))?;
    let marker = format!(".{tool}");

    for dir in start.ancestors() {
        let candidate = dir.join(&marker);
        if candidate.is_dir() {
            tracing::debug!(metadata_dir = %candidate.display(), "Found metadata directory");
            return Ok(candidate);
        }
    }

    Err(Error::RepositoryNotFound { marker, start })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn environment_overrides_system_and_user_paths() {
        let layout = ScopeLayout::for_tool_with_env(
            "git",
            "/repo/.git",
            env_from(&[
                ("GIT_CONFIG_SYSTEM", "/custom/system"),
                ("GIT_CONFIG_GLOBAL", "/custom/global"),
            ]),
        )
        .unwrap();

        assert_eq!(layout.system(), Path::new("/custom/system"));
        assert_eq!(layout.user(), Path::new("/custom/global"));
        assert_eq!(layout.local(), Path::new("/repo/.git/config"));
    }

    #[rstest]
    #[case::plain("demo", "DEMO")]
    #[case::dashed("my-tool", "MY_TOOL")]
    fn env_prefix_is_upcased_tool_name(#[case] tool: &str, #[case] prefix: &str) {
        let system_var = format!("{prefix}_CONFIG_SYSTEM");
        let global_var = format!("{prefix}_CONFIG_GLOBAL");
        let layout = ScopeLayout::for_tool_with_env(tool, "/repo/.x", |name: &str| {
            if name == system_var {
                Some(OsString::from("/s"))
            } else if name == global_var {
                Some(OsString::from("/u"))
            } else {
                None
            }
        })
        .unwrap();

        assert_eq!(layout.system(), Path::new("/s"));
        assert_eq!(layout.user(), Path::new("/u"));
    }

    #[cfg(not(windows))]
    #[test]
    fn default_system_path_is_under_etc() {
        let layout = ScopeLayout::for_tool_with_env(
            "toolx",
            "/repo/.toolx",
            env_from(&[("TOOLX_CONFIG_GLOBAL", "/u")]),
        )
        .unwrap();
        assert_eq!(layout.system(), Path::new("/etc/toolxconfig"));
    }
}
