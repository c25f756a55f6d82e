//! [`TestScopes`]: real scope files under a temporary directory.

use scope_format::Scope;
use scope_fs::{FsScopeStore, ScopeLayout};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Tool name used for the fixture's metadata directory.
pub const TEST_TOOL: &str = "test";

/// A temporary tree laid out like a machine with one repository:
///
/// ```text
/// <tmp>/etc/testconfig        system
/// <tmp>/home/.testconfig      user
/// <tmp>/work/.test/config     local
/// ```
///
/// Nothing is created until a scope is written, except the `.test`
/// metadata directory itself.
pub struct TestScopes {
    temp_dir: TempDir,
    layout: ScopeLayout,
}

impl Default for TestScopes {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScopes {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let metadata_dir = root.join("work").join(format!(".{TEST_TOOL}"));
        fs::create_dir_all(&metadata_dir).unwrap();

        let layout = ScopeLayout::new(
            root.join("etc").join(format!("{TEST_TOOL}config")),
            root.join("home").join(format!(".{TEST_TOOL}config")),
            metadata_dir.join(scope_fs::LOCAL_CONFIG_FILE),
        );
        Self { temp_dir, layout }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The repository working directory containing `.test/`.
    pub fn work_dir(&self) -> PathBuf {
        self.root().join("work")
    }

    pub fn layout(&self) -> &ScopeLayout {
        &self.layout
    }

    pub fn store(&self) -> FsScopeStore {
        FsScopeStore::new(self.layout.clone())
    }

    /// Path of the file backing `scope`.
    ///
    /// # Panics
    /// Panics for [`Scope::Merged`].
    pub fn path(&self, scope: Scope) -> &Path {
        match scope {
            Scope::System => self.layout.system(),
            Scope::User => self.layout.user(),
            Scope::Local => self.layout.local(),
            Scope::Merged => panic!("merged scope has no file"),
        }
    }

    /// Write `contents` to the file of `scope`, creating parents.
    pub fn write(&self, scope: Scope, contents: &str) {
        let path = self.path(scope);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    /// Content of the file of `scope`, `None` if it does not exist.
    pub fn read(&self, scope: Scope) -> Option<String> {
        fs::read_to_string(self.path(scope)).ok()
    }

    /// Assert that the file of `scope` contains `content`.
    ///
    /// # Panics
    /// Panics if the file is missing or does not contain `content`.
    pub fn assert_contains(&self, scope: Scope, content: &str) {
        let path = self.path(scope);
        let text = self
            .read(scope)
            .unwrap_or_else(|| panic!("Could not read file: {}", path.display()));
        assert!(
            text.contains(content),
            "Expected {} to contain {content:?}, got:\n{text}",
            path.display()
        );
    }

    /// Assert that the file of `scope` does not exist.
    pub fn assert_missing(&self, scope: Scope) {
        let path = self.path(scope);
        assert!(
            !path.exists(),
            "Expected file NOT to exist: {}",
            path.display()
        );
    }
}
