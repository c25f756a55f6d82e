//! Command implementations
//!
//! Each command writes its normal output to the given writer so it can be
//! exercised without spawning the binary.

mod get;
mod list;
mod set;

pub use get::run_get;
pub use list::run_list;
pub use set::{run_add, run_set, run_unset};

use std::process::ExitCode;

use scope_format::Key;

use crate::error::Result;

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The key had no value; reported through the exit status only
    NotFound,
    /// The System config was not writable and was left as it was
    Skipped,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success | Outcome::Skipped => ExitCode::SUCCESS,
            Outcome::NotFound => ExitCode::from(1),
        }
    }
}

pub(crate) fn parse_key(input: &str) -> Result<Key> {
    Ok(Key::parse(input)?)
}

/// Context over a [`TestScopes`](scope_test_utils::TestScopes) tree.
#[cfg(test)]
pub(crate) fn test_context(scopes: &scope_test_utils::TestScopes) -> crate::context::ConfigContext {
    use scope_format::Scope;

    crate::context::ConfigContext::detect_with_env(
        scope_test_utils::TEST_TOOL,
        &scopes.work_dir(),
        |name| match name {
            "TEST_CONFIG_SYSTEM" => Some(scopes.path(Scope::System).as_os_str().to_os_string()),
            "TEST_CONFIG_GLOBAL" => Some(scopes.path(Scope::User).as_os_str().to_os_string()),
            _ => None,
        },
    )
    .unwrap()
}
