//! `set`, `add` and `unset`: modify one scope
//!
//! Each command resolves the current state, changes the selected scope and
//! writes only that scope back.

use scope_core::ConfigStorage;
use scope_format::{Key, Scope, ScopedConfig};
use scope_fs::{FsScopeStore, ScopeStore};

use super::{Outcome, parse_key};
use crate::context::ConfigContext;
use crate::error::{CliError, Result};

/// Replace every value of `key` in `scope` with `value`.
pub fn run_set(ctx: &ConfigContext, key: &str, value: &str, scope: Scope) -> Result<Outcome> {
    modify(ctx, key, scope, |config, key| {
        config.set(key, value);
        true
    })
}

/// Append `value` to `key` in `scope`.
pub fn run_add(ctx: &ConfigContext, key: &str, value: &str, scope: Scope) -> Result<Outcome> {
    modify(ctx, key, scope, |config, key| {
        config.add(key, value);
        true
    })
}

/// Remove `key` from `scope`. Reports [`Outcome::NotFound`] if it was not set there.
pub fn run_unset(ctx: &ConfigContext, key: &str, scope: Scope) -> Result<Outcome> {
    modify(ctx, key, scope, |config, key| config.unset(key))
}

fn modify<F>(ctx: &ConfigContext, key: &str, scope: Scope, change: F) -> Result<Outcome>
where
    F: FnOnce(&mut ScopedConfig, &Key) -> bool,
{
    ctx.require_writable(scope)?;
    let key = parse_key(key)?;
    let storage = ctx.storage();

    let mut merged = storage.resolve()?;
    let config = merged
        .scoped_mut(scope)
        .ok_or_else(|| CliError::user(format!("cannot write to the {scope} scope")))?;

    if !change(config, &key) {
        tracing::debug!(key = %key, scope = %scope, "Nothing to change");
        return Ok(Outcome::NotFound);
    }

    storage.persist(&*config)?;
    if scope == Scope::System && !system_write_landed(&storage, config) {
        tracing::debug!(key = %key, "System config left unchanged");
        return Ok(Outcome::Skipped);
    }
    tracing::debug!(key = %key, scope = %scope, "Updated config");
    Ok(Outcome::Success)
}

/// Whether the System file now holds exactly `config`.
fn system_write_landed(storage: &ConfigStorage<FsScopeStore>, config: &ScopedConfig) -> bool {
    match (storage.store().system_config(), config.marshal()) {
        (Ok(on_disk), Ok(expected)) => on_disk == expected,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context as context;
    use scope_test_utils::TestScopes;

    #[test]
    fn set_writes_only_the_selected_scope() {
        let scopes = TestScopes::new();
        scopes.write(Scope::System, "[core]\n\tbare = false\n");

        let outcome = run_set(&context(&scopes), "core.bare", "true", Scope::Local).unwrap();

        assert_eq!(outcome, Outcome::Success);
        scopes.assert_contains(Scope::Local, "bare = true");
        scopes.assert_contains(Scope::System, "bare = false");
        scopes.assert_missing(Scope::User);
    }

    #[test]
    fn set_replaces_existing_values() {
        let scopes = TestScopes::new();
        scopes.write(Scope::User, "[user]\n\tname = Alice\n\tname = Al\n");

        run_set(&context(&scopes), "user.name", "Bob", Scope::User).unwrap();

        assert_eq!(
            scopes.read(Scope::User).as_deref(),
            Some("[user]\n\tname = Bob\n")
        );
    }

    #[test]
    fn add_appends_a_value() {
        let scopes = TestScopes::new();
        let ctx = context(&scopes);
        run_add(&ctx, "remote.origin.fetch", "a", Scope::Local).unwrap();
        run_add(&ctx, "remote.origin.fetch", "b", Scope::Local).unwrap();

        assert_eq!(
            scopes.read(Scope::Local).as_deref(),
            Some("[remote \"origin\"]\n\tfetch = a\n\tfetch = b\n")
        );
    }

    #[test]
    fn unset_reports_missing_key() {
        let scopes = TestScopes::new();
        scopes.write(Scope::Local, "[core]\n\tbare = true\n\teditor = vi\n");
        let ctx = context(&scopes);

        assert_eq!(
            run_unset(&ctx, "core.bare", Scope::Local).unwrap(),
            Outcome::Success
        );
        assert_eq!(
            run_unset(&ctx, "core.bare", Scope::Local).unwrap(),
            Outcome::NotFound
        );
        assert_eq!(
            scopes.read(Scope::Local).as_deref(),
            Some("[core]\n\teditor = vi\n")
        );
    }

    #[test]
    fn writable_system_scope_reports_success() {
        let scopes = TestScopes::new();
        let outcome = run_set(&context(&scopes), "core.bare", "true", Scope::System).unwrap();

        assert_eq!(outcome, Outcome::Success);
        scopes.assert_contains(Scope::System, "bare = true");
    }

    #[cfg(unix)]
    #[test]
    fn readonly_system_scope_reports_skipped() {
        use std::fs::{self, Permissions};
        use std::os::unix::fs::PermissionsExt;

        let scopes = TestScopes::new();
        scopes.write(Scope::System, "[core]\n\tbare = false\n");
        let path = scopes.path(Scope::System);
        fs::set_permissions(&path, Permissions::from_mode(0o444)).unwrap();
        if fs::OpenOptions::new().write(true).open(&path).is_ok() {
            eprintln!("Skipping test: running as root bypasses permission checks");
            return;
        }

        let outcome = run_set(&context(&scopes), "core.bare", "true", Scope::System).unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        scopes.assert_contains(Scope::System, "bare = false");
    }

    #[test]
    fn invalid_name_is_rejected_before_writing() {
        let scopes = TestScopes::new();
        let err = run_set(&context(&scopes), "core.bad_name", "x", Scope::Local).unwrap_err();

        assert!(matches!(
            err,
            CliError::Core(scope_core::Error::Validation { .. })
        ));
        scopes.assert_missing(Scope::Local);
    }
}
