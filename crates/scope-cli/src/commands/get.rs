//! `get`: print the value of one key

use std::io::Write;

use scope_format::Scope;

use super::{Outcome, parse_key};
use crate::context::ConfigContext;
use crate::error::Result;

/// Print the value of `key`.
///
/// With `scope` only that scope is consulted, otherwise the effective value
/// is printed. `all` prints every value of the winning scope.
pub fn run_get(
    ctx: &ConfigContext,
    key: &str,
    all: bool,
    show_scope: bool,
    scope: Option<Scope>,
    out: &mut impl Write,
) -> Result<Outcome> {
    let key = parse_key(key)?;
    let merged = ctx.storage().resolve()?;

    let (origin, values) = match scope.and_then(|s| merged.scoped(s)) {
        Some(config) => (Some(config.scope()), config.get_all(&key)),
        None => (merged.origin(&key), merged.get_all(&key)),
    };

    let Some(origin) = origin.filter(|_| !values.is_empty()) else {
        tracing::debug!(key = %key, "Key not set");
        return Ok(Outcome::NotFound);
    };

    let shown = if all {
        values.as_slice()
    } else {
        &values[values.len() - 1..]
    };
    for value in shown {
        if show_scope {
            writeln!(out, "{origin}\t{value}")?;
        } else {
            writeln!(out, "{value}")?;
        }
    }
    Ok(Outcome::Success)
}
