//! `list`: print every key and value

use std::io::Write;

use scope_format::Scope;
use serde::Serialize;

use super::Outcome;
use crate::context::ConfigContext;
use crate::error::Result;

/// One line of `list` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListEntry {
    pub key: String,
    pub value: String,
    pub scope: Scope,
}

/// List the entries of `scope`, or the merged view when no scope is given.
pub fn run_list(
    ctx: &ConfigContext,
    json: bool,
    show_scope: bool,
    scope: Option<Scope>,
    out: &mut impl Write,
) -> Result<Outcome> {
    let entries = collect_entries(ctx, scope)?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &entries)?;
        writeln!(out)?;
        return Ok(Outcome::Success);
    }

    for entry in &entries {
        if show_scope {
            writeln!(out, "{}\t{}={}", entry.scope, entry.key, entry.value)?;
        } else {
            writeln!(out, "{}={}", entry.key, entry.value)?;
        }
    }
    Ok(Outcome::Success)
}

fn collect_entries(ctx: &ConfigContext, scope: Option<Scope>) -> Result<Vec<ListEntry>> {
    let merged = ctx.storage().resolve()?;
    let view = merged.view();

    let entries = match scope.and_then(|s| merged.scoped(s)) {
        Some(config) => config
            .entries()
            .map(|(key, value)| ListEntry {
                key: key.to_string(),
                value: value.to_string(),
                scope: config.scope(),
            })
            .collect(),
        None => view
            .entries()
            .map(|(key, value)| ListEntry {
                scope: merged.origin(&key).unwrap_or(Scope::Merged),
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect(),
    };
    Ok(entries)
}
