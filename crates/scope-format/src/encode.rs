//! Encoder for the INI-style config format

use crate::{Config, Options};
use std::fmt::Write;

/// Encode a config as text.
///
/// A section header is written when the section has options of its own or
/// no subsections; each subsection gets its own `[name "sub"]` header.
/// Output of an empty config is empty.
pub fn encode(config: &Config) -> String {
    let mut out = String::new();

    for section in config.sections() {
        if !section.options().is_empty() || section.subsections().is_empty() {
            let _ = writeln!(out, "[{}]", section.name());
            write_options(&mut out, section.options());
        }
        for subsection in section.subsections() {
            let _ = writeln!(
                out,
                "[{} \"{}\"]",
                section.name(),
                escape_subsection(subsection.name())
            );
            write_options(&mut out, subsection.options());
        }
    }

    out
}

fn write_options(out: &mut String, options: &Options) {
    for option in options {
        let _ = writeln!(out, "\t{} = {}", option.key, quote_value(&option.value));
    }
}

fn escape_subsection(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains(['#', ';'])
}

fn quote_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            c => escaped.push(c),
        }
    }

    if needs_quotes(value) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}
