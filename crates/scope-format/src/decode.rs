//! Decoder for the INI-style config format
//!
//! Accepts the git-config dialect:
//!
//! ```text
//! # comment
//! [core]
//!     bare = false
//! [remote "origin"]
//!     url = https://example.com/repo ; trailing comment
//!     fetch = "+refs/heads/*:refs/remotes/origin/*"
//! ```

use crate::{Config, Error, Result};

/// Decode raw bytes into a [`Config`]. The input must be UTF-8.
pub fn decode_bytes(bytes: &[u8]) -> Result<Config> {
    decode(std::str::from_utf8(bytes)?)
}

/// Decode text into a [`Config`].
///
/// A bare option name without `=` has the value `true`. Line numbers in
/// [`Error::Parse`] are 1-based.
pub fn decode(text: &str) -> Result<Config> {
    let lines: Vec<&str> = text.lines().collect();
    let mut config = Config::new();
    let mut current: Option<(String, Option<String>)> = None;
    let mut index = 0;

    while index < lines.len() {
        let line_no = index + 1;
        let line = lines[index].trim_start();
        index += 1;

        let body = match line.strip_prefix('[') {
            Some(header) => {
                let (section, subsection, tail) = parse_header(header, line_no)?;
                let created = config.section_mut(&section);
                if let Some(subsection) = &subsection {
                    created.subsection_mut(subsection);
                }
                current = Some((section, subsection));
                tail.trim_start()
            }
            None => line,
        };

        if is_blank_or_comment(body) {
            continue;
        }

        let Some((section, subsection)) = &current else {
            return Err(Error::parse(line_no, "option outside of any section"));
        };
        let (name, value) = parse_option(body, &lines, &mut index, line_no)?;

        let target = config.section_mut(section);
        let options = match subsection {
            Some(subsection) => target.subsection_mut(subsection).options_mut(),
            None => target.options_mut(),
        };
        options.add(name, value);
    }

    Ok(config)
}

fn is_blank_or_comment(s: &str) -> bool {
    s.is_empty() || s.starts_with('#') || s.starts_with(';')
}

fn is_section_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.'
}

fn is_option_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Parse what follows `[` up to and including `]`.
///
/// Returns the section name, the optional subsection and the rest of the line.
fn parse_header(rest: &str, line: usize) -> Result<(String, Option<String>, &str)> {
    let name_end = rest
        .find(|c: char| !is_section_char(c))
        .unwrap_or(rest.len());
    let name = &rest[..name_end];
    if name.is_empty() {
        return Err(Error::parse(line, "missing section name"));
    }

    let after = rest[name_end..].trim_start();
    if after.is_empty() {
        return Err(Error::parse(line, "unterminated section header"));
    }
    if let Some((section, subsection)) = name.split_once('.') {
        // Legacy `[section.subsection]` form; the subsection is lowercased
        let tail = after
            .strip_prefix(']')
            .ok_or_else(|| Error::parse(line, format!("invalid header of section '{name}'")))?;
        if section.is_empty() || subsection.is_empty() {
            return Err(Error::parse(line, format!("invalid section name '{name}'")));
        }
        return Ok((
            section.to_string(),
            Some(subsection.to_ascii_lowercase()),
            tail,
        ));
    }
    if let Some(tail) = after.strip_prefix(']') {
        return Ok((name.to_string(), None, tail));
    }
    let Some(quoted) = after.strip_prefix('"') else {
        return Err(Error::parse(
            line,
            format!("invalid character in header of section '{name}'"),
        ));
    };

    let mut subsection = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => subsection.push(escaped),
                None => break,
            },
            '"' => {
                let tail = quoted[i + 1..]
                    .strip_prefix(']')
                    .ok_or_else(|| Error::parse(line, "expected ']' after subsection name"))?;
                return Ok((name.to_string(), Some(subsection), tail));
            }
            c => subsection.push(c),
        }
    }

    Err(Error::parse(line, "unterminated subsection name"))
}

fn parse_option<'a>(
    body: &'a str,
    lines: &[&'a str],
    index: &mut usize,
    line: usize,
) -> Result<(&'a str, String)> {
    let name_end = body
        .find(|c: char| !is_option_char(c))
        .unwrap_or(body.len());
    let name = &body[..name_end];
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(Error::parse(line, format!("invalid option name in '{body}'")));
    }

    let rest = body[name_end..].trim_start();
    if is_blank_or_comment(rest) {
        return Ok((name, "true".to_string()));
    }
    let Some(raw) = rest.strip_prefix('=') else {
        return Err(Error::parse(line, format!("expected '=' after '{name}'")));
    };

    let value = parse_value(raw, lines, index, line)?;
    Ok((name, value))
}

/// Parse a value, following `\` line continuations into `lines[*index..]`.
///
/// Whitespace outside quotes is held back until more text follows, which
/// trims both ends while keeping inner runs intact.
fn parse_value<'a>(
    first: &'a str,
    lines: &[&'a str],
    index: &mut usize,
    line: usize,
) -> Result<String> {
    let mut value = String::new();
    let mut pending = String::new();
    let mut quoted = false;
    let mut line_no = line;
    let mut chars = first.chars();

    loop {
        let Some(c) = chars.next() else {
            if quoted {
                return Err(Error::parse(line_no, "unterminated quoted value"));
            }
            break;
        };

        match c {
            '\\' => {
                let literal = match chars.next() {
                    None => match lines.get(*index) {
                        Some(next) => {
                            *index += 1;
                            line_no += 1;
                            chars = next.chars();
                            continue;
                        }
                        None => break,
                    },
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('b') => '\u{8}',
                    Some('\\') => '\\',
                    Some('"') => '"',
                    Some(other) => {
                        return Err(Error::parse(
                            line_no,
                            format!("invalid escape sequence '\\{other}'"),
                        ));
                    }
                };
                push_char(&mut value, &mut pending, literal);
            }
            '"' => quoted = !quoted,
            '#' | ';' if !quoted => break,
            c if c.is_whitespace() && !quoted => pending.push(c),
            c => push_char(&mut value, &mut pending, c),
        }
    }

    Ok(value)
}

fn push_char(value: &mut String, pending: &mut String, c: char) {
    if !value.is_empty() {
        value.push_str(pending);
    }
    pending.clear();
    value.push(c);
}
