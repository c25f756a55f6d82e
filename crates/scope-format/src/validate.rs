//! Structural validation applied before a config is written

use crate::{Config, Error, Key, Options, Result};
use regex::Regex;
use std::sync::LazyLock;

static SECTION_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("Invalid section name regex"));

static OPTION_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").expect("Invalid option name regex"));

/// Check that every name and value in `config` can be written and read back.
///
/// Section names are letters, digits and `-`; option names start with a
/// letter followed by letters, digits or `-`. Subsection names may not hold
/// a newline or NUL, and values may not hold NUL.
pub fn validate(config: &Config) -> Result<()> {
    for section in config.sections() {
        if !SECTION_NAME_REGEX.is_match(section.name()) {
            return Err(Error::validation(
                format!("[{}]", section.name()),
                "section names may only contain letters, digits and '-'",
            ));
        }
        validate_options(section.name(), None, section.options())?;

        for subsection in section.subsections() {
            if subsection.name().contains(['\n', '\0']) {
                return Err(Error::validation(
                    format!("[{} {:?}]", section.name(), subsection.name()),
                    "subsection names may not contain newlines or NUL",
                ));
            }
            validate_options(section.name(), Some(subsection.name()), subsection.options())?;
        }
    }
    Ok(())
}

fn validate_options(section: &str, subsection: Option<&str>, options: &Options) -> Result<()> {
    for option in options {
        let key = Key::new(section, subsection, &option.key);
        if !OPTION_NAME_REGEX.is_match(&option.key) {
            return Err(Error::validation(
                key.to_string(),
                "option names must start with a letter and contain only letters, digits and '-'",
            ));
        }
        if option.value.contains('\0') {
            return Err(Error::validation(key.to_string(), "values may not contain NUL"));
        }
    }
    Ok(())
}
