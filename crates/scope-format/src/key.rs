//! Fully-qualified configuration keys

use crate::{Error, Result};
use std::str::FromStr;

/// A fully-qualified key: `section[.subsection].name`.
///
/// Section and option names are case-insensitive and stored lowercase.
/// The subsection is case-sensitive and kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    section: String,
    subsection: Option<String>,
    name: String,
}

impl Key {
    /// Build a key from its parts without parsing.
    pub fn new(section: &str, subsection: Option<&str>, name: &str) -> Self {
        Self {
            section: section.to_ascii_lowercase(),
            subsection: subsection.map(str::to_string),
            name: name.to_ascii_lowercase(),
        }
    }

    /// Parse the dotted form.
    ///
    /// Text before the first dot is the section and text after the last dot
    /// is the option name. Anything in between is the subsection, so
    /// `remote.origin.url` and `url.https://example.com/.insteadof` both work.
    ///
    /// # Example
    ///
    /// ```
    /// use scope_format::Key;
    ///
    /// let key = Key::parse("remote.origin.url").unwrap();
    /// assert_eq!(key.section(), "remote");
    /// assert_eq!(key.subsection(), Some("origin"));
    /// assert_eq!(key.name(), "url");
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidKey {
            key: input.to_string(),
            reason: reason.to_string(),
        };

        let (section, rest) = input
            .split_once('.')
            .ok_or_else(|| invalid("key does not contain a section"))?;
        let (subsection, name) = match rest.rsplit_once('.') {
            Some((subsection, name)) => (Some(subsection), name),
            None => (None, rest),
        };

        if section.is_empty() {
            return Err(invalid("section name is empty"));
        }
        if name.is_empty() {
            return Err(invalid("option name is empty"));
        }

        Ok(Self::new(section, subsection, name))
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn subsection(&self) -> Option<&str> {
        self.subsection.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subsection {
            Some(subsection) => write!(f, "{}.{}.{}", self.section, subsection, self.name),
            None => write!(f, "{}.{}", self.section, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("core.bare", "core", None, "bare")]
    #[case("Core.Bare", "core", None, "bare")]
    #[case("remote.origin.url", "remote", Some("origin"), "url")]
    #[case("branch.Feature.X.merge", "branch", Some("Feature.X"), "merge")]
    fn parses_dotted_keys(
        #[case] input: &str,
        #[case] section: &str,
        #[case] subsection: Option<&str>,
        #[case] name: &str,
    ) {
        let key = Key::parse(input).unwrap();
        assert_eq!(key.section(), section);
        assert_eq!(key.subsection(), subsection);
        assert_eq!(key.name(), name);
    }

    #[rstest]
    #[case("bare")]
    #[case(".bare")]
    #[case("core.")]
    #[case("remote.origin.")]
    fn rejects_incomplete_keys(#[case] input: &str) {
        assert!(matches!(Key::parse(input), Err(Error::InvalidKey { .. })));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let key = Key::new("remote", Some("Origin"), "URL");
        assert_eq!(key.to_string(), "remote.Origin.url");
        assert_eq!(key.to_string().parse::<Key>().unwrap(), key);
    }
}
