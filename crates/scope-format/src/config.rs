//! Keyed configuration structure
//!
//! A [`Config`] is an ordered list of sections. Each section holds options
//! and named subsections, so both `[core]` and `[remote "origin"]` map onto
//! it. Section and option names compare case-insensitively; subsection names
//! compare exactly.

use crate::Key;

/// A single `name = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigOption {
    pub key: String,
    pub value: String,
}

impl ConfigOption {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Options of one section or subsection, in file order.
///
/// A key may appear more than once; the last occurrence is its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(Vec<ConfigOption>);

impl Options {
    pub fn iter(&self) -> std::slice::Iter<'_, ConfigOption> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|o| o.key.eq_ignore_ascii_case(key))
            .map(|o| o.value.as_str())
    }

    /// All values for `key`, in file order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|o| o.key.eq_ignore_ascii_case(key))
            .map(|o| o.value.as_str())
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.iter().any(|o| o.key.eq_ignore_ascii_case(key))
    }

    /// Replace every value of `key` with a single value.
    ///
    /// The first occurrence keeps its position; later ones are dropped.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter().position(|o| o.key.eq_ignore_ascii_case(key)) {
            Some(first) => {
                self.0[first].value = value;
                let mut index = 0;
                self.0.retain(|o| {
                    let keep = index <= first || !o.key.eq_ignore_ascii_case(key);
                    index += 1;
                    keep
                });
            }
            None => self.0.push(ConfigOption::new(key, value)),
        }
    }

    /// Append another value for `key`.
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        self.0.push(ConfigOption::new(key, value));
    }

    /// Remove every value of `key`. Returns whether anything was removed.
    pub fn unset(&mut self, key: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|o| !o.key.eq_ignore_ascii_case(key));
        self.0.len() != before
    }

    /// Override with `other` key by key: each key present in `other`
    /// takes exactly `other`'s values, every other key is left alone.
    pub fn overlay(&mut self, other: &Options) {
        let mut seen: Vec<&str> = Vec::new();
        for option in &other.0 {
            if seen.iter().any(|k| k.eq_ignore_ascii_case(&option.key)) {
                continue;
            }
            seen.push(&option.key);
            self.unset(&option.key);
            for value in other.get_all(&option.key) {
                self.add(&option.key, value);
            }
        }
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = &'a ConfigOption;
    type IntoIter = std::slice::Iter<'a, ConfigOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A `[section "name"]` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subsection {
    name: String,
    options: Options,
}

impl Subsection {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}

/// A `[section]` block together with its subsections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    options: Options,
    subsections: Vec<Subsection>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Options::default(),
            subsections: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn subsections(&self) -> &[Subsection] {
        &self.subsections
    }

    pub fn subsection(&self, name: &str) -> Option<&Subsection> {
        self.subsections.iter().find(|s| s.name == name)
    }

    /// Get a subsection, creating it at the end if it does not exist.
    pub fn subsection_mut(&mut self, name: &str) -> &mut Subsection {
        let index = match self.subsections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.subsections.push(Subsection {
                    name: name.to_string(),
                    options: Options::default(),
                });
                self.subsections.len() - 1
            }
        };
        &mut self.subsections[index]
    }

    pub fn remove_subsection(&mut self, name: &str) -> bool {
        let before = self.subsections.len();
        self.subsections.retain(|s| s.name != name);
        self.subsections.len() != before
    }
}

/// A parsed configuration file: sections, keys and string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    sections: Vec<Section>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no sections at all.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Get a section, creating it at the end if it does not exist.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        let index = match self
            .sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
        {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    /// Remove a whole section, or only one of its subsections.
    pub fn remove_section(&mut self, name: &str, subsection: Option<&str>) -> bool {
        match subsection {
            Some(subsection) => self
                .sections
                .iter_mut()
                .filter(|s| s.name.eq_ignore_ascii_case(name))
                .any(|s| s.remove_subsection(subsection)),
            None => {
                let before = self.sections.len();
                self.sections.retain(|s| !s.name.eq_ignore_ascii_case(name));
                self.sections.len() != before
            }
        }
    }

    fn options(&self, key: &Key) -> Option<&Options> {
        let section = self.section(key.section())?;
        match key.subsection() {
            Some(subsection) => section.subsection(subsection).map(Subsection::options),
            None => Some(section.options()),
        }
    }

    fn options_mut(&mut self, key: &Key) -> &mut Options {
        let section = self.section_mut(key.section());
        match key.subsection() {
            Some(subsection) => section.subsection_mut(subsection).options_mut(),
            None => section.options_mut(),
        }
    }

    /// Last value of `key`, if any.
    pub fn get(&self, key: &Key) -> Option<&str> {
        self.options(key)?.get(key.name())
    }

    /// Every value of `key`, in file order.
    pub fn get_all(&self, key: &Key) -> Vec<&str> {
        self.options(key)
            .map(|options| options.get_all(key.name()))
            .unwrap_or_default()
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.options(key).is_some_and(|o| o.has(key.name()))
    }

    /// Set `key` to a single value, creating its section if needed.
    pub fn set(&mut self, key: &Key, value: impl Into<String>) {
        self.options_mut(key).set(key.name(), value);
    }

    /// Append a value to a multi-valued key.
    pub fn add(&mut self, key: &Key, value: impl Into<String>) {
        self.options_mut(key).add(key.name(), value);
    }

    /// Remove every value of `key`. Empty sections are kept.
    pub fn unset(&mut self, key: &Key) -> bool {
        let Some(section) = self
            .sections
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(key.section()))
        else {
            return false;
        };
        match key.subsection() {
            Some(subsection) => section
                .subsections
                .iter_mut()
                .find(|s| s.name == subsection)
                .is_some_and(|s| s.options.unset(key.name())),
            None => section.options.unset(key.name()),
        }
    }

    /// Every `(key, value)` pair in document order.
    pub fn entries(&self) -> impl Iterator<Item = (Key, &str)> + '_ {
        self.sections.iter().flat_map(|section| {
            let own = section
                .options
                .iter()
                .map(move |o| (Key::new(&section.name, None, &o.key), o.value.as_str()));
            let nested = section.subsections.iter().flat_map(move |sub| {
                sub.options.iter().map(move |o| {
                    (
                        Key::new(&section.name, Some(&sub.name), &o.key),
                        o.value.as_str(),
                    )
                })
            });
            own.chain(nested)
        })
    }

    /// Apply `other` on top of this config.
    ///
    /// The override is per fully-qualified key: a key defined in `other`
    /// replaces all of this config's values for it, keys only present here
    /// survive unchanged, and sections only present in `other` are added.
    pub fn overlay(&mut self, other: &Config) {
        for section in &other.sections {
            let target = self.section_mut(&section.name);
            target.options.overlay(&section.options);
            for sub in &section.subsections {
                target.subsection_mut(&sub.name).options.overlay(&sub.options);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> Key {
        Key::parse(s).unwrap()
    }

    #[test]
    fn get_returns_last_value() {
        let mut config = Config::new();
        config.add(&key("remote.origin.fetch"), "a");
        config.add(&key("remote.origin.fetch"), "b");

        assert_eq!(config.get(&key("remote.origin.fetch")), Some("b"));
        assert_eq!(config.get_all(&key("remote.origin.fetch")), vec!["a", "b"]);
    }

    #[test]
    fn lookups_ignore_case_of_section_and_name_only() {
        let mut config = Config::new();
        config.set(&key("Core.Bare"), "true");
        config.set(&key("remote.Origin.url"), "x");

        assert_eq!(config.get(&key("core.bare")), Some("true"));
        assert_eq!(config.get(&key("REMOTE.Origin.URL")), Some("x"));
        assert_eq!(config.get(&key("remote.origin.url")), None);
    }

    #[test]
    fn set_collapses_multiple_values_in_place() {
        let mut options = Options::default();
        options.add("a", "1");
        options.add("b", "2");
        options.add("a", "3");
        options.set("a", "9");

        let pairs: Vec<_> = options.iter().map(|o| (o.key.as_str(), o.value.as_str())).collect();
        assert_eq!(pairs, vec![("a", "9"), ("b", "2")]);
    }

    #[test]
    fn unset_reports_whether_a_value_was_removed() {
        let mut config = Config::new();
        config.set(&key("user.name"), "Alice");

        assert!(config.unset(&key("user.name")));
        assert!(!config.unset(&key("user.name")));
        assert!(!config.unset(&key("missing.key")));
        assert!(config.has_section("user"));
    }

    #[test]
    fn remove_section_handles_subsections_separately() {
        let mut config = Config::new();
        config.set(&key("remote.origin.url"), "a");
        config.set(&key("remote.upstream.url"), "b");

        assert!(config.remove_section("remote", Some("origin")));
        assert_eq!(config.get(&key("remote.upstream.url")), Some("b"));
        assert!(config.remove_section("remote", None));
        assert!(config.is_empty());
    }

    #[test]
    fn overlay_overrides_per_key_not_per_section() {
        let mut base = Config::new();
        base.set(&key("core.bare"), "false");
        base.set(&key("core.editor"), "vi");

        let mut top = Config::new();
        top.set(&key("core.bare"), "true");
        top.set(&key("user.name"), "Alice");

        base.overlay(&top);

        assert_eq!(base.get(&key("core.bare")), Some("true"));
        assert_eq!(base.get(&key("core.editor")), Some("vi"));
        assert_eq!(base.get(&key("user.name")), Some("Alice"));
    }

    #[test]
    fn overlay_replaces_all_values_of_a_multi_valued_key() {
        let mut base = Config::new();
        base.add(&key("remote.origin.fetch"), "a");
        base.add(&key("remote.origin.fetch"), "b");

        let mut top = Config::new();
        top.add(&key("remote.origin.fetch"), "c");

        base.overlay(&top);
        assert_eq!(base.get_all(&key("remote.origin.fetch")), vec!["c"]);
    }

    #[test]
    fn entries_lists_keys_in_document_order() {
        let mut config = Config::new();
        config.set(&key("core.bare"), "false");
        config.set(&key("remote.origin.url"), "u");
        config.set(&key("user.name"), "n");

        let keys: Vec<String> = config.entries().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["core.bare", "remote.origin.url", "user.name"]);
    }
}
