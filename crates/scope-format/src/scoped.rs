//! Scope-tagged configs and the merged view

use crate::{Config, Error, Key, Result, Scope, decode, encode, validate};
use std::ops::{Deref, DerefMut};

/// A [`Config`] read from, or destined for, exactly one physical scope.
///
/// The scope is fixed at construction; only the contents can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedConfig {
    scope: Scope,
    config: Config,
}

impl ScopedConfig {
    /// Create an empty config for `scope`. Fails for [`Scope::Merged`].
    pub fn try_new(scope: Scope) -> Result<Self> {
        Self::with_config(scope, Config::new())
    }

    /// Tag an existing config with `scope`. Fails for [`Scope::Merged`].
    pub fn with_config(scope: Scope, config: Config) -> Result<Self> {
        if !scope.is_physical() {
            return Err(Error::NotPhysical { scope });
        }
        Ok(Self { scope, config })
    }

    pub fn system() -> Self {
        Self {
            scope: Scope::System,
            config: Config::new(),
        }
    }

    pub fn user() -> Self {
        Self {
            scope: Scope::User,
            config: Config::new(),
        }
    }

    pub fn local() -> Self {
        Self {
            scope: Scope::Local,
            config: Config::new(),
        }
    }

    /// Decode `bytes` into a config tagged with `scope`.
    pub fn unmarshal(scope: Scope, bytes: &[u8]) -> Result<Self> {
        let config = decode::decode_bytes(bytes)?;
        Self::with_config(scope, config)
    }

    /// Validate and encode this config.
    pub fn marshal(&self) -> Result<Vec<u8>> {
        self.validate()?;
        Ok(encode::encode(&self.config).into_bytes())
    }

    pub fn validate(&self) -> Result<()> {
        validate::validate(&self.config)
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Deref for ScopedConfig {
    type Target = Config;

    fn deref(&self) -> &Config {
        &self.config
    }
}

impl DerefMut for ScopedConfig {
    fn deref_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

/// The effective configuration built from all three physical scopes.
///
/// Lookups consult Local, then User, then System and stop at the first
/// scope that defines the key. The constituent configs stay available so
/// the whole structure can be written back scope by scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    system: ScopedConfig,
    user: ScopedConfig,
    local: ScopedConfig,
}

impl MergedConfig {
    pub fn scope(&self) -> Scope {
        Scope::Merged
    }

    pub fn scoped(&self, scope: Scope) -> Option<&ScopedConfig> {
        match scope {
            Scope::System => Some(&self.system),
            Scope::User => Some(&self.user),
            Scope::Local => Some(&self.local),
            Scope::Merged => None,
        }
    }

    pub fn scoped_mut(&mut self, scope: Scope) -> Option<&mut ScopedConfig> {
        match scope {
            Scope::System => Some(&mut self.system),
            Scope::User => Some(&mut self.user),
            Scope::Local => Some(&mut self.local),
            Scope::Merged => None,
        }
    }

    /// Constituent configs in the order System, User, Local.
    pub fn scoped_configs(&self) -> [&ScopedConfig; 3] {
        [&self.system, &self.user, &self.local]
    }

    fn by_precedence(&self) -> [&ScopedConfig; 3] {
        [&self.local, &self.user, &self.system]
    }

    /// Effective value of `key`.
    pub fn get(&self, key: &Key) -> Option<&str> {
        self.by_precedence().into_iter().find_map(|c| c.get(key))
    }

    /// Every value of `key` from the highest-precedence scope defining it.
    pub fn get_all(&self, key: &Key) -> Vec<&str> {
        self.by_precedence()
            .into_iter()
            .find(|c| c.contains(key))
            .map(|c| c.get_all(key))
            .unwrap_or_default()
    }

    /// Which scope supplies the effective value of `key`.
    pub fn origin(&self, key: &Key) -> Option<Scope> {
        self.by_precedence()
            .into_iter()
            .find(|c| c.contains(key))
            .map(ScopedConfig::scope)
    }

    /// Flatten the three scopes into one config.
    pub fn view(&self) -> Config {
        let mut merged = self.system.config.clone();
        merged.overlay(&self.user.config);
        merged.overlay(&self.local.config);
        merged
    }

    /// Set `key` in the Local scope, which makes it the effective value.
    pub fn set(&mut self, key: &Key, value: impl Into<String>) {
        self.local.set(key, value);
    }

    /// Append a value to `key` in the Local scope.
    pub fn add(&mut self, key: &Key, value: impl Into<String>) {
        self.local.add(key, value);
    }

    /// Remove `key` from the Local scope.
    ///
    /// Values in User or System stay visible through the merged view.
    pub fn unset(&mut self, key: &Key) -> bool {
        self.local.unset(key)
    }

    /// Validate every constituent, System first.
    pub fn validate(&self) -> Result<()> {
        self.scoped_configs()
            .into_iter()
            .try_for_each(ScopedConfig::validate)
    }
}

/// Combine physical scoped configs into a [`MergedConfig`].
///
/// Scopes not supplied are treated as empty. Supplying a scope twice is an
/// error, since there would be no way to tell which one wins.
pub fn merge(configs: impl IntoIterator<Item = ScopedConfig>) -> Result<MergedConfig> {
    let mut system = None;
    let mut user = None;
    let mut local = None;

    for config in configs {
        let slot = match config.scope() {
            Scope::System => &mut system,
            Scope::User => &mut user,
            Scope::Local => &mut local,
            scope @ Scope::Merged => return Err(Error::NotPhysical { scope }),
        };
        if slot.is_some() {
            return Err(Error::DuplicateScope {
                scope: config.scope(),
            });
        }
        *slot = Some(config);
    }

    Ok(MergedConfig {
        system: system.unwrap_or_else(ScopedConfig::system),
        user: user.unwrap_or_else(ScopedConfig::user),
        local: local.unwrap_or_else(ScopedConfig::local),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> Key {
        Key::parse(s).unwrap()
    }

    fn scoped(scope: Scope, text: &str) -> ScopedConfig {
        ScopedConfig::unmarshal(scope, text.as_bytes()).unwrap()
    }

    #[test]
    fn merged_scope_cannot_tag_a_scoped_config() {
        assert!(matches!(
            ScopedConfig::try_new(Scope::Merged),
            Err(Error::NotPhysical { .. })
        ));
    }

    #[test]
    fn local_beats_user_beats_system() {
        let merged = merge([
            scoped(Scope::System, "[core]\nbare = false\neditor = vi\n"),
            scoped(Scope::User, "[core]\neditor = nano\n[user]\nname = Alice\n"),
            scoped(Scope::Local, "[core]\nbare = true\n"),
        ])
        .unwrap();

        assert_eq!(merged.get(&key("core.bare")), Some("true"));
        assert_eq!(merged.get(&key("core.editor")), Some("nano"));
        assert_eq!(merged.get(&key("user.name")), Some("Alice"));
        assert_eq!(merged.origin(&key("core.bare")), Some(Scope::Local));
        assert_eq!(merged.origin(&key("core.editor")), Some(Scope::User));
        assert_eq!(merged.origin(&key("missing.key")), None);
    }

    #[test]
    fn supply_order_does_not_affect_precedence() {
        let merged = merge([
            scoped(Scope::Local, "[core]\nbare = true\n"),
            scoped(Scope::System, "[core]\nbare = false\n"),
        ])
        .unwrap();
        assert_eq!(merged.get(&key("core.bare")), Some("true"));
    }

    #[test]
    fn view_matches_point_lookups() {
        let merged = merge([
            scoped(Scope::System, "[core]\nbare = false\n[gc]\nauto = 0\n"),
            scoped(Scope::Local, "[core]\nbare = true\n"),
        ])
        .unwrap();

        let view = merged.view();
        for (k, v) in view.entries() {
            assert_eq!(merged.get(&k), Some(v), "mismatch for {k}");
        }
        assert_eq!(view.get(&key("gc.auto")), Some("0"));
    }

    #[test]
    fn get_all_uses_only_the_winning_scope() {
        let merged = merge([
            scoped(Scope::System, "[remote \"o\"]\nfetch = a\nfetch = b\n"),
            scoped(Scope::User, "[remote \"o\"]\nfetch = c\n"),
        ])
        .unwrap();
        assert_eq!(merged.get_all(&key("remote.o.fetch")), vec!["c"]);
    }

    #[test]
    fn duplicate_scope_is_rejected() {
        let result = merge([ScopedConfig::user(), ScopedConfig::user()]);
        assert!(matches!(
            result,
            Err(Error::DuplicateScope { scope: Scope::User })
        ));
    }

    #[test]
    fn missing_scopes_are_empty() {
        let merged = merge([]).unwrap();
        for config in merged.scoped_configs() {
            assert!(config.is_empty());
        }
        assert_eq!(
            merged.scoped_configs().map(ScopedConfig::scope),
            Scope::PHYSICAL
        );
    }

    #[test]
    fn merged_setters_write_to_local() {
        let mut merged = merge([scoped(Scope::User, "[user]\nname = Alice\n")]).unwrap();
        merged.set(&key("user.name"), "Bob");

        assert_eq!(merged.get(&key("user.name")), Some("Bob"));
        assert_eq!(
            merged.scoped(Scope::User).unwrap().get(&key("user.name")),
            Some("Alice")
        );
        assert_eq!(merged.origin(&key("user.name")), Some(Scope::Local));

        assert!(merged.unset(&key("user.name")));
        assert_eq!(merged.get(&key("user.name")), Some("Alice"));
        assert!(!merged.unset(&key("user.name")));
    }

    #[test]
    fn marshal_refuses_invalid_config() {
        let mut config = ScopedConfig::local();
        config.set(&key("core.bad_name"), "x");
        assert!(matches!(config.marshal(), Err(Error::Validation { .. })));
    }
}
