//! Configuration scopes

use serde::Serialize;

/// Where a configuration value lives.
///
/// `System`, `User` and `Local` are physical sources backed by a file.
/// `Merged` is the synthetic view built from all three and is never read
/// from or written to directly.
///
/// The derived ordering follows precedence: `System < User < Local`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Machine-wide configuration
    System,
    /// Per-user configuration
    #[serde(rename = "global")]
    User,
    /// Configuration of the current repository
    Local,
    /// Combined view of the three physical scopes
    Merged,
}

impl Scope {
    /// Physical scopes in resolution order, lowest precedence first.
    pub const PHYSICAL: [Scope; 3] = [Scope::System, Scope::User, Scope::Local];

    /// Whether this scope is backed by a real source.
    pub fn is_physical(self) -> bool {
        !matches!(self, Scope::Merged)
    }

    /// Precedence rank, higher wins. `Merged` ranks above every physical scope.
    pub fn rank(self) -> u8 {
        match self {
            Scope::System => 0,
            Scope::User => 1,
            Scope::Local => 2,
            Scope::Merged => 3,
        }
    }

    /// The name used on the command line and in listings.
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::System => "system",
            Scope::User => "global",
            Scope::Local => "local",
            Scope::Merged => "merged",
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
