//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use scope_format::Scope;

/// Read and write layered git-style configuration
#[derive(Parser, Debug)]
#[command(name = "scopecfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in <DIR>
    #[arg(short = 'C', value_name = "DIR", global = true)]
    pub directory: Option<PathBuf>,

    /// Tool whose configuration files are used (`.<tool>`, `~/.<tool>config`)
    #[arg(long, global = true, env = "SCOPECFG_TOOL", default_value = "git")]
    pub tool: String,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Scope selection shared by every command. At most one flag may be given.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct ScopeArgs {
    /// Use the machine-wide config
    #[arg(long)]
    pub system: bool,

    /// Use the per-user config
    #[arg(long)]
    pub global: bool,

    /// Use the repository config
    #[arg(long)]
    pub local: bool,
}

impl ScopeArgs {
    /// The scope named by the flags, if any.
    pub fn selected(&self) -> Option<Scope> {
        if self.system {
            Some(Scope::System)
        } else if self.global {
            Some(Scope::User)
        } else if self.local {
            Some(Scope::Local)
        } else {
            None
        }
    }

    /// The scope to write to; repository config unless told otherwise.
    pub fn write_target(&self) -> Scope {
        self.selected().unwrap_or(Scope::Local)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value of a key
    ///
    /// Without a scope flag the effective value is printed, taken from the
    /// repository, user or system config in that order. Exits with status 1
    /// if the key is not set.
    ///
    /// Examples:
    ///   scopecfg get user.name
    ///   scopecfg get --all remote.origin.fetch
    ///   scopecfg get --show-scope core.editor
    Get {
        /// Key in `section[.subsection].name` form
        key: String,

        /// Print every value of a multi-valued key
        #[arg(long)]
        all: bool,

        /// Prefix each value with the scope it came from
        #[arg(long)]
        show_scope: bool,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Set a key, replacing all of its values
    Set {
        /// Key in `section[.subsection].name` form
        key: String,

        /// New value
        value: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Append a value to a key
    Add {
        /// Key in `section[.subsection].name` form
        key: String,

        /// Value to append
        value: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Remove every value of a key
    ///
    /// Exits with status 1 if the key was not set in that scope.
    Unset {
        /// Key in `section[.subsection].name` form
        key: String,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// List keys and values
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// Prefix each entry with the scope it came from
        #[arg(long)]
        show_scope: bool,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
