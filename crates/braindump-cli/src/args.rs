use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "braindump")]
#[command(about = "Chat-style note-taking assistant with automatic categorization")]
#[command(version)]
pub struct Cli {
    /// Acting user identity (default: user.name from config)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Base directory (default: ~/.braindump)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save a note; it is filed into a category by keyword match
    Note {
        /// The note text (e.g. "todo buy milk")
        text: Vec<String>,
    },

    /// Define or redefine a custom category
    Newcat {
        /// Category name
        name: String,

        /// Comma-separated keywords (e.g. "cook,bake,stew")
        keywords: String,
    },

    /// List default and custom categories
    Categories,

    /// List stored entries as [Category] text
    List,

    /// Pick a new category for a stored entry
    Recat {
        /// Entry id as printed by `note` or `list`
        entry_id: String,
    },

    /// Apply an action token printed by `recat`
    Apply {
        /// Action token
        token: String,
    },

    /// Dismiss a pending `recat` prompt
    Cancel {
        /// Cancel token printed by `recat`
        token: String,
    },

    /// Export the raw data file
    Export {
        /// Destination path (default: ./braindump-export.json)
        dest: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// About braindump (and how to support it)
    About,

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "user.name")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g. "user.name")
        key: String,

        /// New value
        value: String,
    },

    /// List all config values
    List,

    /// Write a commented default config file
    Init,

    /// Print the config file path
    Path,
}
