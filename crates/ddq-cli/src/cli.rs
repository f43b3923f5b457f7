use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "ddq")]
#[command(about = "A design quote for every day of the year, read aloud")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show today's quote and read it aloud (default)
    Today {
        /// Show the quote for another date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Output as Markdown
        #[arg(long, conflicts_with = "json")]
        markdown: bool,
        /// Do not read the quote aloud
        #[arg(long)]
        no_speak: bool,
    },
    /// Read today's quote aloud and wait until it is finished
    #[command(alias = "again")]
    Read,
    /// Toggle automatic reading
    Mute,
    /// Pick the color theme
    Theme {
        /// Theme to use; `system` follows the operating system
        #[arg(value_enum)]
        theme: ThemeChoice,
    },
    /// List the available voices
    Voices {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select the reading voice by index, or `default`
    Voice {
        /// Voice index as listed by `ddq voices`, or `default`
        value: String,
    },
    /// Show stored preferences
    Prefs {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Keep the quote open and control it from the keyboard
    #[command(alias = "i")]
    Interactive,
    /// Manage the offline asset cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
    /// Build the notification for a push payload
    Notify {
        /// Push payload JSON (`{"title", "body", "primaryKey"}`); defaults to today's quote
        #[arg(long, value_name = "JSON")]
        payload: Option<String>,
        /// Simulate a click on the notification or one of its actions
        #[arg(long, value_name = "ACTION")]
        click: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (defaults to stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Download and store every asset of the current cache version
    Install,
    /// Remove caches left over from older versions
    Activate,
    /// Resolve an asset cache-first, falling back to the network
    Fetch {
        /// Asset URL, relative to the configured origin or absolute
        url: String,
        /// Treat the request as a page navigation
        #[arg(long)]
        navigate: bool,
        /// Write the response body to a file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Run a background sync event
    Sync {
        /// Sync tag
        #[arg(default_value = ddq_core::cache::BACKGROUND_SYNC_TAG)]
        tag: String,
    },
    /// Show cache status
    Status,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    System,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
