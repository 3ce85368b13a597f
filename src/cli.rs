//! CLI - Command Line Interface for StreamVault
//!
//! One subcommand per page mode, plus a single-title detail view.
//! All output is JSON-parseable with `--json`.
//!
//! # Examples
//!
//! ```bash
//! streamvault browse
//! streamvault search "blade runner"
//! streamvault title tt0816692 --json
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Upstream/network error
    NetworkError = 3,
    /// Title not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// StreamVault - movie & TV discovery from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "streamvault",
    version,
    about = "Movie & TV discovery backed by OMDb and YouTube",
    after_help = "EXAMPLES:\n\
                  streamvault browse                 Home page rails\n\
                  streamvault search \"blade runner\"  Search results\n\
                  streamvault series                 TV show rails\n\
                  streamvault title tt0816692        Full title detail\n\n\
                  Set OMDB_API_KEY / YOUTUBE_API_KEY (or the config file) for\n\
                  live data; without keys deterministic placeholders are served."
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse the home page (featured slider + topical rails)
    #[command(visible_alias = "b")]
    Browse,

    /// Search for movies and TV shows
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Browse TV show rails
    Series,

    /// Browse movie rails
    Movies,

    /// Browse popular/top-rated/classics rails
    #[command(visible_alias = "pop")]
    Popular,

    /// Show full detail for one title
    #[command(visible_alias = "t")]
    Title(TitleCmd),

    /// Show credential status or store API keys
    Config(ConfigCmd),
}

/// Search for movies and TV shows by query
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title, keywords)
    #[arg(required = true)]
    pub query: String,
}

/// Show full detail for one title by IMDb id
#[derive(Args, Debug)]
pub struct TitleCmd {
    /// IMDb id (e.g. tt0816692). Not validated locally; unknown or
    /// malformed ids surface as "not found".
    #[arg(required = true)]
    pub id: String,
}

/// Show or update stored API credentials. With no flags, reports which
/// keys are configured; with flags, persists them to the config file.
#[derive(Args, Debug)]
pub struct ConfigCmd {
    /// Store an OMDb API key
    #[arg(long, value_name = "KEY")]
    pub omdb_key: Option<String>,

    /// Store a YouTube Data API key
    #[arg(long, value_name = "KEY")]
    pub youtube_key: Option<String>,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON (used when `--json` is on)
    pub fn print_json<T: Serialize>(&self, data: &T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet and JSON modes)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::parse_from(["streamvault", "search", "batman"]);
        if let Command::Search(cmd) = cli.command {
            assert_eq!(cmd.query, "batman");
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_title_command() {
        let cli = Cli::parse_from(["streamvault", "title", "tt0816692"]);
        if let Command::Title(cmd) = cli.command {
            assert_eq!(cmd.id, "tt0816692");
        } else {
            panic!("Expected Title command");
        }
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::parse_from(["streamvault", "config", "--omdb-key", "abc123"]);
        if let Command::Config(cmd) = cli.command {
            assert_eq!(cmd.omdb_key.as_deref(), Some("abc123"));
            assert!(cmd.youtube_key.is_none());
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_config_command_without_flags() {
        let cli = Cli::parse_from(["streamvault", "config"]);
        if let Command::Config(cmd) = cli.command {
            assert!(cmd.omdb_key.is_none());
            assert!(cmd.youtube_key.is_none());
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["streamvault", "--json", "--quiet", "browse"]);
        assert!(cli.json);
        assert!(cli.quiet);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Error), 1);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::NetworkError), 3);
        assert_eq!(i32::from(ExitCode::NotFound), 4);
    }
}
