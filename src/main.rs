//! StreamVault - movie & TV discovery from the terminal
//!
//! # Usage
//!
//! ```bash
//! streamvault browse
//! streamvault search "blade runner"
//! streamvault movies
//! streamvault title tt0816692 --json
//! ```

use clap::Parser;

use streamvault::cli::{Cli, Command, Output};
use streamvault::commands;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output = Output::new(&cli);

    let exit_code = match cli.command {
        Command::Browse => commands::browse_cmd(&output).await,
        Command::Search(cmd) => commands::search_cmd(cmd, &output).await,
        Command::Series => commands::series_cmd(&output).await,
        Command::Movies => commands::movies_cmd(&output).await,
        Command::Popular => commands::popular_cmd(&output).await,
        Command::Title(cmd) => commands::title_cmd(cmd, &output).await,
        Command::Config(cmd) => commands::config_cmd(cmd, &output),
    };

    std::process::exit(exit_code.into());
}
