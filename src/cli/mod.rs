//! Command-line interface.
//!
//! Without a subcommand the TUI is launched, optionally with a video that is
//! uploaded right away. Subcommands run headless.

mod common;
pub mod completions;
mod transcribe;

pub use common::*;

use crate::config::Config;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing::info;

/// Turn podcast videos into transcript-based clips from the terminal
#[derive(Parser, Debug)]
#[command(name = "podclip", version, about = "Turn podcast videos into transcript-based clips from the terminal", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    /// Video to upload as soon as the TUI starts
    pub video: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Disable colors in the TUI (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the transcript for a video and print its segments
    Transcribe {
        /// Path to the video file
        video: PathBuf,
        /// Print the transcription data as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the configuration file location and contents
    Config,
    /// Show the log file location
    Logs,
    /// Generate shell completions
    Completions {
        /// Target shell, detected from the environment when omitted
        shell: Option<Shell>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::Transcribe { video, json }) => transcribe::run(&video, json),
            Some(Commands::Config) => Self::cmd_config(),
            Some(Commands::Logs) => Self::cmd_logs(),
            Some(Commands::Completions { shell }) => completions::generate(shell),
            None => {
                // No command provided, launch TUI
                Ok(())
            }
        }
    }

    fn cmd_config() -> Result<()> {
        info!("CLI: config command executed");
        let config_path = crate::utils::get_config_path();
        let config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;
        let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;

        print_info(&format!("Config file: {}", config_path.display()));
        println!();
        println!("{}", content);
        Ok(())
    }

    fn cmd_logs() -> Result<()> {
        let log_file = crate::utils::get_log_dir().join("podclip.log");
        println!("{}", log_file.display());
        print_info(&format!("View logs in real-time: tail -f {:?}", log_file));
        Ok(())
    }
}
