//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::analyst::DEFAULT_API_URL;
use crate::render::RenderOptions;

#[derive(Parser, Debug)]
#[command(name = "analyst", about = "Terminal chat client for the AI Financial Analyst service", version)]
pub struct Cli {
    #[arg(long, env = "ANALYST_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, env = "ANALYST_CHART_DIR", help = "Directory chart images are saved to")]
    pub chart_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Print replies as raw markdown")]
    pub raw: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Log more to stderr (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive chat (default).
    Chat,
    /// Ask one question, print the answer, and exit.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }

    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { chart_dir: self.chart_dir.clone(), raw: self.raw }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
