//! CLI for the convtrack page simulator.
//!
//! Every invocation is one page session: it opens the file-backed store,
//! loads the page at the given path, delivers the requested browser event and
//! prints what the page would show.

mod commands;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use convtrack_core::config;
use convtrack_core::store::FileStore;
use std::path::PathBuf;

use commands::{run_clear, run_load, run_select, run_status, run_submit, run_unload};
use session::Browser;

/// Top-level CLI for the conversion completion tracker.
#[derive(Debug, Parser)]
#[command(name = "convtrack")]
#[command(about = "convtrack: simulate the conversion page's completion tracking", long_about = None)]
pub struct Cli {
    /// Store file standing in for the browser's localStorage.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Config file (default: ~/.config/convtrack/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Load a page (path or absolute URL) and show what it renders.
    Load {
        /// Page path such as `/` or `/download/abc123`, or a full URL.
        target: String,
        /// Wait for scheduled timers and follow redirects.
        #[arg(long)]
        follow: bool,
    },

    /// Load the form page and submit the conversion form.
    Submit {
        /// Page hosting the form.
        #[arg(long, default_value = "/")]
        path: String,
    },

    /// Load a page and fire the pre-navigation (beforeunload) event.
    Unload {
        /// Page being left.
        #[arg(long, default_value = "/")]
        path: String,
    },

    /// Load a page and click one of the processing options.
    Select {
        /// Option element id.
        option: String,
        /// Page hosting the options.
        #[arg(long, default_value = "/")]
        path: String,
    },

    /// Show the persisted tracking record.
    Status,

    /// Remove the persisted tracking record.
    Clear,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let store_path = match cli.store {
            Some(path) => path,
            None => FileStore::default_path()?,
        };
        let browser = Browser::new(cfg, store_path);

        match cli.command {
            CliCommand::Load { target, follow } => run_load(&browser, &target, follow).await?,
            CliCommand::Submit { path } => run_submit(&browser, &path)?,
            CliCommand::Unload { path } => run_unload(&browser, &path)?,
            CliCommand::Select { option, path } => run_select(&browser, &path, &option)?,
            CliCommand::Status => run_status(&browser)?,
            CliCommand::Clear => run_clear(&browser)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
