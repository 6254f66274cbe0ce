//! CLI for the heroes API.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use heroes_core::config;
use heroes_core::{CurlTransport, HeroService, MessageLog};
use std::sync::Arc;

use commands::{
    print_messages, run_add, run_completions, run_list, run_live, run_remove, run_rename,
    run_search, run_show,
};

/// Top-level CLI for the heroes API.
#[derive(Debug, Parser)]
#[command(name = "heroes")]
#[command(about = "Browse, search and edit heroes on a remote heroes API", long_about = None)]
pub struct Cli {
    /// Collection endpoint, overriding `base_url` from config.toml.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List all heroes.
    List,

    /// Search heroes by name once.
    Search {
        /// Name fragment; blank searches nothing.
        query: String,
    },

    /// Show one hero by ID.
    Show {
        /// Hero identifier.
        id: i64,
    },

    /// Create a hero; the server assigns its ID.
    Add {
        /// Hero name.
        name: String,
    },

    /// Rename an existing hero.
    Rename {
        /// Hero identifier.
        id: i64,
        /// New name.
        name: String,
    },

    /// Delete a hero by ID.
    Remove {
        /// Hero identifier.
        id: i64,
    },

    /// Live search: each stdin line is a keystroke-level query; results print as they settle.
    Live {
        /// Quiet window in milliseconds (default: debounce_ms from config).
        #[arg(long, value_name = "MS")]
        debounce_ms: Option<u64>,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = &cli.command {
            run_completions(*shell);
            return Ok(());
        }

        let mut cfg = config::load_or_init()?;
        if let Some(url) = cli.base_url {
            cfg.base_url = url;
        }
        tracing::debug!("loaded config: {:?}", cfg);

        let messages = MessageLog::new();
        let transport = Arc::new(CurlTransport::new().with_timeout(cfg.timeout()));
        let service = Arc::new(HeroService::new(transport, &cfg.base_url, messages.clone())?);
        tracing::debug!(base_url = service.base_url(), "hero service ready");

        match cli.command {
            CliCommand::List => run_list(&service).await,
            CliCommand::Search { query } => run_search(&service, &query).await,
            CliCommand::Show { id } => run_show(&service, id).await,
            CliCommand::Add { name } => run_add(&service, &name).await,
            CliCommand::Rename { id, name } => run_rename(&service, id, &name).await,
            CliCommand::Remove { id } => run_remove(&service, id).await,
            CliCommand::Live { debounce_ms } => {
                let window = debounce_ms
                    .map(std::time::Duration::from_millis)
                    .unwrap_or_else(|| cfg.debounce());
                run_live(Arc::clone(&service), window).await?;
            }
            CliCommand::Completions { .. } => {}
        }

        print_messages(&messages);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
