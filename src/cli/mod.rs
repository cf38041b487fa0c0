//! Interactive menu shell and one-shot commands over the expense ledger.

pub mod commands;
pub mod output;
pub mod prompts;
pub mod render;
mod shell;
pub mod table;

pub use shell::{run_cli, MenuAction, Session};

use thiserror::Error;

use crate::config::{Config, ConfigError, ConfigManager};
use crate::core::services::ServiceError;
use crate::errors::LedgerError;

pub const SCRIPT_ENV: &str = "EXPENSE_LEDGER_CLI_SCRIPT";

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("End of input")]
    EndOfInput,
}

/// Loads the user's configuration, falling back to defaults with a warning so a
/// broken `config.json` never blocks the ledger.
pub fn load_config(manager: &ConfigManager) -> Config {
    match manager.load() {
        Ok(config) => config,
        Err(err) => {
            output::warning(format!("Using default configuration: {err}"));
            Config::default()
        }
    }
}
