//! Shell context, dispatch, and error reporting.

use std::{io, sync::Arc};

use dialoguer::{theme::ColorfulTheme, Confirm};
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{app_base_dir, Config, ConfigManager},
    core::{
        services::ServiceError,
        store::{FinanceStore, LoadSource},
        time::SystemClock,
    },
    errors::LedgerError,
    storage::JsonStorage,
    utils::format::format_currency,
};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Failures of a single command; reported and the shell keeps going.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: FinanceStore,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Opens the configured store under the application directory. Opening
    /// also runs the startup recurrence sweep.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = app_base_dir();
        let config_manager = ConfigManager::with_base_dir(&base)?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(config.resolve_data_dir(&base))?;
        tracing::debug!(root = %storage.root().display(), "opening finance store");
        let store = FinanceStore::open(
            Arc::new(storage),
            Arc::new(SystemClock),
            config.storage_key.clone(),
        );

        let context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.announce_load();
        Ok(context)
    }

    fn announce_load(&self) {
        match self.store.load_source() {
            LoadSource::Stored => {}
            LoadSource::Fresh => output::info("Starting with the default categories and accounts."),
            LoadSource::Recovered => {
                output::warning("Stored data could not be read; starting from defaults.")
            }
        }
    }

    pub fn prompt(&self) -> String {
        format!("finance [{}]> ", self.money(self.store.total_balance()))
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    /// Formats an amount with the configured currency symbol.
    pub fn money(&self, amount: f64) -> String {
        format_currency(&self.config.currency_symbol, amount, true)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|def| def.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                output::hint(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_keep_their_message() {
        let err: CommandError = ServiceError::SameAccount.into();
        assert_eq!(err.to_string(), "Source and destination accounts must differ");
    }
}
