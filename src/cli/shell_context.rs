//! Shared runtime state for CLI interactions and command execution.

use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm};
use rust_decimal::Decimal;
use strsim::levenshtein;

use crate::{
    cli::{
        commands,
        core::{CliError, CliMode, CommandError, LoopControl},
        formatting, output,
        registry::{CommandEntry, CommandRegistry},
    },
    config::{self, Config, ConfigManager},
    ledger::{self, LedgerService},
    utils::paths,
};

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: LedgerService,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub data_dir: PathBuf,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_data_dir(mode, paths::app_data_dir())
    }

    /// Loads configuration from `data_dir` and opens the ledger it points to.
    pub fn with_data_dir(mode: CliMode, data_dir: PathBuf) -> Result<Self, CliError> {
        let config_manager = config::manager_with_base(data_dir.clone())?;
        let config = config_manager.load()?;
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);
        let ledger = ledger::open_ledger(&config, &data_dir)?;

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            ledger,
            config,
            config_manager,
            data_dir,
            last_command: None,
            running: true,
        })
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        format!("spendbook [{}]> ", self.ledger.list_expenses().len())
    }

    /// Formats an amount with two decimals and the configured currency label.
    pub fn money(&self, amount: Decimal) -> String {
        formatting::money(amount, &self.config.currency)
    }

    /// Persists `config` and makes it the active configuration.
    pub fn update_config(&mut self, config: Config) -> Result<(), CommandError> {
        self.config_manager.save(&config)?;
        output::set_color_enabled(config.ui_color_enabled && self.mode == CliMode::Interactive);
        self.config = config;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    /// Prints a command failure. Input problems get a usage hint; storage
    /// failures are flagged as system errors the user cannot fix by retyping.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            err if err.is_user_error() => {
                output::error(&err);
                if let Some(usage) = self.last_usage() {
                    output::hint(format!("Usage: {usage}"));
                } else {
                    output::hint("Use `help <command>` for usage details.");
                }
            }
            err => {
                output::error(format!("System error: {err}"));
                output::hint("The change was not applied. Check the data files and retry.");
            }
        }
    }

    fn last_usage(&self) -> Option<&'static str> {
        let name = self
            .last_command
            .as_deref()?
            .split_whitespace()
            .next()?
            .to_lowercase();
        self.command(&name).map(|entry| entry.usage)
    }
}
