pub mod budget;
pub mod expense;
pub mod settings;
pub mod system;

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::shell_context::ShellContext;
use crate::cli::output;

const ROOT_COMMAND_ORDER: &[&str] = &[
    "add", "edit", "delete", "list", "summary", "budget", "config", "help", "version", "exit",
];

pub(crate) fn all_entries() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(expense::definitions());
    commands.extend(budget::definitions());
    commands.extend(settings::definitions());
    commands.extend(system::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let mut entries = all_entries();
    entries.sort_by_key(|entry| {
        ROOT_COMMAND_ORDER
            .iter()
            .position(|name| entry.name.eq_ignore_ascii_case(name))
            .unwrap_or(ROOT_COMMAND_ORDER.len())
    });
    for entry in entries {
        registry.register(entry);
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid amount")))
}

pub(crate) fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.trim().parse::<usize>().map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a valid record position"))
    })
}

/// Prints total spend and, when a positive budget is set, what remains of it.
pub(crate) fn print_totals(context: &ShellContext) {
    let summary = context.ledger.summary();
    output::info(format!(
        "Total spent: {}",
        context.money(summary.total_spent)
    ));
    if let Some(remaining) = summary.remaining {
        let line = format!("Remaining budget: {}", context.money(remaining));
        if summary.is_overspent() {
            output::warning(line);
        } else {
            output::info(line);
        }
    }
}
