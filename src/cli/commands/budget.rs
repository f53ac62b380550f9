use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

use super::{parse_amount, print_totals};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show total spend and remaining budget",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "budget",
            "Show or set the monthly budget",
            "budget [amount]",
            cmd_budget,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.ledger.summary();
    output::section("Summary");
    output::info(format!("Expenses: {}", summary.record_count));
    match summary.budget {
        Some(budget) => output::info(format!("Monthly budget: {}", context.money(budget))),
        None => output::info("Monthly budget: not set"),
    }
    print_totals(context);
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            match context.ledger.budget() {
                Some(budget) => output::info(format!("Monthly budget: {}", context.money(budget))),
                None => {
                    output::info("Monthly budget: not set");
                    output::hint("Set one with `budget <amount>`.");
                }
            }
            Ok(())
        }
        [amount] => {
            let amount = parse_amount(amount)?;
            context.ledger.set_budget(amount)?;
            output::success(format!("Monthly budget set to {}.", context.money(amount)));
            print_totals(context);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "`budget` takes at most one amount".into(),
        )),
    }
}
