use chrono::Local;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::{formatting, output};
use crate::ledger::ExpenseDraft;

use super::{parse_amount, parse_index, print_totals};

const DATE_FLAG: &str = "--date";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add <amount> <category> [note] [--date YYYY-MM-DD]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Replace the expense at a position",
            "edit <index> <date> <amount> <category> [note]",
            cmd_edit,
        ),
        CommandEntry::new(
            "delete",
            "Remove the expense at a position",
            "delete <index>",
            cmd_delete,
        ),
        CommandEntry::new("list", "Show all expenses and totals", "list", cmd_list),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (date, positional) = split_date_flag(args)?;
    let (amount, category, note) = match positional.as_slice() {
        [amount, category, note @ ..] => (*amount, *category, note.join(" ")),
        _ => {
            return Err(CommandError::InvalidArguments(
                "`add` needs an amount and a category".into(),
            ))
        }
    };
    let date = date.unwrap_or_else(today);
    let draft = ExpenseDraft::new(date, parse_amount(amount)?, category, note);

    let position = context.ledger.add_expense(draft)?;
    output::success(format!("Expense #{position} added."));
    print_totals(context);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (index, date, amount, category, note) = match args {
        [index, date, amount, category, note @ ..] => {
            (*index, *date, *amount, *category, note.join(" "))
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "`edit` needs an index, date, amount and category".into(),
            ))
        }
    };
    let index = parse_index(index)?;
    let draft = ExpenseDraft::new(date, parse_amount(amount)?, category, note);

    context.ledger.update_expense(index, draft)?;
    output::success(format!("Expense #{index} updated."));
    print_totals(context);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments(
            "`delete` needs exactly one index".into(),
        ));
    };
    let index = parse_index(raw)?;

    let removed = context.ledger.delete_expense(index)?;
    output::success(format!(
        "Deleted #{index}: {} {} {}",
        removed.date,
        context.money(removed.amount),
        removed.category
    ));
    if index < context.ledger.list_expenses().len() {
        output::hint("Later expenses moved up one position. Run `list` before the next edit.");
    }
    print_totals(context);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records = context.ledger.list_expenses();
    if records.is_empty() {
        output::info("No expenses recorded yet.");
        return Ok(());
    }
    output::section("Expenses");
    for line in formatting::expense_table(records) {
        output::info(line);
    }
    print_totals(context);
    Ok(())
}

/// Pulls `--date <value>` out of `args`, returning it and the remaining positionals.
fn split_date_flag<'a>(args: &[&'a str]) -> Result<(Option<String>, Vec<&'a str>), CommandError> {
    let mut date = None;
    let mut positional = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == DATE_FLAG {
            let value = iter.next().ok_or_else(|| {
                CommandError::InvalidArguments(format!("`{DATE_FLAG}` needs a value"))
            })?;
            date = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--date=") {
            date = Some(value.to_string());
        } else {
            positional.push(*arg);
        }
    }
    Ok((date, positional))
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
