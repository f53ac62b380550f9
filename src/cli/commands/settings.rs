use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change saved preferences",
        "config [currency <label> | color <on|off>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            show_config(context);
            Ok(())
        }
        [key, value] => {
            let mut updated = context.config.clone();
            match key.to_lowercase().as_str() {
                "currency" => updated.currency = parse_label(value)?,
                "color" => updated.ui_color_enabled = parse_toggle(value)?,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown setting `{other}` (expected `currency` or `color`)"
                    )))
                }
            }
            context.update_config(updated)?;
            output::success(format!("Saved `{key}` = {value}."));
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "`config` takes a setting name and a value".into(),
        )),
    }
}

fn show_config(context: &ShellContext) {
    output::section("Preferences");
    let color = if context.config.ui_color_enabled { "on" } else { "off" };
    output::info(format!("  {:<10} {}", "currency", context.config.currency));
    output::info(format!("  {:<10} {}", "color", color));
    output::info(format!(
        "  {:<10} {}",
        "file",
        context.config_manager.config_path().display()
    ));
}

fn parse_label(raw: &str) -> Result<String, CommandError> {
    let label = raw.trim();
    if label.is_empty() {
        return Err(CommandError::InvalidArguments(
            "currency label must not be empty".into(),
        ));
    }
    Ok(label.to_string())
}

fn parse_toggle(raw: &str) -> Result<bool, CommandError> {
    match raw.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{raw}` is not on or off"
        ))),
    }
}
