use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::config::Locale;

use super::{usage, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new(
            "locale",
            "Show or change the language of schedule labels",
            "locale [es|en]",
            cmd_locale,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(command) => {
                output::section(format!("Help: {}", command.name));
                output::info(format!("  {}", command.description));
                output::info(format!("  Usage: {}", command.usage));
            }
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    output::section("Available commands");
    for command in context.registry.iter() {
        output::info(format!("  {:<14} {}", command.name, command.description));
    }
    output::hint("Use `help <command>` for details.");
    Ok(())
}

fn cmd_locale(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = match args {
        [] => {
            output::info(format!("Locale: {}", context.config.locale.code()));
            return Ok(());
        }
        [raw] => *raw,
        _ => return Err(usage(context, "locale")),
    };
    let locale = Locale::parse(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown locale `{raw}`; use es or en"))
    })?;

    context.config.locale = locale;
    match context.config_manager.save(&context.config) {
        Ok(()) => output::success(format!("Locale set to {}.", locale.code())),
        Err(err) => {
            tracing::warn!(error = %err, "config save failed");
            output::warning(format!("Locale set to {} for this session only.", locale.code()));
        }
    }
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
