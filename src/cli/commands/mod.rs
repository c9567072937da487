use std::collections::HashMap;

pub mod entry;
pub mod quick;
pub mod report;
pub mod system;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(report::definitions());
    commands.extend(entry::definitions());
    commands.extend(quick::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }

    pub(crate) fn usage_error(&self) -> CommandError {
        CommandError::InvalidArguments(format!("usage: {}", self.usage))
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    raw.trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid amount")))
}

pub(crate) fn usage(context: &ShellContext, name: &str) -> CommandError {
    context
        .command(name)
        .map(CommandDefinition::usage_error)
        .unwrap_or_else(|| CommandError::InvalidArguments(format!("bad arguments for `{name}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_symbol_and_grouping() {
        assert_eq!(parse_amount("$1,250.50").unwrap(), 1250.5);
        assert_eq!(parse_amount("42").unwrap(), 42.0);
        assert!(parse_amount("forty").is_err());
    }

    #[test]
    fn registry_preserves_definition_order() {
        let registry = CommandRegistry::new(all_definitions());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.first(), Some(&"summary"));
        assert!(names.contains(&"sweep"));
        assert!(registry.get("transfer").is_some());
        assert_eq!(registry.iter().count(), names.len());
    }
}
