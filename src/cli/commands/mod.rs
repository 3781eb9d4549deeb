use std::collections::HashMap;

use chrono::NaiveDate;
use famfin_domain::JalaliDate;
use strsim::levenshtein;

pub mod asset;
pub mod calendar;
pub mod debt;
pub mod income;
pub mod member;
pub mod report;
pub mod system;

use crate::{cli::context::CliContext, errors::CliError};

pub type CommandResult = Result<(), CliError>;

pub type CommandHandler = fn(&mut CliContext, &[&str]) -> CommandResult;

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(calendar::definitions());
    commands.extend(member::definitions());
    commands.extend(asset::definitions());
    commands.extend(income::definitions());
    commands.extend(debt::definitions());
    commands.extend(report::definitions());
    commands.extend(system::definitions());
    commands
}

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

    /// Definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order.iter().filter_map(|name| self.commands.get(name))
    }

    /// Closest known command name, if any is within a small edit distance.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        self.order
            .iter()
            .map(|name| (levenshtein(name, input), *name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub fn usage_text(&self) -> String {
        let mut lines = vec!["Usage: famfin <command> [args]".to_string(), String::new()];
        for definition in self.definitions() {
            lines.push(format!("  {:<58} {}", definition.usage, definition.description));
        }
        lines.join("\n")
    }
}

pub(crate) fn arg<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str, CliError> {
    args.get(index)
        .copied()
        .ok_or_else(|| CliError::usage(format!("Usage: famfin {usage}")))
}

/// Accepts `12000000`, `12,000,000`, or `12_000_000`.
pub(crate) fn parse_amount(raw: &str) -> Result<u64, CliError> {
    let cleaned: String = raw.chars().filter(|ch| !matches!(ch, ',' | '_')).collect();
    cleaned
        .parse()
        .map_err(|_| CliError::usage(format!("`{raw}` is not a valid amount")))
}

pub(crate) fn parse_count(raw: &str) -> Result<u32, CliError> {
    raw.parse()
        .map_err(|_| CliError::usage(format!("`{raw}` is not a valid installment count")))
}

pub(crate) fn parse_gregorian(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::usage(format!("`{raw}` is not a YYYY-MM-DD date")))
}

pub(crate) fn parse_jalali(raw: &str) -> Result<NaiveDate, CliError> {
    let date: JalaliDate = raw.parse()?;
    Ok(date.to_gregorian()?)
}
