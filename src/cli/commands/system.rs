use famfin_core::Locale;
use famfin_domain::CURRENT_SCHEMA_VERSION;

use super::{arg, CommandDefinition, CommandRegistry, CommandResult};
use crate::{
    cli::{context::CliContext, output},
    errors::CliError,
    utils::build_info,
};

const CONFIG_USAGE: &str = "config <show | set <locale|color|retention> <value>>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("config", "Show or change preferences", CONFIG_USAGE, cmd_config),
        CommandDefinition::new(
            "export",
            "Print the household as JSON",
            "export",
            cmd_export,
        ),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new("help", "Show available commands", "help", cmd_help),
    ]
}

fn cmd_version(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("famfin {}", meta.version));
    output::info(format!("  Schema ver   : v{}", CURRENT_SCHEMA_VERSION));
    output::info(format!("  Build hash   : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(_context: &mut CliContext, _args: &[&str]) -> CommandResult {
    output::info(CommandRegistry::new(super::all_definitions()).usage_text());
    Ok(())
}

fn cmd_export(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let household = context.load_household()?;
    output::info(serde_json::to_string_pretty(&household)?);
    Ok(())
}

fn cmd_config(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match arg(args, 0, CONFIG_USAGE)? {
        "show" => {
            let config = &context.config;
            output::section("Configuration");
            output::info(format!("  locale    : {}", config.locale));
            output::info(format!("  color     : {}", config.ui_color_enabled));
            output::info(format!("  data root : {}", config.resolve_data_root().display()));
            output::info(format!("  retention : {}", config.resolve_backup_retention()));
            output::info(format!("  file      : {}", context.config_manager.config_path().display()));
            Ok(())
        }
        "set" => {
            let key = arg(args, 1, CONFIG_USAGE)?;
            let value = arg(args, 2, CONFIG_USAGE)?;
            match key {
                "locale" => context.config.locale = Locale::from_tag(value).tag().to_string(),
                "color" => {
                    context.config.ui_color_enabled = parse_switch(value)?;
                }
                "retention" => {
                    let retention: usize = value.parse().map_err(|_| {
                        CliError::usage(format!("`{value}` is not a backup count"))
                    })?;
                    context.config.backup_retention = Some(retention.max(1));
                }
                other => return Err(CliError::usage(format!("Unknown setting `{other}`"))),
            }
            context.save_config()?;
            output::success(format!("Updated {key}"));
            Ok(())
        }
        other => Err(CliError::usage(format!(
            "Unknown config action `{other}`. Usage: famfin {CONFIG_USAGE}"
        ))),
    }
}

fn parse_switch(value: &str) -> Result<bool, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CliError::usage(format!("`{value}` must be on or off"))),
    }
}
