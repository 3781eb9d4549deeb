//! Non-interactive command line front end: one command per invocation.

pub mod commands;
pub mod context;
pub mod output;
pub mod render;
pub mod system_clock;

use commands::CommandRegistry;
use context::CliContext;

use crate::errors::CliError;

/// Dispatches `args` (without the program name) against a context built from the environment.
pub fn run_cli(args: &[String]) -> Result<(), CliError> {
    let mut context = CliContext::from_env()?;
    run_with_context(&mut context, args)
}

pub fn run_with_context(context: &mut CliContext, args: &[String]) -> Result<(), CliError> {
    output::configure_colors(context.config.ui_color_enabled);
    let registry = CommandRegistry::new(commands::all_definitions());

    let Some((name, rest)) = args.split_first() else {
        return Err(CliError::usage(registry.usage_text()));
    };
    let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

    match registry.get(name) {
        Some(definition) => {
            tracing::debug!(command = definition.name, "dispatching command");
            (definition.handler)(context, &rest)
        }
        None => {
            let hint = registry
                .suggest(name)
                .map(|best| format!(" Did you mean `{best}`?"))
                .unwrap_or_default();
            Err(CliError::usage(format!(
                "Unknown command `{name}`.{hint} Run `famfin help` for usage."
            )))
        }
    }
}
