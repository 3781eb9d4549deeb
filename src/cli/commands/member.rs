use famfin_core::MemberService;
use famfin_domain::{Displayable, Member};

use super::{arg, CommandDefinition, CommandResult};
use crate::{
    cli::{context::CliContext, output, render::short_id},
    errors::CliError,
};

const USAGE: &str = "member <add <name> [relation] | list | remove <member>>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "member",
        "Manage household members",
        USAGE,
        cmd_member,
    )]
}

fn cmd_member(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match arg(args, 0, USAGE)? {
        "add" => add(context, &args[1..]),
        "list" => list(context),
        "remove" => remove(context, &args[1..]),
        other => Err(CliError::usage(format!("Unknown member action `{other}`. Usage: famfin {USAGE}"))),
    }
}

fn add(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let name = arg(args, 0, "member add <name> [relation]")?;
    let relation = args.get(1).copied().unwrap_or_default();
    let mut household = context.load_household()?;
    let id = MemberService::add(&mut household, Member::new(name, relation))?;
    context.save_household(&household)?;
    output::success(format!("Added member {name} ({})", short_id(&id.to_string())));
    Ok(())
}

fn list(context: &mut CliContext) -> CommandResult {
    let household = context.load_household()?;
    output::section("Members");
    if household.members.is_empty() {
        output::info("No members yet.");
    }
    for member in &household.members {
        output::info(format!(
            "{} {}",
            short_id(&member.id.to_string()),
            member.display_label()
        ));
    }
    Ok(())
}

fn remove(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let key = arg(args, 0, "member remove <member>")?;
    let mut household = context.load_household()?;
    let id = MemberService::resolve(&household, key)?;
    MemberService::remove(&mut household, id)?;
    context.save_household(&household)?;
    output::success(format!("Removed member {key}"));
    Ok(())
}
