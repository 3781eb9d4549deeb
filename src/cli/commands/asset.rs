use famfin_core::{AmountFormatter, AssetService, MemberService};
use famfin_domain::{Asset, AssetKind};
use uuid::Uuid;

use super::{arg, parse_amount, CommandDefinition, CommandResult};
use crate::{
    cli::{context::CliContext, output, render::short_id},
    errors::CliError,
};

const USAGE: &str = "asset <add <member> <name> <kind> <amount> | list | remove <id>>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "asset",
        "Manage member assets",
        USAGE,
        cmd_asset,
    )]
}

fn cmd_asset(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match arg(args, 0, USAGE)? {
        "add" => add(context, &args[1..]),
        "list" => list(context),
        "remove" => remove(context, &args[1..]),
        other => Err(CliError::usage(format!("Unknown asset action `{other}`. Usage: famfin {USAGE}"))),
    }
}

fn add(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let usage = "asset add <member> <name> <kind> <amount>";
    let mut household = context.load_household()?;
    let member_id = MemberService::resolve(&household, arg(args, 0, usage)?)?;
    let name = arg(args, 1, usage)?;
    let raw_kind = arg(args, 2, usage)?;
    let kind = AssetKind::from_label(raw_kind).ok_or_else(|| {
        CliError::usage(format!(
            "`{raw_kind}` is not an asset kind (bank, cash, gold, car, real-estate, other)"
        ))
    })?;
    let amount = parse_amount(arg(args, 3, usage)?)?;

    let id = AssetService::add(&mut household, Asset::new(member_id, name, kind, amount))?;
    context.save_household(&household)?;
    output::success(format!("Added asset {name} ({})", short_id(&id.to_string())));
    Ok(())
}

fn list(context: &mut CliContext) -> CommandResult {
    let household = context.load_household()?;
    let formatter = context.formatter();
    output::section("Assets");
    if household.assets.is_empty() {
        output::info("No assets yet.");
    }
    for asset in &household.assets {
        let owner = household
            .member(asset.member_id)
            .map_or("unknown", |member| member.name.as_str());
        output::info(format!(
            "{} {} [{}] {} ({owner})",
            short_id(&asset.id.to_string()),
            asset.name,
            asset.kind,
            formatter.format_amount(asset.amount)
        ));
    }
    output::info(format!(
        "Total: {}",
        formatter.format_amount(AssetService::total(&household)?)
    ));
    Ok(())
}

fn remove(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let key = arg(args, 0, "asset remove <id>")?;
    let mut household = context.load_household()?;
    let id = resolve_by_prefix(household.assets.iter().map(|asset| asset.id), key)
        .ok_or_else(|| CliError::usage(format!("No single asset matches `{key}`")))?;
    AssetService::remove(&mut household, id)?;
    context.save_household(&household)?;
    output::success(format!("Removed asset {}", short_id(&id.to_string())));
    Ok(())
}

/// The only id starting with `prefix`, if exactly one does.
pub(crate) fn resolve_by_prefix(ids: impl Iterator<Item = Uuid>, prefix: &str) -> Option<Uuid> {
    let prefix = prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
        return None;
    }
    let mut matches = ids.filter(|id| id.to_string().starts_with(&prefix));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Some(id),
        _ => None,
    }
}
