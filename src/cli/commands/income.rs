use famfin_core::{AmountFormatter, DateFormatter, IncomeService, MemberService};
use famfin_domain::RecurringIncome;

use super::{arg, asset::resolve_by_prefix, parse_amount, CommandDefinition, CommandResult};
use crate::{
    cli::{context::CliContext, output, render::short_id},
    errors::CliError,
};

const USAGE: &str = "income <add <member> <name> <amount> <day> | list | remove <id>>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "income",
        "Manage recurring monthly incomes",
        USAGE,
        cmd_income,
    )]
}

fn cmd_income(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match arg(args, 0, USAGE)? {
        "add" => add(context, &args[1..]),
        "list" => list(context),
        "remove" => remove(context, &args[1..]),
        other => Err(CliError::usage(format!("Unknown income action `{other}`. Usage: famfin {USAGE}"))),
    }
}

fn add(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let usage = "income add <member> <name> <amount> <day>";
    let mut household = context.load_household()?;
    let member_id = MemberService::resolve(&household, arg(args, 0, usage)?)?;
    let name = arg(args, 1, usage)?;
    let amount = parse_amount(arg(args, 2, usage)?)?;
    let raw_day = arg(args, 3, usage)?;
    let day: u32 = raw_day
        .parse()
        .map_err(|_| CliError::usage(format!("`{raw_day}` is not a day of month")))?;

    let id = IncomeService::add(&mut household, RecurringIncome::new(member_id, name, amount, day))?;
    context.save_household(&household)?;
    output::success(format!("Added income {name} ({})", short_id(&id.to_string())));
    Ok(())
}

fn list(context: &mut CliContext) -> CommandResult {
    let household = context.load_household()?;
    let formatter = context.formatter();
    output::section("Recurring income");
    if household.incomes.is_empty() {
        output::info("No recurring income yet.");
    }
    for entry in IncomeService::upcoming(&household, context.today())? {
        let income = household.incomes.iter().find(|income| income.id == entry.income_id);
        let day = income.map_or(0, |income| income.day_of_month);
        output::info(format!(
            "{} {} {} on day {day}, next {}",
            short_id(&entry.income_id.to_string()),
            entry.name,
            formatter.format_amount(entry.amount),
            formatter.format_date(entry.next_payment)
        ));
    }
    output::info(format!(
        "Monthly total: {}",
        formatter.format_amount(IncomeService::monthly_total(&household)?)
    ));
    Ok(())
}

fn remove(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let key = arg(args, 0, "income remove <id>")?;
    let mut household = context.load_household()?;
    let id = resolve_by_prefix(household.incomes.iter().map(|income| income.id), key)
        .ok_or_else(|| CliError::usage(format!("No single income matches `{key}`")))?;
    IncomeService::remove(&mut household, id)?;
    context.save_household(&household)?;
    output::success(format!("Removed income {}", short_id(&id.to_string())));
    Ok(())
}
