use famfin_core::{AmountFormatter, DebtDraft, DebtService, MemberService};
use famfin_domain::{AmountBasis, Household, RepaymentMethod};
use uuid::Uuid;

use super::{arg, parse_amount, parse_count, parse_jalali, CommandDefinition, CommandResult};
use crate::{
    cli::{context::CliContext, output, render},
    errors::CliError,
};

const USAGE: &str = "debt <add|edit|list|show|pay|amount|remove> ...";
const ADD_USAGE: &str = "debt add <member> <name> <amount> <count> <YYYY/MM/DD> [--per] [--lump-sum]";
const EDIT_USAGE: &str = "debt edit <debt-id> <amount> <count> <YYYY/MM/DD> [--per] [--lump-sum]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![CommandDefinition::new(
        "debt",
        "Manage debts and their installments",
        USAGE,
        cmd_debt,
    )]
}

fn cmd_debt(context: &mut CliContext, args: &[&str]) -> CommandResult {
    match arg(args, 0, USAGE)? {
        "add" => add(context, &args[1..]),
        "edit" => edit(context, &args[1..]),
        "list" => list(context),
        "show" => show(context, &args[1..]),
        "pay" => pay(context, &args[1..]),
        "amount" => amount(context, &args[1..]),
        "remove" => remove(context, &args[1..]),
        other => Err(CliError::usage(format!("Unknown debt action `{other}`. Usage: famfin {USAGE}"))),
    }
}

/// Positional arguments with the `--per` and `--lump-sum` switches split out.
struct DebtArgs<'a> {
    positional: Vec<&'a str>,
    basis: AmountBasis,
    method: RepaymentMethod,
}

impl<'a> DebtArgs<'a> {
    fn parse(args: &[&'a str]) -> Result<Self, CliError> {
        let mut parsed = DebtArgs {
            positional: Vec::new(),
            basis: AmountBasis::Total,
            method: RepaymentMethod::Installment,
        };
        for arg in args {
            match *arg {
                "--per" | "--per-installment" => parsed.basis = AmountBasis::PerInstallment,
                "--lump-sum" => parsed.method = RepaymentMethod::LumpSum,
                flag if flag.starts_with("--") => {
                    return Err(CliError::usage(format!("Unknown flag `{flag}`")))
                }
                value => parsed.positional.push(value),
            }
        }
        Ok(parsed)
    }
}

fn add(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = DebtArgs::parse(args)?;
    let args = &parsed.positional;
    let mut household = context.load_household()?;
    let draft = DebtDraft {
        member_id: MemberService::resolve(&household, arg(args, 0, ADD_USAGE)?)?,
        name: arg(args, 1, ADD_USAGE)?.to_string(),
        repayment_method: parsed.method,
        basis: parsed.basis,
        amount: parse_amount(arg(args, 2, ADD_USAGE)?)?,
        installment_count: parse_count(arg(args, 3, ADD_USAGE)?)?,
        start_date: parse_jalali(arg(args, 4, ADD_USAGE)?)?,
        description: None,
    };
    let id = DebtService::save(&mut household, None, draft)?;
    context.save_household(&household)?;
    print_debt(context, &household, id)
}

fn edit(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let parsed = DebtArgs::parse(args)?;
    let args = &parsed.positional;
    let mut household = context.load_household()?;
    let id = DebtService::resolve(&household, arg(args, 0, EDIT_USAGE)?)?;
    let current = household
        .debt(id)
        .ok_or_else(|| CliError::usage(format!("Debt {id} vanished")))?;
    let draft = DebtDraft {
        member_id: current.member_id,
        name: current.name.clone(),
        repayment_method: parsed.method,
        basis: parsed.basis,
        amount: parse_amount(arg(args, 1, EDIT_USAGE)?)?,
        installment_count: parse_count(arg(args, 2, EDIT_USAGE)?)?,
        start_date: parse_jalali(arg(args, 3, EDIT_USAGE)?)?,
        description: current.description.clone(),
    };
    DebtService::save(&mut household, Some(id), draft)?;
    context.save_household(&household)?;
    print_debt(context, &household, id)
}

fn list(context: &mut CliContext) -> CommandResult {
    let household = context.load_household()?;
    let formatter = context.formatter();
    output::section("Debts");
    if household.debts.is_empty() {
        output::info("No debts yet.");
    }
    for debt in &household.debts {
        output::info(render::debt(&formatter, debt, owner_name(&household, debt.member_id)));
    }
    Ok(())
}

fn show(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let household = context.load_household()?;
    let id = DebtService::resolve(&household, arg(args, 0, "debt show <debt-id>")?)?;
    print_debt(context, &household, id)
}

fn pay(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let usage = "debt pay <debt-id> <n>";
    let mut household = context.load_household()?;
    let debt_id = DebtService::resolve(&household, arg(args, 0, usage)?)?;
    let position = parse_position(arg(args, 1, usage)?)?;
    let installment = DebtService::installment_at(&household, debt_id, position)?;
    let status = DebtService::toggle_installment(&mut household, debt_id, installment)?;
    context.save_household(&household)?;
    output::success(format!("Installment {position} is now {status}"));
    Ok(())
}

fn amount(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let usage = "debt amount <debt-id> <n> <amount>";
    let mut household = context.load_household()?;
    let debt_id = DebtService::resolve(&household, arg(args, 0, usage)?)?;
    let position = parse_position(arg(args, 1, usage)?)?;
    let value = parse_amount(arg(args, 2, usage)?)?;
    let installment = DebtService::installment_at(&household, debt_id, position)?;
    let total = DebtService::set_installment_amount(&mut household, debt_id, installment, value)?;
    context.save_household(&household)?;
    output::success(format!(
        "Installment {position} set; debt total is now {}",
        context.formatter().format_amount(total)
    ));
    Ok(())
}

fn remove(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let mut household = context.load_household()?;
    let id = DebtService::resolve(&household, arg(args, 0, "debt remove <debt-id>")?)?;
    DebtService::remove(&mut household, id)?;
    context.save_household(&household)?;
    output::success(format!("Removed debt {}", render::short_id(&id.to_string())));
    Ok(())
}

fn print_debt(context: &CliContext, household: &Household, id: Uuid) -> CommandResult {
    let debt = household
        .debt(id)
        .ok_or_else(|| CliError::usage(format!("Debt {id} not found")))?;
    let formatter = context.formatter();
    output::section(render::debt(&formatter, debt, owner_name(household, debt.member_id)));
    output::info(render::schedule(&formatter, &debt.installments));
    Ok(())
}

fn owner_name(household: &Household, member_id: Uuid) -> &str {
    household
        .member(member_id)
        .map_or("unknown", |member| member.name.as_str())
}

fn parse_position(raw: &str) -> Result<usize, CliError> {
    raw.parse()
        .map_err(|_| CliError::usage(format!("`{raw}` is not an installment number")))
}
