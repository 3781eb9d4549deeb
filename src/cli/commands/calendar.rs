use famfin_core::{public_api, AmountFormatter, DateFormatter};
use famfin_domain::{AmountBasis, JalaliDate};

use super::{arg, parse_amount, parse_count, parse_gregorian, parse_jalali, CommandDefinition, CommandResult};
use crate::{
    cli::{context::CliContext, output, render},
    errors::CliError,
};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "to-jalali",
            "Convert a Gregorian date to Jalali",
            "to-jalali <YYYY-MM-DD>",
            cmd_to_jalali,
        ),
        CommandDefinition::new(
            "to-gregorian",
            "Convert a Jalali date to Gregorian",
            "to-gregorian <YYYY/MM/DD>",
            cmd_to_gregorian,
        ),
        CommandDefinition::new(
            "add-months",
            "Shift a date by Jalali months",
            "add-months <YYYY-MM-DD> <n>",
            cmd_add_months,
        ),
        CommandDefinition::new(
            "schedule",
            "Preview an installment schedule",
            "schedule <total|per> <amount> <count> <YYYY/MM/DD>",
            cmd_schedule,
        ),
    ]
}

fn cmd_to_jalali(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let date = parse_gregorian(arg(args, 0, "to-jalali <YYYY-MM-DD>")?)?;
    let jalali = public_api::civil_to_jalali(date);
    let formatter = context.formatter();
    let day = formatter.locale.localize_digits(&jalali.day().to_string());
    output::info(format!(
        "{} ({day} {})",
        formatter.format_date(date),
        formatter.month_label(jalali)
    ));
    Ok(())
}

fn cmd_to_gregorian(_context: &mut CliContext, args: &[&str]) -> CommandResult {
    let jalali: JalaliDate = arg(args, 0, "to-gregorian <YYYY/MM/DD>")?.parse()?;
    let date = public_api::jalali_to_civil(jalali.year(), jalali.month(), jalali.day())?;
    output::info(date.format("%Y-%m-%d"));
    Ok(())
}

fn cmd_add_months(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let usage = "add-months <YYYY-MM-DD> <n>";
    let date = parse_gregorian(arg(args, 0, usage)?)?;
    let raw = arg(args, 1, usage)?;
    let months: i32 = raw
        .parse()
        .map_err(|_| CliError::usage(format!("`{raw}` is not a whole number of months")))?;
    let shifted = public_api::add_jalali_months(date, months)?;
    output::info(format!(
        "{} ({})",
        shifted.format("%Y-%m-%d"),
        context.formatter().format_date(shifted)
    ));
    Ok(())
}

fn cmd_schedule(context: &mut CliContext, args: &[&str]) -> CommandResult {
    let usage = "schedule <total|per> <amount> <count> <YYYY/MM/DD>";
    let raw_basis = arg(args, 0, usage)?;
    let basis = AmountBasis::from_label(raw_basis)
        .ok_or_else(|| CliError::usage(format!("`{raw_basis}` must be `total` or `per`")))?;
    let amount = parse_amount(arg(args, 1, usage)?)?;
    let count = parse_count(arg(args, 2, usage)?)?;
    let start = parse_jalali(arg(args, 3, usage)?)?;

    let installments = public_api::generate_installments(basis, amount, count, start)?;
    let formatter = context.formatter();
    output::section(format!(
        "{} installments, {} ({})",
        installments.len(),
        formatter.format_amount(amount),
        basis
    ));
    output::info(render::schedule(&formatter, &installments));
    Ok(())
}
