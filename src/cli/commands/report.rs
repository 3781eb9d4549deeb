use famfin_core::{IncomeService, ReportService, SummaryService};

use super::{CommandDefinition, CommandResult};
use crate::cli::{context::CliContext, output, render};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "report",
            "Installments by Jalali month with the six-month window",
            "report",
            cmd_report,
        ),
        CommandDefinition::new(
            "dashboard",
            "Household totals and this month's balance",
            "dashboard",
            cmd_dashboard,
        ),
    ]
}

fn cmd_report(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let household = context.load_household()?;
    let report = ReportService::monthly_report(&household.debts, context.clock(), context.locale())?;
    output::section("Installment report");
    output::info(render::report(&context.formatter(), &report));
    Ok(())
}

fn cmd_dashboard(context: &mut CliContext, _args: &[&str]) -> CommandResult {
    let household = context.load_household()?;
    let today = context.today();
    let summary = SummaryService::dashboard(&household, today)?;
    let upcoming = IncomeService::upcoming(&household, today)?;
    output::section("Dashboard");
    output::info(render::dashboard(
        &context.formatter(),
        &household.name,
        &summary,
        &upcoming,
    ));
    Ok(())
}
