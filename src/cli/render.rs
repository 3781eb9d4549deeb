//! Plain-text rendering of reports, schedules, and summaries.

use std::fmt::Write;

use famfin_core::{
    AmountFormatter, DashboardSummary, DateFormatter, JalaliFormatter, MonthlyReport,
    UpcomingIncome,
};
use famfin_domain::{checked_total, Debt, Installment, InstallmentStatus, JalaliDate};

pub fn signed_amount(formatter: &JalaliFormatter, value: i128) -> String {
    let magnitude = u64::try_from(value.unsigned_abs()).unwrap_or(u64::MAX);
    let text = formatter.format_amount(magnitude);
    if value < 0 {
        format!("-{text}")
    } else {
        text
    }
}

fn checked_amount(formatter: &JalaliFormatter, amount: Option<u64>) -> String {
    amount.map_or_else(|| "overflow".to_string(), |value| formatter.format_amount(value))
}

/// One row per installment: position, Jalali and Gregorian due dates, amount, status.
pub fn schedule(formatter: &JalaliFormatter, installments: &[Installment]) -> String {
    let mut out = String::new();
    for (index, installment) in installments.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {}  {}  {:>16}  {}",
            index + 1,
            formatter.format_date(installment.due_date),
            installment.due_date,
            formatter.format_amount(installment.amount),
            installment.status
        );
    }
    let _ = write!(out, "Total: {}", checked_amount(formatter, checked_total(installments)));
    out
}

pub fn debt(formatter: &JalaliFormatter, debt: &Debt, owner: &str) -> String {
    let paid = debt
        .installments
        .iter()
        .filter(|inst| inst.status == InstallmentStatus::Paid)
        .count();
    format!(
        "{} {} ({}) total {}, outstanding {}, {}/{} paid",
        short_id(&debt.id.to_string()),
        debt.name,
        owner,
        formatter.format_amount(debt.total_amount),
        checked_amount(formatter, debt.outstanding_amount()),
        paid,
        debt.installments.len()
    )
}

pub fn report(formatter: &JalaliFormatter, report: &MonthlyReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Six-month window");
    for point in &report.chart {
        let _ = writeln!(
            out,
            "{} {:<18} paid {:>14}  pending {:>14}  overdue {:>14}",
            if point.is_current { "*" } else { " " },
            point.label,
            formatter.format_amount(point.paid),
            formatter.format_amount(point.pending),
            formatter.format_amount(point.overdue)
        );
    }
    let _ = write!(out, "Monthly detail");
    if report.months.is_empty() {
        let _ = write!(out, "\n  No installments scheduled.");
    }
    for bucket in &report.months {
        let _ = write!(
            out,
            "\n  {} ({}){}\n    total {}  paid {}  pending {}  overdue {}",
            bucket.display_name,
            bucket.sort_key,
            if bucket.is_current { " current" } else { "" },
            formatter.format_amount(bucket.total),
            formatter.format_amount(bucket.paid),
            formatter.format_amount(bucket.pending),
            formatter.format_amount(bucket.overdue)
        );
        for detail in &bucket.details {
            let _ = write!(
                out,
                "\n    {}  {}  {}  {}",
                formatter.format_date(detail.due_date),
                detail.debt_name,
                formatter.format_amount(detail.amount),
                detail.status
            );
        }
    }
    out
}

pub fn dashboard(
    formatter: &JalaliFormatter,
    household: &str,
    summary: &DashboardSummary,
    upcoming: &[UpcomingIncome],
) -> String {
    let mut out = String::new();
    let month = JalaliDate::from_gregorian(summary.today);
    let _ = writeln!(out, "Household: {household}");
    let _ = writeln!(
        out,
        "Today: {} ({})",
        formatter.format_date(summary.today),
        formatter.month_label(month)
    );
    let rows = [
        ("Total assets", formatter.format_amount(summary.total_assets)),
        ("Total debts", formatter.format_amount(summary.total_debts)),
        ("Monthly income", formatter.format_amount(summary.monthly_income)),
        (
            "Due this month",
            format!(
                "{} ({} installment{})",
                formatter.format_amount(summary.due_this_month),
                summary.due_this_month_count,
                if summary.due_this_month_count == 1 { "" } else { "s" }
            ),
        ),
        ("Monthly balance", signed_amount(formatter, summary.monthly_balance)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<16} {value}");
    }
    let _ = write!(out, "Members");
    if summary.members.is_empty() {
        let _ = write!(out, "\n  none");
    }
    for member in &summary.members {
        let _ = write!(
            out,
            "\n  {} ({}) assets {}  debts {}  balance {}",
            member.name,
            member.relation,
            formatter.format_amount(member.assets),
            formatter.format_amount(member.debts),
            signed_amount(formatter, member.balance)
        );
    }
    if !upcoming.is_empty() {
        let _ = write!(out, "\nUpcoming income");
        for income in upcoming {
            let _ = write!(
                out,
                "\n  {}  {}  {}",
                formatter.format_date(income.next_payment),
                income.name,
                formatter.format_amount(income.amount)
            );
        }
    }
    out
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
