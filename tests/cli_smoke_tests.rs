mod common;

use common::CliHarness;
use predicates::str::contains;

#[test]
fn converts_gregorian_to_jalali_with_persian_digits_by_default() {
    let cli = CliHarness::new();
    cli.command(&["to-jalali", "2024-03-20"])
        .assert()
        .success()
        .stdout(contains("۱۴۰۳/۰۱/۰۱"))
        .stdout(contains("فروردین"));
}

#[test]
fn converts_both_directions_in_english() {
    let cli = CliHarness::english();
    let out = cli.run(&["to-jalali", "2026-10-17"]);
    assert!(out.contains("1405/07/25 (25 Mehr 1405)"), "{out}");

    let out = cli.run(&["to-gregorian", "1403/12/30"]);
    assert_eq!(out.trim(), "2025-03-20");
}

#[test]
fn rejects_impossible_jalali_dates() {
    let cli = CliHarness::english();
    cli.command(&["to-gregorian", "1404/12/30"])
        .assert()
        .failure()
        .stderr(contains("invalid calendar date"));
}

#[test]
fn add_months_clamps_to_month_end() {
    let cli = CliHarness::english();
    // 31 Shahrivar 1403
    let out = cli.run(&["add-months", "2024-09-21", "1"]);
    assert!(out.contains("(1403/07/30)"), "{out}");
}

#[test]
fn schedule_preview_splits_evenly() {
    let cli = CliHarness::english();
    let out = cli.run(&["schedule", "total", "12,000,000", "4", "1403/01/01"]);
    assert!(out.contains("4 installments"), "{out}");
    assert!(out.contains("1403/04/01  2024-06-21"), "{out}");
    assert_eq!(out.matches("3,000,000").count(), 4, "{out}");
    assert!(out.contains("Total: 12,000,000"), "{out}");
}

#[test]
fn zero_installments_is_an_error() {
    let cli = CliHarness::english();
    cli.command(&["schedule", "total", "100", "0", "1403/01/01"])
        .assert()
        .failure()
        .stderr(contains("invalid installment count"));
}

#[test]
fn oversized_installment_counts_fail_cleanly() {
    let cli = CliHarness::english();
    cli.command(&["schedule", "total", "10", "4294967295", "1403/01/01"])
        .assert()
        .failure()
        .stderr(contains("invalid installment count: 4294967295"));
}

#[test]
fn household_flow_persists_between_runs() {
    let cli = CliHarness::english();
    cli.run(&["member", "add", "Ali", "self"]);
    cli.run(&["asset", "add", "Ali", "Savings", "bank", "1000"]);
    cli.run(&["income", "add", "Ali", "Salary", "500", "25"]);
    let out = cli.run(&["debt", "add", "Ali", "Car", "10", "3", "1403/01/01"]);
    assert!(out.contains("Car (Ali) total 10"), "{out}");

    let export = cli.run(&["export"]);
    let debt_id = export
        .lines()
        .skip_while(|line| !line.contains("\"debts\""))
        .find_map(|line| {
            let line = line.trim();
            line.strip_prefix("\"id\": \"")
                .and_then(|rest| rest.strip_suffix("\","))
                .map(str::to_string)
        })
        .expect("debt id in export");

    let out = cli.run(&["debt", "pay", &debt_id[..8], "1"]);
    assert!(out.contains("Installment 1 is now Paid"), "{out}");

    let out = cli.run(&["report"]);
    assert!(out.contains("* Ordibehesht 1403"), "{out}");
    assert!(out.contains("1403/01/01  Car  3  paid"), "{out}");
    assert!(out.contains("1403/02/01  Car  3  overdue"), "{out}");

    let out = cli.run(&["dashboard"]);
    assert!(out.contains("Monthly balance  497"), "{out}");
    assert!(out.contains("Ali (self) assets 1,000  debts 10  balance 990"), "{out}");

    assert!(cli.home().join("household.json").exists());
    assert!(cli.home().join("config.json").exists());
}

#[test]
fn editing_an_installment_amount_updates_the_total() {
    let cli = CliHarness::english();
    cli.run(&["member", "add", "Sara", "spouse"]);
    cli.run(&["debt", "add", "Sara", "Loan", "900", "3", "1403/01/01"]);
    let list = cli.run(&["debt", "list"]);
    let debt_id = list
        .lines()
        .find(|line| line.contains("Loan"))
        .and_then(|line| line.split_whitespace().next())
        .expect("debt row")
        .to_string();

    let out = cli.run(&["debt", "amount", &debt_id, "2", "500"]);
    assert!(out.contains("debt total is now 1,100"), "{out}");
}

#[test]
fn installment_amounts_that_overflow_the_total_are_refused() {
    let cli = CliHarness::english();
    cli.run(&["member", "add", "Sara", "spouse"]);
    cli.run(&["debt", "add", "Sara", "Loan", "900", "3", "1403/01/01"]);
    let list = cli.run(&["debt", "list"]);
    let debt_id = list
        .lines()
        .find(|line| line.contains("Loan"))
        .and_then(|line| line.split_whitespace().next())
        .expect("debt row")
        .to_string();

    cli.command(&["debt", "amount", &debt_id, "2", "18446744073709551615"])
        .assert()
        .failure()
        .stderr(contains("overflows the total"));

    let list = cli.run(&["debt", "list"]);
    assert!(list.contains("Loan (Sara) total 900"), "{list}");
}

#[test]
fn unknown_commands_suggest_a_close_match() {
    let cli = CliHarness::new();
    cli.command(&["reprot"])
        .assert()
        .failure()
        .stderr(contains("Did you mean `report`?"));
}

#[test]
fn version_reports_build_metadata() {
    let cli = CliHarness::new();
    cli.command(&["version"])
        .assert()
        .success()
        .stdout(contains("famfin"))
        .stdout(contains("Build hash"));
}
