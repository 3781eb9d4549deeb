use chrono::{Duration, NaiveDate};

use crate::{
    debt_service::{DebtDraft, DebtService},
    format::Locale,
    public_api::{
        add_jalali_months, bucketize_by_month, civil_to_jalali, generate_installments,
        jalali_to_civil, windowed_chart_series,
    },
    report_service::ReportService,
    storage::household_warnings,
    time::FixedClock,
    CoreError,
};
use famfin_domain::{
    AmountBasis, Debt, Household, Installment, InstallmentStatus, Member, RepaymentMethod,
};

fn farvardin_1403() -> NaiveDate {
    jalali_to_civil(1403, 1, 1).expect("valid jalali date")
}

#[test]
fn lump_sum_is_a_single_installment_on_start() {
    let schedule =
        generate_installments(AmountBasis::Total, 12_000_000, 1, farvardin_1403()).expect("schedule");
    assert_eq!(schedule.len(), 1);
    assert_eq!(schedule[0].amount, 12_000_000);
    assert_eq!(schedule[0].due_date, farvardin_1403());
    assert_eq!(schedule[0].status, InstallmentStatus::Pending);
}

#[test]
fn even_split_steps_monthly_from_start() {
    let start = farvardin_1403();
    let schedule = generate_installments(AmountBasis::Total, 12_000_000, 4, start).expect("schedule");
    assert_eq!(schedule.len(), 4);
    for (index, installment) in schedule.iter().enumerate() {
        assert_eq!(installment.amount, 3_000_000);
        let expected = add_jalali_months(start, index as i32).expect("shift");
        assert_eq!(installment.due_date, expected);
    }
    assert_eq!(civil_to_jalali(schedule[3].due_date).to_string(), "1403/04/01");
}

#[test]
fn remainder_goes_to_last_installment() {
    let schedule = generate_installments(AmountBasis::Total, 10, 3, farvardin_1403()).expect("schedule");
    let amounts: Vec<u64> = schedule.iter().map(|inst| inst.amount).collect();
    assert_eq!(amounts, vec![3, 3, 4]);
}

#[test]
fn total_basis_sum_is_exact() {
    for total in [1_u64, 7, 999, 12_000_001, 98_765_432] {
        for count in 1..=36 {
            let schedule =
                generate_installments(AmountBasis::Total, total, count, farvardin_1403()).expect("schedule");
            assert_eq!(schedule.iter().map(|inst| inst.amount).sum::<u64>(), total);
        }
    }
}

#[test]
fn zero_count_is_an_error() {
    let err = generate_installments(AmountBasis::Total, 10, 0, farvardin_1403()).unwrap_err();
    assert!(matches!(err, CoreError::InvalidInstallmentCount(0)));
}

#[test]
fn invalid_jalali_triples_surface_as_calendar_errors() {
    let err = jalali_to_civil(1403, 13, 1).unwrap_err();
    assert!(matches!(err, CoreError::Calendar(_)));
    assert!(err.to_string().contains("invalid calendar date"));
    assert!(jalali_to_civil(1404, 12, 30).is_err());
}

#[test]
fn bucketization_classifies_paid_and_overdue() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let mut paid = Installment::new(500, today - Duration::days(31));
    paid.status = InstallmentStatus::Paid;
    let overdue = Installment::new(200, today - Duration::days(1));

    let mut debt = Debt::new(
        uuid::Uuid::new_v4(),
        "Phone",
        700,
        RepaymentMethod::Installment,
        paid.due_date,
    );
    debt.installments = vec![paid, overdue];

    let buckets = bucketize_by_month(&[debt.clone()], today, Locale::English).expect("buckets");
    assert_eq!(buckets.iter().map(|b| b.paid).sum::<u64>(), 500);
    assert_eq!(buckets.iter().map(|b| b.overdue).sum::<u64>(), 200);
    assert_eq!(buckets.iter().map(|b| b.pending).sum::<u64>(), 0);

    let chart = windowed_chart_series(&[debt], today, Locale::English).expect("chart");
    assert_eq!(chart.len(), 6);
    assert_eq!(chart.iter().filter(|point| point.is_current).count(), 1);
}

#[test]
fn saved_debt_flows_into_the_report() {
    let mut household = Household::default();
    let member = household.put_member(Member::new("Ali", "self"));
    let start = farvardin_1403();
    let debt_id = DebtService::save(
        &mut household,
        None,
        DebtDraft {
            member_id: member,
            name: "Car".into(),
            repayment_method: RepaymentMethod::Installment,
            basis: AmountBasis::PerInstallment,
            amount: 1_000,
            installment_count: 3,
            start_date: start,
            description: None,
        },
    )
    .expect("save debt");
    let first = DebtService::installment_at(&household, debt_id, 1).expect("first");
    DebtService::toggle_installment(&mut household, debt_id, first).expect("toggle");

    let today = jalali_to_civil(1403, 2, 10).expect("today");
    let report = ReportService::monthly_report(&household.debts, &FixedClock::new(today), Locale::English)
        .expect("report");
    assert_eq!(report.months.len(), 3);
    assert_eq!(report.months[0].paid, 1_000);
    assert_eq!(report.months[1].overdue, 1_000);
    assert!(report.months[1].is_current);
    assert_eq!(report.months[2].pending, 1_000);
    assert_eq!(report.chart[0].sort_key, "1403/01");
    assert!(household_warnings(&household).is_empty());
}

#[test]
fn warnings_flag_dangling_members() {
    let mut household = Household::default();
    household.put_debt(Debt::new(
        uuid::Uuid::new_v4(),
        "Orphan",
        0,
        RepaymentMethod::LumpSum,
        farvardin_1403(),
    ));
    let warnings = household_warnings(&household);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("unknown member"));
}
