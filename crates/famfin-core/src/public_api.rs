//! Stable, public-facing helpers that wrap the internal service layer.
//!
//! Frontends can rely on these free functions without depending on the
//! entire service surface area.

use chrono::NaiveDate;
use famfin_domain::{AmountBasis, Debt, Installment, JalaliDate};

use crate::{
    format::Locale,
    report_service::{ChartPoint, MonthBucket, ReportService},
    schedule_service::{ScheduleService, ScheduleTerms},
    CoreError,
};

/// Jalali date of a Gregorian date.
pub fn civil_to_jalali(date: NaiveDate) -> JalaliDate {
    famfin_domain::gregorian_to_jalali(date)
}

/// Gregorian date of a Jalali triple; invalid triples are rejected, never clamped.
pub fn jalali_to_civil(year: i32, month: u32, day: u32) -> Result<NaiveDate, CoreError> {
    Ok(famfin_domain::jalali_to_gregorian(year, month, day)?)
}

/// Shifts a date by `months` Jalali months, clamping the day of month.
pub fn add_jalali_months(date: NaiveDate, months: i32) -> Result<NaiveDate, CoreError> {
    Ok(famfin_domain::add_jalali_months(date, months)?)
}

/// Builds a pending installment schedule starting on `start`.
pub fn generate_installments(
    basis: AmountBasis,
    amount: u64,
    count: u32,
    start: NaiveDate,
) -> Result<Vec<Installment>, CoreError> {
    ScheduleService::generate(&ScheduleTerms::new(basis, amount, count, start))
}

/// Every month holding at least one installment, oldest first.
pub fn bucketize_by_month(
    debts: &[Debt],
    today: NaiveDate,
    locale: Locale,
) -> Result<Vec<MonthBucket>, CoreError> {
    ReportService::bucketize(debts, today, locale)
}

/// Six chart points covering the month before `today` through four months after.
pub fn windowed_chart_series(
    debts: &[Debt],
    today: NaiveDate,
    locale: Locale,
) -> Result<Vec<ChartPoint>, CoreError> {
    let buckets = ReportService::bucketize(debts, today, locale)?;
    ReportService::chart_series(&buckets, today, locale)
}
