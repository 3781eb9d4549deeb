//! Monthly installment reports: bucketing by Jalali month and the chart window.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use famfin_domain::{add_jalali_months, jalali_month_key, Debt, Installment, JalaliDate};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{CoreError, CoreResult},
    format::{JalaliFormatter, Locale},
    time::Clock,
};

/// Chart window offsets relative to the current month.
pub const WINDOW_OFFSETS: std::ops::RangeInclusive<i32> = -1..=4;

/// Reporting state of one installment on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Paid,
    Pending,
    Overdue,
}

impl ReportStatus {
    /// Paid wins; a pending installment due strictly before `today` is overdue.
    pub fn classify(installment: &Installment, today: NaiveDate) -> Self {
        if installment.is_paid() {
            ReportStatus::Paid
        } else if installment.due_date < today {
            ReportStatus::Overdue
        } else {
            ReportStatus::Pending
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReportStatus::Paid => "paid",
            ReportStatus::Pending => "pending",
            ReportStatus::Overdue => "overdue",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallmentSummary {
    pub debt_id: Uuid,
    pub debt_name: String,
    pub installment_id: Uuid,
    pub amount: u64,
    pub due_date: NaiveDate,
    pub status: ReportStatus,
}

/// Installment totals for one Jalali month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    /// `YYYY/MM`, sorts chronologically.
    pub sort_key: String,
    pub display_name: String,
    pub total: u64,
    pub paid: u64,
    pub pending: u64,
    pub overdue: u64,
    pub is_current: bool,
    pub details: Vec<InstallmentSummary>,
}

impl MonthBucket {
    fn empty(month: JalaliDate, formatter: &JalaliFormatter, current_key: &str) -> Self {
        let sort_key = month.month_key();
        Self {
            is_current: sort_key == current_key,
            display_name: formatter.month_label(month),
            sort_key,
            total: 0,
            paid: 0,
            pending: 0,
            overdue: 0,
            details: Vec::new(),
        }
    }

    fn record(&mut self, summary: InstallmentSummary) -> CoreResult<()> {
        let amount = summary.amount;
        let slot = match summary.status {
            ReportStatus::Paid => &mut self.paid,
            ReportStatus::Pending => &mut self.pending,
            ReportStatus::Overdue => &mut self.overdue,
        };
        match (self.total.checked_add(amount), slot.checked_add(amount)) {
            (Some(total), Some(sum)) => {
                self.total = total;
                *slot = sum;
            }
            _ => {
                return Err(CoreError::Validation(format!(
                    "installments due in {} overflow the amount range",
                    self.sort_key
                )))
            }
        }
        self.details.push(summary);
        Ok(())
    }
}

/// One slot of the six-month chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    pub sort_key: String,
    pub label: String,
    pub paid: u64,
    pub pending: u64,
    pub overdue: u64,
    pub is_current: bool,
}

impl ChartPoint {
    pub fn total(&self) -> u64 {
        self.paid + self.pending + self.overdue
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyReport {
    pub today: NaiveDate,
    pub current_key: String,
    pub chart: Vec<ChartPoint>,
    pub months: Vec<MonthBucket>,
}

pub struct ReportService;

impl ReportService {
    /// Groups every installment of every debt by the Jalali month it falls due in.
    ///
    /// Buckets are returned in ascending month order and only months holding at
    /// least one installment appear. A month whose amounts overflow `u64` is a
    /// validation error.
    pub fn bucketize(
        debts: &[Debt],
        today: NaiveDate,
        locale: Locale,
    ) -> CoreResult<Vec<MonthBucket>> {
        let formatter = JalaliFormatter::new(locale);
        let current_key = jalali_month_key(today);
        let mut buckets: BTreeMap<String, MonthBucket> = BTreeMap::new();

        for debt in debts {
            for installment in &debt.installments {
                let month = JalaliDate::from_gregorian(installment.due_date);
                let summary = InstallmentSummary {
                    debt_id: debt.id,
                    debt_name: debt.name.clone(),
                    installment_id: installment.id,
                    amount: installment.amount,
                    due_date: installment.due_date,
                    status: ReportStatus::classify(installment, today),
                };
                buckets
                    .entry(month.month_key())
                    .or_insert_with(|| MonthBucket::empty(month, &formatter, &current_key))
                    .record(summary)?;
            }
        }
        Ok(buckets.into_values().collect())
    }

    /// Jalali months of the chart window, oldest first.
    pub fn window(today: NaiveDate) -> CoreResult<Vec<JalaliDate>> {
        WINDOW_OFFSETS
            .map(|offset| -> CoreResult<JalaliDate> {
                let date = add_jalali_months(today, offset)?;
                Ok(JalaliDate::from_gregorian(date).first_of_month())
            })
            .collect()
    }

    /// Exactly one point per window month; months without installments are zero.
    pub fn chart_series(
        buckets: &[MonthBucket],
        today: NaiveDate,
        locale: Locale,
    ) -> CoreResult<Vec<ChartPoint>> {
        let formatter = JalaliFormatter::new(locale);
        let current_key = jalali_month_key(today);
        let points = Self::window(today)?
            .into_iter()
            .map(|month| {
                let sort_key = month.month_key();
                let bucket = buckets.iter().find(|bucket| bucket.sort_key == sort_key);
                ChartPoint {
                    label: formatter.month_label(month),
                    paid: bucket.map_or(0, |b| b.paid),
                    pending: bucket.map_or(0, |b| b.pending),
                    overdue: bucket.map_or(0, |b| b.overdue),
                    is_current: sort_key == current_key,
                    sort_key,
                }
            })
            .collect();
        Ok(points)
    }

    pub fn monthly_report(
        debts: &[Debt],
        clock: &dyn Clock,
        locale: Locale,
    ) -> CoreResult<MonthlyReport> {
        let today = clock.today();
        let months = Self::bucketize(debts, today, locale)?;
        let chart = Self::chart_series(&months, today, locale)?;
        debug!(
            %today,
            debts = debts.len(),
            months = months.len(),
            "built monthly installment report"
        );
        Ok(MonthlyReport {
            today,
            current_key: jalali_month_key(today),
            chart,
            months,
        })
    }
}
