//! Installment schedule generation.

use chrono::NaiveDate;
use famfin_domain::{add_jalali_months, AmountBasis, Debt, Installment};
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Longest schedule accepted: one hundred years of monthly installments.
pub const MAX_INSTALLMENTS: u32 = 1_200;

/// Repayment terms as entered on a debt form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTerms {
    pub basis: AmountBasis,
    pub amount: u64,
    pub count: u32,
    pub start_date: NaiveDate,
}

impl ScheduleTerms {
    pub fn new(basis: AmountBasis, amount: u64, count: u32, start_date: NaiveDate) -> Self {
        Self {
            basis,
            amount,
            count,
            start_date,
        }
    }

    /// Total owed across the whole schedule.
    pub fn total(&self) -> CoreResult<u64> {
        match self.basis {
            AmountBasis::Total => Ok(self.amount),
            AmountBasis::PerInstallment => self
                .amount
                .checked_mul(u64::from(self.count))
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "{} x {} overflows the debt total",
                        self.amount, self.count
                    ))
                }),
        }
    }
}

pub struct ScheduleService;

impl ScheduleService {
    /// Splits the terms into `count` monthly installments, all pending.
    ///
    /// Installment `i` is due `i` Jalali months after the start date. With a
    /// total basis every installment gets `floor(total / count)` and the last
    /// one also absorbs the remainder, so the amounts always sum to the total.
    /// Counts outside `1..=MAX_INSTALLMENTS` are rejected.
    pub fn generate(terms: &ScheduleTerms) -> CoreResult<Vec<Installment>> {
        if !(1..=MAX_INSTALLMENTS).contains(&terms.count) {
            return Err(CoreError::InvalidInstallmentCount(terms.count));
        }
        let (base, last) = match terms.basis {
            AmountBasis::Total => {
                let count = u64::from(terms.count);
                let base = terms.amount / count;
                (base, base + terms.amount % count)
            }
            AmountBasis::PerInstallment => {
                terms.total()?;
                (terms.amount, terms.amount)
            }
        };

        let mut installments = Vec::with_capacity(terms.count as usize);
        for index in 0..terms.count {
            let offset = i32::try_from(index).map_err(|_| CoreError::InvalidInstallmentCount(terms.count))?;
            let due_date = add_jalali_months(terms.start_date, offset)?;
            let amount = if index + 1 == terms.count { last } else { base };
            installments.push(Installment::new(amount, due_date));
        }
        debug!(
            count = terms.count,
            start = %terms.start_date,
            "generated installment schedule"
        );
        Ok(installments)
    }

    /// Applies edited terms to an existing debt's schedule.
    ///
    /// The current installments, with their paid flags and edited amounts,
    /// survive only when both the total and the count are unchanged. Any other
    /// edit replaces the schedule with a fresh, fully pending one. Returns
    /// whether the schedule was regenerated.
    pub fn reconcile(debt: &mut Debt, terms: &ScheduleTerms) -> CoreResult<bool> {
        let total = terms.total()?;
        let unchanged = !debt.installments.is_empty()
            && debt.total_amount == total
            && debt.installments.len() == terms.count as usize;
        if unchanged {
            return Ok(false);
        }
        debt.installments = Self::generate(terms)?;
        debt.total_amount = total;
        Ok(true)
    }
}
