use chrono::NaiveDate;
use famfin_domain::{checked_total, Household, RecurringIncome};
use tracing::info;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

/// An income paired with its next expected payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingIncome {
    pub income_id: Uuid,
    pub name: String,
    pub amount: u64,
    pub next_payment: NaiveDate,
}

pub struct IncomeService;

impl IncomeService {
    pub fn add(household: &mut Household, income: RecurringIncome) -> CoreResult<Uuid> {
        if income.name.trim().is_empty() {
            return Err(CoreError::Validation("Income name must not be empty".into()));
        }
        if !(1..=31).contains(&income.day_of_month) {
            return Err(CoreError::Validation(format!(
                "Day of month must be between 1 and 31, got {}",
                income.day_of_month
            )));
        }
        if household.member(income.member_id).is_none() {
            return Err(CoreError::MemberNotFound(income.member_id.to_string()));
        }
        let id = household.put_income(income);
        info!(income = %id, "added recurring income");
        Ok(id)
    }

    pub fn remove(household: &mut Household, id: Uuid) -> CoreResult<()> {
        if household.delete_income(id) {
            info!(income = %id, "removed recurring income");
            Ok(())
        } else {
            Err(CoreError::IncomeNotFound(id))
        }
    }

    pub fn monthly_total(household: &Household) -> CoreResult<u64> {
        checked_total(&household.incomes)
            .ok_or_else(|| CoreError::Validation("Income amounts overflow the monthly total".into()))
    }

    /// Next payment for every income, soonest first.
    pub fn upcoming(household: &Household, today: NaiveDate) -> CoreResult<Vec<UpcomingIncome>> {
        let mut upcoming = household
            .incomes
            .iter()
            .map(|income| -> CoreResult<UpcomingIncome> {
                Ok(UpcomingIncome {
                    income_id: income.id,
                    name: income.name.clone(),
                    amount: income.amount,
                    next_payment: income.next_payment_on_or_after(today)?,
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;
        upcoming.sort_by_key(|entry| entry.next_payment);
        Ok(upcoming)
    }
}
