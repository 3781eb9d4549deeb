//! Recurring monthly incomes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    common::{Amounted, Identifiable, NamedEntity, OwnedByMember},
    jalali::{CalendarError, JalaliDate},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringIncome {
    pub id: Uuid,
    pub member_id: Uuid,
    pub name: String,
    pub amount: u64,
    /// Day of the Jalali month the income arrives on (1..=31).
    pub day_of_month: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RecurringIncome {
    pub fn new(member_id: Uuid, name: impl Into<String>, amount: u64, day_of_month: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            name: name.into(),
            amount,
            day_of_month,
            description: None,
        }
    }

    /// Next payment date on or after `today`.
    ///
    /// A payday past the end of a short month falls on that month's last day.
    pub fn next_payment_on_or_after(&self, today: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let this_month = JalaliDate::from_gregorian(today).first_of_month();
        let candidate = self.payment_in(this_month)?;
        if candidate >= today {
            Ok(candidate)
        } else {
            self.payment_in(this_month.add_months(1)?)
        }
    }

    fn payment_in(&self, month: JalaliDate) -> Result<NaiveDate, CalendarError> {
        let day = self.day_of_month.clamp(1, month.month_length());
        JalaliDate::new(month.year(), month.month(), day)?.to_gregorian()
    }
}

impl Identifiable for RecurringIncome {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for RecurringIncome {
    fn name(&self) -> &str {
        &self.name
    }
}

impl OwnedByMember for RecurringIncome {
    fn member_id(&self) -> Uuid {
        self.member_id
    }
}

impl Amounted for RecurringIncome {
    fn amount(&self) -> u64 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jalali::jalali_to_gregorian;

    fn income(day_of_month: u32) -> RecurringIncome {
        RecurringIncome::new(Uuid::new_v4(), "Salary", 40_000_000, day_of_month)
    }

    #[test]
    fn payday_later_this_month() {
        let today = jalali_to_gregorian(1403, 7, 10).unwrap();
        let next = income(25).next_payment_on_or_after(today).unwrap();
        assert_eq!(next, jalali_to_gregorian(1403, 7, 25).unwrap());
    }

    #[test]
    fn payday_today_counts() {
        let today = jalali_to_gregorian(1403, 7, 25).unwrap();
        assert_eq!(income(25).next_payment_on_or_after(today).unwrap(), today);
    }

    #[test]
    fn payday_already_passed_rolls_to_next_month() {
        let today = jalali_to_gregorian(1403, 6, 28).unwrap();
        let next = income(5).next_payment_on_or_after(today).unwrap();
        assert_eq!(next, jalali_to_gregorian(1403, 7, 5).unwrap());
    }

    #[test]
    fn payday_clamps_to_short_month() {
        let today = jalali_to_gregorian(1404, 12, 1).unwrap();
        let next = income(31).next_payment_on_or_after(today).unwrap();
        assert_eq!(next, jalali_to_gregorian(1404, 12, 29).unwrap());
    }
}
