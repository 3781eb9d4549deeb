//! Calendar-aware arithmetic on Gregorian dates, stepped in Jalali months.

use chrono::NaiveDate;

use crate::jalali::{CalendarError, JalaliDate};

/// Shifts `date` by `months` Jalali months.
///
/// The day of month is clamped to the length of the target month, so
/// 31 Shahrivar plus one month lands on 30 Mehr rather than 1 Aban.
/// Negative offsets move backwards; zero returns `date` unchanged.
pub fn add_jalali_months(date: NaiveDate, months: i32) -> Result<NaiveDate, CalendarError> {
    if months == 0 {
        return Ok(date);
    }
    JalaliDate::from_gregorian(date)
        .add_months(months)?
        .to_gregorian()
}

pub fn same_jalali_month(a: NaiveDate, b: NaiveDate) -> bool {
    let (a, b) = (JalaliDate::from_gregorian(a), JalaliDate::from_gregorian(b));
    a.year() == b.year() && a.month() == b.month()
}

/// Sortable `YYYY/MM` key for the Jalali month holding `date`.
pub fn jalali_month_key(date: NaiveDate) -> String {
    JalaliDate::from_gregorian(date).month_key()
}
