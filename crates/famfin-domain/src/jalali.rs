//! Jalali (Persian solar Hijri) dates and their exact conversion to and from
//! the Gregorian calendar.
//!
//! Both directions run on the same day-count model: a 33-year cycle holding
//! eight leap years, with day zero of the Jalali count (1 Farvardin 979)
//! falling 79 days after 1600-01-01. Because the forward and backward paths
//! share [`is_leap_year`], a round trip through either calendar is lossless.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

const GREGORIAN_EPOCH_YEAR: i64 = 1600;
const JALALI_EPOCH_YEAR: i64 = 979;
const EPOCH_OFFSET_DAYS: i64 = 79;

const JALALI_CYCLE_YEARS: i64 = 33;
const JALALI_CYCLE_DAYS: i64 = 12_053;
const LEAP_GROUP_DAYS: i64 = 1_461;
const GREGORIAN_QUADRICENTURY_DAYS: i64 = 146_097;
const GREGORIAN_CENTURY_DAYS: i64 = 36_524;

const GREGORIAN_MONTH_DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Jalali month names in Persian script, Farvardin first.
pub const PERSIAN_MONTH_NAMES: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// Latin transliterations of the Jalali month names.
pub const LATIN_MONTH_NAMES: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

/// Failures raised by calendar construction and conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid calendar date: {year}/{month}/{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("date outside the supported range: {0}")]
    OutOfRange(String),
    #[error("unparseable date `{0}`")]
    Parse(String),
}

/// Returns whether the Jalali `year` has a 30-day Esfand.
pub fn is_leap_year(year: i32) -> bool {
    let position = (i64::from(year) - JALALI_EPOCH_YEAR).rem_euclid(JALALI_CYCLE_YEARS);
    position < 32 && position % 4 == 0
}

/// Number of days in the given Jalali month; zero for months outside 1..=12.
pub fn month_length(year: i32, month: u32) -> u32 {
    match month {
        1..=6 => 31,
        7..=11 => 30,
        12 if is_leap_year(year) => 30,
        12 => 29,
        _ => 0,
    }
}

/// A validated day in the Jalali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    year: i32,
    month: u32,
    day: u32,
}

impl JalaliDate {
    /// Builds a date, rejecting months outside 1..=12 and days past the month end.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) || day == 0 || day > month_length(year, month) {
            return Err(CalendarError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    pub fn month_length(&self) -> u32 {
        month_length(self.year, self.month)
    }

    pub fn from_gregorian(date: NaiveDate) -> Self {
        jalali_from_day_number(gregorian_day_number(date) - EPOCH_OFFSET_DAYS)
    }

    pub fn to_gregorian(&self) -> Result<NaiveDate, CalendarError> {
        gregorian_from_day_number(jalali_day_number(*self) + EPOCH_OFFSET_DAYS)
    }

    pub fn first_of_month(&self) -> Self {
        Self { day: 1, ..*self }
    }

    /// Shifts by whole Jalali months, clamping the day to the target month's length.
    pub fn add_months(&self, months: i32) -> Result<Self, CalendarError> {
        let index = i64::from(self.month) - 1 + i64::from(months);
        let year = i64::from(self.year) + index.div_euclid(12);
        let year = i32::try_from(year)
            .map_err(|_| CalendarError::OutOfRange(format!("jalali year {year}")))?;
        let month = index.rem_euclid(12) as u32 + 1;
        let day = self.day.min(month_length(year, month));
        Ok(Self { year, month, day })
    }

    /// Lexicographically sortable `YYYY/MM` key of the month holding this date.
    pub fn month_key(&self) -> String {
        format!("{:04}/{:02}", self.year, self.month)
    }

    pub fn persian_month_name(&self) -> &'static str {
        PERSIAN_MONTH_NAMES[self.month as usize - 1]
    }

    pub fn latin_month_name(&self) -> &'static str {
        LATIN_MONTH_NAMES[self.month as usize - 1]
    }
}

impl From<NaiveDate> for JalaliDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_gregorian(date)
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for JalaliDate {
    type Err = CalendarError;

    /// Accepts `YYYY/MM/DD` or `YYYY-MM-DD`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.trim().split(['/', '-']).collect();
        if parts.len() != 3 {
            return Err(CalendarError::Parse(value.to_string()));
        }
        let parse_err = || CalendarError::Parse(value.to_string());
        let year = parts[0].parse::<i32>().map_err(|_| parse_err())?;
        let month = parts[1].parse::<u32>().map_err(|_| parse_err())?;
        let day = parts[2].parse::<u32>().map_err(|_| parse_err())?;
        Self::new(year, month, day)
    }
}

/// Converts a Gregorian date to its Jalali equivalent.
pub fn gregorian_to_jalali(date: NaiveDate) -> JalaliDate {
    JalaliDate::from_gregorian(date)
}

/// Converts a Jalali triple to the Gregorian calendar, rejecting invalid triples.
pub fn jalali_to_gregorian(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    JalaliDate::new(year, month, day)?.to_gregorian()
}

fn days_before_jalali_month(month: u32) -> i64 {
    let month = i64::from(month);
    if month <= 7 {
        (month - 1) * 31
    } else {
        186 + (month - 7) * 30
    }
}

/// Days elapsed since 1 Farvardin 979.
fn jalali_day_number(date: JalaliDate) -> i64 {
    let years = i64::from(date.year) - JALALI_EPOCH_YEAR;
    365 * years
        + years.div_euclid(JALALI_CYCLE_YEARS) * 8
        + (years.rem_euclid(JALALI_CYCLE_YEARS) + 3) / 4
        + days_before_jalali_month(date.month)
        + i64::from(date.day)
        - 1
}

fn jalali_from_day_number(day_number: i64) -> JalaliDate {
    let cycles = day_number.div_euclid(JALALI_CYCLE_DAYS);
    let mut remaining = day_number.rem_euclid(JALALI_CYCLE_DAYS);
    // Each four-year group opens with its 366-day year; the cycle's last year stands alone.
    let mut year = JALALI_EPOCH_YEAR + JALALI_CYCLE_YEARS * cycles + 4 * (remaining / LEAP_GROUP_DAYS);
    remaining %= LEAP_GROUP_DAYS;
    if remaining >= 366 {
        year += (remaining - 1) / 365;
        remaining = (remaining - 1) % 365;
    }

    let mut month = 1u32;
    while month < 12 {
        let length = if month <= 6 { 31 } else { 30 };
        if remaining < length {
            break;
        }
        remaining -= length;
        month += 1;
    }

    JalaliDate {
        year: year as i32,
        month,
        day: remaining as u32 + 1,
    }
}

fn is_gregorian_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days elapsed since 1600-01-01.
fn gregorian_day_number(date: NaiveDate) -> i64 {
    let years = i64::from(date.year()) - GREGORIAN_EPOCH_YEAR;
    let month_index = date.month0() as usize;
    let mut days = 365 * years + (years + 3).div_euclid(4) - (years + 99).div_euclid(100)
        + (years + 399).div_euclid(400);
    days += GREGORIAN_MONTH_DAYS[..month_index].iter().sum::<i64>();
    if month_index > 1 && is_gregorian_leap_year(date.year()) {
        days += 1;
    }
    days + i64::from(date.day0())
}

fn gregorian_from_day_number(day_number: i64) -> Result<NaiveDate, CalendarError> {
    let mut year = GREGORIAN_EPOCH_YEAR + 400 * day_number.div_euclid(GREGORIAN_QUADRICENTURY_DAYS);
    let mut remaining = day_number.rem_euclid(GREGORIAN_QUADRICENTURY_DAYS);
    let mut leap = true;

    if remaining > GREGORIAN_CENTURY_DAYS {
        // Past the first (leap) century year: later centuries open on a common year.
        remaining -= 1;
        year += 100 * (remaining / GREGORIAN_CENTURY_DAYS);
        remaining %= GREGORIAN_CENTURY_DAYS;
        if remaining >= 365 {
            remaining += 1;
        } else {
            leap = false;
        }
    }

    year += 4 * (remaining / LEAP_GROUP_DAYS);
    remaining %= LEAP_GROUP_DAYS;
    if remaining >= 366 {
        leap = false;
        remaining -= 1;
        year += remaining / 365;
        remaining %= 365;
    }

    let mut month = 0usize;
    while month < 11 {
        let length = GREGORIAN_MONTH_DAYS[month] + i64::from(month == 1 && leap);
        if remaining < length {
            break;
        }
        remaining -= length;
        month += 1;
    }

    let out_of_range = || CalendarError::OutOfRange(format!("gregorian day number {day_number}"));
    let year = i32::try_from(year).map_err(|_| out_of_range())?;
    NaiveDate::from_ymd_opt(year, month as u32 + 1, remaining as u32 + 1).ok_or_else(out_of_range)
}
