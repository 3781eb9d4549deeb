//! Presentation helpers: locale-aware month labels, dates, and amounts.

use chrono::NaiveDate;
use famfin_domain::JalaliDate;

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Display language for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Persian,
    English,
}

impl Locale {
    /// Maps a BCP-47 style tag (`fa-IR`, `en`, ...) to a locale. Anything not
    /// Persian falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match language.as_str() {
            "fa" | "per" | "fas" => Locale::Persian,
            _ => Locale::English,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::Persian => "fa-IR",
            Locale::English => "en",
        }
    }

    /// Rewrites ASCII digits with the locale's numerals.
    pub fn localize_digits(self, text: &str) -> String {
        match self {
            Locale::English => text.to_string(),
            Locale::Persian => text
                .chars()
                .map(|ch| match ch.to_digit(10) {
                    Some(digit) if ch.is_ascii_digit() => PERSIAN_DIGITS[digit as usize],
                    _ => ch,
                })
                .collect(),
        }
    }
}

/// Formats currency amounts for presentation.
pub trait AmountFormatter: Send + Sync {
    fn format_amount(&self, amount: u64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// Renders Gregorian dates as Jalali dates in a locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct JalaliFormatter {
    pub locale: Locale,
}

impl JalaliFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Month label such as `Mehr 1405` or `مهر ۱۴۰۵`.
    pub fn month_label(&self, month: JalaliDate) -> String {
        let name = match self.locale {
            Locale::Persian => month.persian_month_name(),
            Locale::English => month.latin_month_name(),
        };
        self.locale
            .localize_digits(&format!("{} {}", name, month.year()))
    }
}

impl DateFormatter for JalaliFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        self.locale
            .localize_digits(&JalaliDate::from_gregorian(date).to_string())
    }
}

impl AmountFormatter for JalaliFormatter {
    /// Thousands-grouped integer amount.
    fn format_amount(&self, amount: u64) -> String {
        let digits = amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        self.locale.localize_digits(&grouped)
    }
}
