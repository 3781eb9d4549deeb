use chrono::{DateTime, Local, NaiveDate, Utc};

use famfin_core::Clock;

/// Real-time clock backed by the system time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Installments fall due on local calendar days.
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
