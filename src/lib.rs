#![doc(test(attr(deny(warnings))))]

//! famfin tracks a household's members, assets, debts, and recurring incomes,
//! scheduling installments on the Jalali (Persian solar) calendar.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("famfin tracing initialized.");
    });
}
