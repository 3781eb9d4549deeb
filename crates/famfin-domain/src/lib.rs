//! famfin-domain
//!
//! Pure household finance models and the Jalali calendar engine they are scheduled on.
//! No I/O, no CLI, no storage. Only data types, calendar math, and core enums.

pub mod asset;
pub mod calendar;
pub mod common;
pub mod debt;
pub mod household;
pub mod income;
pub mod jalali;
pub mod member;

pub use asset::*;
pub use calendar::*;
pub use common::*;
pub use debt::*;
pub use household::*;
pub use income::*;
pub use jalali::*;
pub use member::*;
