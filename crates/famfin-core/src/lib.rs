//! famfin-core
//!
//! Business logic and services for the household finance tracker.
//! Depends on famfin-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod asset_service;
pub mod debt_service;
pub mod error;
pub mod format;
pub mod income_service;
pub mod member_service;
pub mod public_api;
pub mod report_service;
pub mod schedule_service;
pub mod storage;
pub mod summary_service;
pub mod time;

pub use asset_service::*;
pub use debt_service::*;
pub use error::{CoreError, CoreResult};
pub use format::*;
pub use income_service::*;
pub use member_service::*;
pub use report_service::*;
pub use schedule_service::*;
pub use storage::*;
pub use summary_service::*;
pub use time::*;

#[cfg(test)]
mod tests;
