use famfin_domain::CalendarError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),
    #[error("invalid installment count: {0}")]
    InvalidInstallmentCount(u32),
    #[error("Member not found: {0}")]
    MemberNotFound(String),
    #[error("Asset not found: {0}")]
    AssetNotFound(Uuid),
    #[error("Debt not found: {0}")]
    DebtNotFound(String),
    #[error("Installment not found: {0}")]
    InstallmentNotFound(String),
    #[error("Income not found: {0}")]
    IncomeNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
