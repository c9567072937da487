pub mod account_service;
pub mod category_service;
pub mod quick_service;
pub mod recurrence_service;
pub mod summary_service;
pub mod transaction_service;
pub mod transfer_service;

pub use account_service::AccountService;
pub use category_service::CategoryService;
pub use quick_service::QuickService;
pub use recurrence_service::{RecurrenceService, SweepReport};
pub use summary_service::{CategorySpend, DailyFlow, SummaryService};
pub use transaction_service::TransactionService;
pub use transfer_service::{TransferReceipt, TransferRequest, TransferService};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Validation outcomes reported synchronously to the initiating action. None of
/// them leave partial state behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("A category is required")]
    MissingCategory,
    #[error("Source and destination accounts must differ")]
    SameAccount,
    #[error("At least two accounts are needed for a transfer")]
    NotEnoughAccounts,
    #[error("Account `{0}` does not exist")]
    UnknownAccount(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid recurrence: {0}")]
    InvalidRecurrence(String),
    #[error("{0} {1} is outside 1-31")]
    InvalidDay(&'static str, u8),
}

pub(crate) fn require_text(field: &'static str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        Err(ServiceError::EmptyField(field))
    } else {
        Ok(())
    }
}

pub(crate) fn require_positive(amount: f64) -> ServiceResult<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ServiceError::NonPositiveAmount)
    }
}

/// Trims optional free text, mapping blank input to `None`.
pub(crate) fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
