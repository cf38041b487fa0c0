use thiserror::Error;

/// Broad classification of ledger failures. None of them is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A date or amount could not be parsed.
    Parse,
    /// Input parsed but breaks a ledger rule (non-positive amount, empty field).
    Validation,
    /// The persisted table could not be read or written.
    Io,
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid date: `{0}`")]
    InvalidDate(String),
    #[error("Invalid start date: `{0}`")]
    InvalidStartDate(String),
    #[error("Invalid end date: `{0}`")]
    InvalidEndDate(String),
    #[error("Invalid month: `{0}` (use formats like YYYY-MM or MM-YYYY)")]
    InvalidMonth(String),
    #[error("Invalid amount: `{0}`")]
    InvalidAmount(String),
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(f64),
    #[error("Category must not be empty")]
    MissingCategory,
    #[error("Missing column `{0}` in expense file")]
    MissingColumn(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidDate(_)
            | LedgerError::InvalidStartDate(_)
            | LedgerError::InvalidEndDate(_)
            | LedgerError::InvalidMonth(_)
            | LedgerError::InvalidAmount(_) => ErrorKind::Parse,
            LedgerError::NonPositiveAmount(_) | LedgerError::MissingCategory => {
                ErrorKind::Validation
            }
            LedgerError::MissingColumn(_) | LedgerError::Io(_) | LedgerError::Csv(_) => {
                ErrorKind::Io
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
