pub mod analytics_service;
pub mod filter_service;
pub mod report_service;

pub use analytics_service::{AnalyticsService, CategoryBreakdown, ChartSlice, SpendingSummary};
pub use filter_service::FilterService;
pub use report_service::{ReportService, REPORT_HEADER};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Ledger(LedgerError::Io(err))
    }
}

impl From<csv::Error> for ServiceError {
    fn from(err: csv::Error) -> Self {
        ServiceError::Ledger(LedgerError::Csv(err))
    }
}
