//! Expense ledger domain: records, date parsing, category names, and the ledger itself.

pub mod category;
pub mod date_parser;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod record;

pub use category::CategoryNormalizer;
pub use date_parser::{DateInput, DateParser};
pub use ledger::{parse_amount, Ledger, LedgerOptions, LoadReport};
pub use record::{format_date, ExpenseRecord, DISPLAY_DATE_FORMAT};
