//! Delimited-text persistence for expense tables.

pub mod csv_backend;

pub use csv_backend::{read_rows, read_rows_from, write_records, write_records_to, RawExpenseRow};
