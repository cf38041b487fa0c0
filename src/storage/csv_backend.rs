use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::{
    errors::{LedgerError, Result},
    ledger::ExpenseRecord,
};

pub const DATE_COLUMN: &str = "Date";
pub const CATEGORY_COLUMN: &str = "Category";
pub const AMOUNT_COLUMN: &str = "Amount";
pub const DESCRIPTION_COLUMN: &str = "Description";

pub const HEADER: [&str; 4] = [
    DATE_COLUMN,
    CATEGORY_COLUMN,
    AMOUNT_COLUMN,
    DESCRIPTION_COLUMN,
];

/// One data row exactly as it appears in the file, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawExpenseRow {
    pub date: String,
    pub category: String,
    pub amount: String,
    pub description: String,
}

struct ColumnIndex {
    date: usize,
    category: usize,
    amount: usize,
    description: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|header| header.trim() == name);
        Ok(Self {
            date: find(DATE_COLUMN).ok_or(LedgerError::MissingColumn(DATE_COLUMN))?,
            category: find(CATEGORY_COLUMN).ok_or(LedgerError::MissingColumn(CATEGORY_COLUMN))?,
            amount: find(AMOUNT_COLUMN).ok_or(LedgerError::MissingColumn(AMOUNT_COLUMN))?,
            description: find(DESCRIPTION_COLUMN),
        })
    }
}

pub fn read_rows(path: &Path) -> Result<Vec<RawExpenseRow>> {
    let file = File::open(path)?;
    read_rows_from(file)
}

/// Reads every data row. Short rows are kept with empty cells so the caller
/// can decide whether they are usable.
pub fn read_rows_from<R: Read>(reader: R) -> Result<Vec<RawExpenseRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;
    let cell = |record: &StringRecord, idx: usize| record.get(idx).unwrap_or("").to_string();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawExpenseRow {
            date: cell(&record, columns.date),
            category: cell(&record, columns.category),
            amount: cell(&record, columns.amount),
            description: columns
                .description
                .map(|idx| cell(&record, idx))
                .unwrap_or_default(),
        });
    }
    Ok(rows)
}

pub fn write_records(path: &Path, records: &[ExpenseRecord]) -> Result<()> {
    let file = File::create(path)?;
    write_records_to(file, records)
}

/// Writes the header followed by every record, dates as `DD-MM-YYYY`.
pub fn write_records_to<W: Write>(writer: W, records: &[ExpenseRecord]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
