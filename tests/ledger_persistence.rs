mod common;

use std::fs;

use chrono::NaiveDate;
use expense_ledger::{
    ledger::{Ledger, LedgerOptions},
    logging::{Level, MemoryDiagnostics},
};
use tempfile::tempdir;

use common::write_expenses;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn loads_day_first_row() {
    let temp = tempdir().unwrap();
    let path = write_expenses(temp.path(), "expenses.csv", &["15/03/2024,Groceries,45.50,Weekly shop"]);

    let ledger = Ledger::load(&path, MemoryDiagnostics::new());

    assert_eq!(ledger.len(), 1);
    let record = &ledger.records()[0];
    assert_eq!(record.date, date(2024, 3, 15));
    assert_eq!(record.category, "Groceries");
    assert_eq!(record.amount, 45.50);
    assert_eq!(record.description, "Weekly shop");
}

#[test]
fn category_variants_collapse_to_most_common_spelling() {
    let temp = tempdir().unwrap();
    let path = write_expenses(
        temp.path(),
        "expenses.csv",
        &[
            "01-03-2024,groceries,1,",
            "02-03-2024,Groceries,2,",
            "03-03-2024,Groceries,3,",
            "04-03-2024,Groceries,4,",
        ],
    );

    let ledger = Ledger::load(&path, MemoryDiagnostics::new());

    assert!(ledger.records().iter().all(|r| r.category == "Groceries"));
    assert_eq!(ledger.categories().len(), 1);
}

#[test]
fn mixed_formats_load_and_bad_rows_are_dropped() {
    let temp = tempdir().unwrap();
    let path = write_expenses(
        temp.path(),
        "expenses.csv",
        &[
            "2024.01.05,Rent,900,January",
            "12/25/2024,Gifts,60,",
            "02-2024,Utilities,80.25,Monthly",
            "not a date,Food,10,",
            "10-01-2024,Food,zero,",
            "11-01-2024,Food,-3,",
            ",Food,5,",
            "12-01-2024,Food",
        ],
    );
    let sink = MemoryDiagnostics::new();

    let ledger = Ledger::load(&path, sink.clone());

    let dates: Vec<NaiveDate> = ledger.records().iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![date(2024, 1, 5), date(2024, 12, 25), date(2024, 2, 1)]);
    assert!(ledger.records().iter().all(|r| r.amount > 0.0));
    assert_eq!(ledger.last_load().dropped, 5);
    assert!(sink
        .messages(Level::Warn)
        .iter()
        .any(|message| message.contains("not a date")));
}

#[test]
fn missing_file_starts_empty() {
    let temp = tempdir().unwrap();
    let sink = MemoryDiagnostics::new();

    let ledger = Ledger::load(&temp.path().join("absent.csv"), sink.clone());

    assert!(ledger.is_empty());
    assert!(sink.messages(Level::Error).is_empty());
    assert!(sink
        .messages(Level::Info)
        .iter()
        .any(|message| message.contains("Creating new expense file")));
}

#[test]
fn malformed_file_starts_empty_and_logs_error() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("expenses.csv");
    fs::write(&path, "When,What\n01-01-2024,Food\n").unwrap();
    let sink = MemoryDiagnostics::new();

    let ledger = Ledger::load(&path, sink.clone());

    assert!(ledger.is_empty());
    let errors = sink.messages(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Error loading file"));
}

#[test]
fn non_utf8_file_starts_empty() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("expenses.csv");
    let mut bytes = b"Date,Category,Amount,Description\n01-01-2024,".to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, 0xfd]);
    bytes.extend_from_slice(b",5,\n");
    fs::write(&path, bytes).unwrap();

    let ledger = Ledger::load(&path, MemoryDiagnostics::new());

    assert!(ledger.is_empty());
}

#[test]
fn blank_categories_receive_default_on_load() {
    let temp = tempdir().unwrap();
    let path = write_expenses(temp.path(), "expenses.csv", &["01-01-2024,,5,"]);
    let options = LedgerOptions {
        default_category: "Other".into(),
    };

    let ledger = Ledger::load_with(&path, MemoryDiagnostics::new(), options);

    assert_eq!(ledger.records()[0].category, "Other");
}

#[test]
fn save_normalizes_dates_and_reloads_identically() {
    let temp = tempdir().unwrap();
    let path = write_expenses(
        temp.path(),
        "expenses.csv",
        &["2024/03/15,Groceries,45.5,Weekly shop", "03.04.2024,Rent,900,"],
    );
    let mut ledger = Ledger::load(&path, MemoryDiagnostics::new());
    ledger
        .add("2024-04-20", "groceries", "12.25", "Top-up, milk")
        .expect("valid expense");

    assert!(ledger.save(&path));

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "Date,Category,Amount,Description\n\
         15-03-2024,Groceries,45.5,Weekly shop\n\
         03-04-2024,Rent,900.0,\n\
         20-04-2024,Groceries,12.25,\"Top-up, milk\"\n"
    );
    let reloaded = Ledger::load(&path, MemoryDiagnostics::new());
    assert_eq!(reloaded.records(), ledger.records());
}

#[test]
fn save_failure_reports_false() {
    let temp = tempdir().unwrap();
    let sink = MemoryDiagnostics::new();
    let mut ledger = Ledger::new(sink.clone());
    ledger.add("01-01-2024", "Food", "5", "").unwrap();

    assert!(!ledger.save(temp.path()));
    assert!(sink
        .messages(Level::Error)
        .iter()
        .any(|message| message.contains("Error saving file")));
}
