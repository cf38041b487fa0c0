//! Expense rows held by the ledger.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Canonical textual form used whenever a date is written or displayed.
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y";

/// A single validated expense.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseRecord {
    #[serde(rename = "Date", serialize_with = "serialize_display_date")]
    pub date: NaiveDate,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Description")]
    pub description: String,
}

impl ExpenseRecord {
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            description: description.into(),
        }
    }

    pub fn display_date(&self) -> String {
        format_date(self.date)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

fn serialize_display_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_date(*date))
}
