use chrono::{Datelike, NaiveDate};

use crate::errors::LedgerError;
use crate::ledger::{ExpenseRecord, Ledger};

use super::ServiceResult;

pub struct FilterService;

impl FilterService {
    /// Records dated within the inclusive bounds. Absent bounds are open.
    pub fn between(
        ledger: &Ledger,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Vec<&ExpenseRecord> {
        ledger
            .records()
            .iter()
            .filter(|record| start.map_or(true, |start| record.date >= start))
            .filter(|record| end.map_or(true, |end| record.date <= end))
            .collect()
    }

    /// Parses textual bounds and filters by them. Blank bounds count as absent;
    /// a bound that does not parse is an error rather than an empty result.
    pub fn by_range<'a>(
        ledger: &'a Ledger,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ServiceResult<Vec<&'a ExpenseRecord>> {
        let start = parse_bound(ledger, start, LedgerError::InvalidStartDate)?;
        let end = parse_bound(ledger, end, LedgerError::InvalidEndDate)?;
        Ok(Self::between(ledger, start, end))
    }

    pub fn in_month(ledger: &Ledger, year: i32, month: u32) -> Vec<&ExpenseRecord> {
        ledger
            .records()
            .iter()
            .filter(|record| record.date.year() == year && record.date.month() == month)
            .collect()
    }

    /// Records falling in the calendar month named by `month_spec`, e.g. `2024-03`.
    pub fn by_month<'a>(
        ledger: &'a Ledger,
        month_spec: &str,
    ) -> ServiceResult<Vec<&'a ExpenseRecord>> {
        let month = ledger
            .date_parser()
            .parse(month_spec)
            .ok_or_else(|| LedgerError::InvalidMonth(month_spec.to_string()))?;
        Ok(Self::in_month(ledger, month.year(), month.month()))
    }
}

fn parse_bound(
    ledger: &Ledger,
    bound: Option<&str>,
    invalid: fn(String) -> LedgerError,
) -> ServiceResult<Option<NaiveDate>> {
    match bound.map(str::trim).filter(|text| !text.is_empty()) {
        None => Ok(None),
        Some(text) => ledger
            .date_parser()
            .parse(text)
            .map(Some)
            .ok_or_else(|| invalid(text.to_string()).into()),
    }
}
