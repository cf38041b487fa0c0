//! Tolerant date parsing for expense rows and user input.
//!
//! Inputs are reduced to digits and the separators `-`, `/`, `.` and then
//! matched against a fixed, ordered list of layouts. The first layout that
//! matches the whole input wins. Ambiguous inputs such as `03-04-2024`
//! therefore always resolve as day-month-year.

use chrono::NaiveDate;

use crate::logging::SharedDiagnostics;

/// Values treated as "no date" rather than as a malformed date.
const MISSING_MARKERS: &[&str] = &["nan", "nat", "na", "n/a", "#n/a", "<na>", "null", "none"];

const SEPARATORS: [char; 3] = ['-', '/', '.'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Day,
    Month,
    Year,
}

use DateField::{Day, Month, Year};

/// Field orders tried in precedence order. Layouts without a day default it to 1.
pub const LAYOUTS: [&[DateField]; 5] = [
    &[Day, Month, Year],
    &[Month, Day, Year],
    &[Year, Month, Day],
    &[Month, Year],
    &[Year, Month],
];

/// Input accepted by [`DateParser::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInput<'a> {
    Date(NaiveDate),
    Text(&'a str),
    Missing,
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(text: &'a str) -> Self {
        DateInput::Text(text)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(text: &'a String) -> Self {
        DateInput::Text(text.as_str())
    }
}

impl<'a> From<Option<&'a str>> for DateInput<'a> {
    fn from(text: Option<&'a str>) -> Self {
        text.map_or(DateInput::Missing, DateInput::Text)
    }
}

#[derive(Clone)]
pub struct DateParser {
    diagnostics: SharedDiagnostics,
}

impl DateParser {
    pub fn new(diagnostics: SharedDiagnostics) -> Self {
        Self { diagnostics }
    }

    /// Converts `input` into a calendar date.
    ///
    /// Returns `None` for missing values and for text no layout accepts; the
    /// latter also emits a warning. Future dates are not rejected here.
    pub fn parse<'a>(&self, input: impl Into<DateInput<'a>>) -> Option<NaiveDate> {
        match input.into() {
            DateInput::Date(date) => Some(date),
            DateInput::Missing => None,
            DateInput::Text(text) => {
                if is_missing(text) {
                    return None;
                }
                let parsed = parse_text(text);
                if parsed.is_none() {
                    self.diagnostics
                        .warn(&format!("Unrecognized date format: {text}"));
                }
                parsed
            }
        }
    }
}

fn is_missing(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

/// Parses text against every layout without emitting diagnostics.
pub fn parse_text(text: &str) -> Option<NaiveDate> {
    let cleaned: String = text
        .chars()
        .filter(|ch| ch.is_ascii_digit() || SEPARATORS.contains(ch))
        .collect();

    LAYOUTS.iter().find_map(|layout| {
        SEPARATORS
            .iter()
            .find_map(|separator| try_layout(&cleaned, layout, *separator))
    })
}

fn try_layout(input: &str, layout: &[DateField], separator: char) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split(separator).collect();
    if parts.len() != layout.len() {
        return None;
    }

    let mut day = 1;
    let mut month = None;
    let mut year = None;
    for (part, field) in parts.iter().zip(layout) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        match field {
            Day | Month if part.len() > 2 => return None,
            Year if part.len() != 4 => return None,
            _ => {}
        }
        let value: u32 = part.parse().ok()?;
        match field {
            Day => day = value,
            Month => month = Some(value),
            Year => year = Some(value as i32),
        }
    }

    // no year zero in the calendar users write
    let year = year.filter(|year| *year >= 1)?;
    NaiveDate::from_ymd_opt(year, month?, day)
}
