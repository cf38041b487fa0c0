use std::path::Path;

use crate::{
    errors::{LedgerError, Result},
    logging::SharedDiagnostics,
    storage::{self, RawExpenseRow},
};

use super::{
    category::CategoryNormalizer,
    date_parser::{DateInput, DateParser},
    record::ExpenseRecord,
};

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Caller-supplied defaults applied while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerOptions {
    /// Category given to loaded rows whose category cell is blank.
    pub default_category: String,
}

impl Default for LedgerOptions {
    fn default() -> Self {
        Self {
            default_category: DEFAULT_CATEGORY.into(),
        }
    }
}

/// Outcome of the most recent load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub retained: usize,
    pub dropped: usize,
}

/// In-memory expense table plus the canonical category names seen so far.
///
/// Records are only ever appended. All reporting groups or sorts explicitly,
/// so insertion order has no meaning beyond tie-breaking.
pub struct Ledger {
    records: Vec<ExpenseRecord>,
    categories: CategoryNormalizer,
    date_parser: DateParser,
    diagnostics: SharedDiagnostics,
    options: LedgerOptions,
    last_load: LoadReport,
}

/// Coerces an amount cell to a number. Non-numeric and non-finite values yield `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

impl Ledger {
    pub fn new(diagnostics: SharedDiagnostics) -> Self {
        Self::with_options(diagnostics, LedgerOptions::default())
    }

    pub fn with_options(diagnostics: SharedDiagnostics, options: LedgerOptions) -> Self {
        Self {
            records: Vec::new(),
            categories: CategoryNormalizer::new(),
            date_parser: DateParser::new(diagnostics.clone()),
            diagnostics,
            options,
            last_load: LoadReport::default(),
        }
    }

    /// Builds a ledger from already typed records, dropping non-positive amounts
    /// and normalizing categories exactly as a load would.
    pub fn from_records(
        records: impl IntoIterator<Item = ExpenseRecord>,
        diagnostics: SharedDiagnostics,
    ) -> Self {
        let mut ledger = Self::new(diagnostics);
        let records: Vec<ExpenseRecord> = records.into_iter().collect();
        let rows_read = records.len();
        let kept: Vec<ExpenseRecord> = records
            .into_iter()
            .filter(|record| record.amount.is_finite() && record.amount > 0.0)
            .collect();
        ledger.install(kept, rows_read);
        ledger
    }

    pub fn load(path: &Path, diagnostics: SharedDiagnostics) -> Self {
        Self::load_with(path, diagnostics, LedgerOptions::default())
    }

    /// Loads the expense file at `path`.
    ///
    /// A missing file yields an empty ledger. An unreadable or malformed file
    /// also yields an empty ledger and logs an error. Rows with an unusable
    /// date or a non-positive amount are dropped and counted.
    pub fn load_with(path: &Path, diagnostics: SharedDiagnostics, options: LedgerOptions) -> Self {
        let mut ledger = Self::with_options(diagnostics, options);
        if !path.exists() {
            ledger.diagnostics.info("Creating new expense file");
            return ledger;
        }
        match storage::read_rows(path) {
            Ok(rows) => ledger.ingest(rows),
            Err(err) => ledger
                .diagnostics
                .error(&format!("Error loading file: {err}")),
        }
        ledger
    }

    fn ingest(&mut self, rows: Vec<RawExpenseRow>) {
        let rows_read = rows.len();
        let mut kept = Vec::with_capacity(rows_read);
        for row in rows {
            let amount = parse_amount(&row.amount);
            let date = self.date_parser.parse(DateInput::Text(&row.date));
            let (Some(date), Some(amount)) = (date, amount) else {
                continue;
            };
            if amount <= 0.0 {
                continue;
            }
            let category = if row.category.trim().is_empty() {
                self.options.default_category.clone()
            } else {
                row.category
            };
            kept.push(ExpenseRecord::new(date, category, amount, row.description));
        }
        self.install(kept, rows_read);
    }

    fn install(&mut self, mut records: Vec<ExpenseRecord>, rows_read: usize) {
        let dropped = rows_read - records.len();
        if dropped > 0 {
            self.diagnostics
                .info(&format!("Dropped {dropped} invalid expense rows"));
        }
        self.diagnostics
            .info(&format!("Loaded {} expense records", records.len()));

        self.categories =
            CategoryNormalizer::build(records.iter().map(|record| record.category.as_str()));
        if !records.is_empty() {
            for record in &mut records {
                record.category = self.categories.normalize(&record.category);
            }
            self.diagnostics.info("Standardized category names");
        }

        self.last_load = LoadReport {
            rows_read,
            retained: records.len(),
            dropped,
        };
        self.records = records;
    }

    /// Validates and appends one expense. State is untouched on failure.
    pub fn add<'a>(
        &mut self,
        date_input: impl Into<DateInput<'a>>,
        category_input: &str,
        amount_input: &str,
        description: &str,
    ) -> Result<&ExpenseRecord> {
        let date_input = date_input.into();
        let date = self.date_parser.parse(date_input).ok_or_else(|| {
            LedgerError::InvalidDate(match date_input {
                DateInput::Text(text) => text.to_string(),
                _ => String::new(),
            })
        })?;
        let amount = parse_amount(amount_input)
            .ok_or_else(|| LedgerError::InvalidAmount(amount_input.to_string()))?;
        if amount <= 0.0 {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        if category_input.trim().is_empty() {
            return Err(LedgerError::MissingCategory);
        }

        let category = self.categories.normalize(category_input);
        self.records
            .push(ExpenseRecord::new(date, category, amount, description));
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }

    pub fn try_save(&self, path: &Path) -> Result<()> {
        storage::write_records(path, &self.records)
    }

    /// Overwrites `path` with every record. Failures are logged and reported as `false`.
    pub fn save(&self, path: &Path) -> bool {
        match self.try_save(path) {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.diagnostics.info(&format!("Data saved to {name}"));
                true
            }
            Err(err) => {
                self.diagnostics.error(&format!("Error saving file: {err}"));
                false
            }
        }
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn categories(&self) -> &CategoryNormalizer {
        &self.categories
    }

    pub fn date_parser(&self) -> &DateParser {
        &self.date_parser
    }

    pub fn diagnostics(&self) -> &SharedDiagnostics {
        &self.diagnostics
    }

    pub fn last_load(&self) -> LoadReport {
        self.last_load
    }
}
