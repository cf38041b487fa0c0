use std::{fs::File, io::Write, path::Path};

use csv::WriterBuilder;

use crate::ledger::Ledger;

use super::{AnalyticsService, CategoryBreakdown, ServiceError, ServiceResult};

pub const REPORT_HEADER: [&str; 4] = [
    "Category",
    "Total Amount",
    "Transaction Count",
    "Percentage (%)",
];

pub struct ReportService;

impl ReportService {
    /// Writes the category breakdown to `path`, returning the number of rows.
    pub fn export(ledger: &Ledger, path: &Path) -> ServiceResult<usize> {
        let breakdown = Self::breakdown_for_export(ledger)?;
        let file = File::create(path)?;
        Self::write_report(file, &breakdown)?;
        ledger
            .diagnostics()
            .info(&format!("Report saved to {}", path.display()));
        Ok(breakdown.len())
    }

    fn breakdown_for_export(ledger: &Ledger) -> ServiceResult<Vec<CategoryBreakdown>> {
        if ledger.is_empty() {
            return Err(ServiceError::Invalid("No data to export".into()));
        }
        Ok(AnalyticsService::by_category(ledger))
    }

    pub fn write_report<W: Write>(writer: W, breakdown: &[CategoryBreakdown]) -> ServiceResult<()> {
        let mut writer = WriterBuilder::new().from_writer(writer);
        writer.write_record(REPORT_HEADER)?;
        for group in breakdown {
            writer.write_record([
                group.category.clone(),
                format!("{:.2}", group.total),
                group.count.to_string(),
                format!("{:.2}", group.percentage),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ExpenseRecord;
    use crate::logging::MemoryDiagnostics;
    use chrono::NaiveDate;

    #[test]
    fn report_rows_are_sorted_by_total() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let ledger = Ledger::from_records(
            vec![
                ExpenseRecord::new(date, "Food", 10.0, ""),
                ExpenseRecord::new(date, "Rent", 30.0, ""),
            ],
            MemoryDiagnostics::new(),
        );
        let mut buffer = Vec::new();
        ReportService::write_report(&mut buffer, &AnalyticsService::by_category(&ledger)).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Category,Total Amount,Transaction Count,Percentage (%)\n\
             Rent,30.00,1,75.00\n\
             Food,10.00,1,25.00\n"
        );
    }

    #[test]
    fn exporting_empty_ledger_is_rejected() {
        let ledger = Ledger::new(MemoryDiagnostics::new());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let err = ReportService::export(&ledger, &path).unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(_)));
        assert!(!path.exists());
    }
}
