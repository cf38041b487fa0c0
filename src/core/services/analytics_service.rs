use std::collections::HashMap;

use crate::ledger::{ExpenseRecord, Ledger};

/// Totals plus the most and least expensive records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpendingSummary<'a> {
    pub total: f64,
    pub max_record: &'a ExpenseRecord,
    pub min_record: &'a ExpenseRecord,
}

/// Spending for a single canonical category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: f64,
    pub count: usize,
    /// Share of all spending, rounded to two decimals.
    pub percentage: f64,
}

/// Data handed to a chart renderer: one slice per category.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
}

pub struct AnalyticsService;

impl AnalyticsService {
    /// Returns `None` for an empty ledger.
    pub fn summary(ledger: &Ledger) -> Option<SpendingSummary<'_>> {
        let mut records = ledger.records().iter();
        let first = records.next()?;
        let mut summary = SpendingSummary {
            total: first.amount,
            max_record: first,
            min_record: first,
        };
        for record in records {
            summary.total += record.amount;
            // strict comparisons keep the first occurrence on ties
            if record.amount > summary.max_record.amount {
                summary.max_record = record;
            }
            if record.amount < summary.min_record.amount {
                summary.min_record = record;
            }
        }
        Some(summary)
    }

    pub fn total(ledger: &Ledger) -> f64 {
        ledger.records().iter().map(|record| record.amount).sum()
    }

    /// Per-category totals, largest first. Equal totals keep first-seen order.
    pub fn by_category(ledger: &Ledger) -> Vec<CategoryBreakdown> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<CategoryBreakdown> = Vec::new();
        for record in ledger.records() {
            let slot = *index.entry(record.category.as_str()).or_insert_with(|| {
                groups.push(CategoryBreakdown {
                    category: record.category.clone(),
                    total: 0.0,
                    count: 0,
                    percentage: 0.0,
                });
                groups.len() - 1
            });
            groups[slot].total += record.amount;
            groups[slot].count += 1;
        }

        let grand_total: f64 = groups.iter().map(|group| group.total).sum();
        if grand_total > 0.0 {
            for group in &mut groups {
                group.percentage = round2(100.0 * group.total / grand_total);
            }
        }

        groups.sort_by(|a, b| b.total.total_cmp(&a.total));
        groups
    }

    pub fn chart_slices(ledger: &Ledger) -> Vec<ChartSlice> {
        Self::by_category(ledger)
            .into_iter()
            .map(|group| ChartSlice {
                label: group.category,
                value: group.total,
                percentage: group.percentage,
            })
            .collect()
    }
}

/// Two decimals, ties to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryDiagnostics;
    use chrono::NaiveDate;

    fn ledger(rows: &[(&str, f64)]) -> Ledger {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Ledger::from_records(
            rows.iter()
                .map(|(category, amount)| ExpenseRecord::new(date, *category, *amount, "")),
            MemoryDiagnostics::new(),
        )
    }

    #[test]
    fn summary_of_empty_ledger_is_none() {
        assert!(AnalyticsService::summary(&ledger(&[])).is_none());
        assert!(AnalyticsService::by_category(&ledger(&[])).is_empty());
    }

    #[test]
    fn summary_picks_first_extreme_on_ties() {
        let ledger = ledger(&[("A", 5.0), ("B", 9.0), ("C", 9.0), ("D", 1.0), ("E", 1.0)]);
        let summary = AnalyticsService::summary(&ledger).unwrap();
        assert_eq!(summary.total, 25.0);
        assert_eq!(summary.max_record.category, "B");
        assert_eq!(summary.min_record.category, "D");
    }

    #[test]
    fn groups_sum_count_and_sort_descending() {
        let ledger = ledger(&[
            ("Food", 10.0),
            ("Rent", 50.0),
            ("food", 15.0),
            ("Fun", 25.0),
        ]);
        let groups = AnalyticsService::by_category(&ledger);
        let names: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "Fun"]);
        assert_eq!(groups[1].total, 25.0);
        assert_eq!(groups[1].count, 2);
        assert_eq!(groups[0].percentage, 50.0);
        assert_eq!(groups[1].percentage, 25.0);
    }

    #[test]
    fn equal_totals_keep_first_seen_order() {
        let ledger = ledger(&[("Zoo", 5.0), ("Art", 5.0), ("Music", 5.0)]);
        let names: Vec<String> = AnalyticsService::by_category(&ledger)
            .into_iter()
            .map(|g| g.category)
            .collect();
        assert_eq!(names, vec!["Zoo", "Art", "Music"]);
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let ledger = ledger(&[("A", 1.0), ("B", 1.0), ("C", 1.0), ("D", 7.31)]);
        let sum: f64 = AnalyticsService::by_category(&ledger)
            .iter()
            .map(|g| g.percentage)
            .sum();
        assert!((sum - 100.0).abs() < 0.05, "sum was {sum}");
    }

    #[test]
    fn percentage_ties_round_to_even() {
        let groups = AnalyticsService::by_category(&ledger(&[("A", 1.0), ("B", 799.0)]));
        assert_eq!(groups[1].category, "A");
        assert_eq!(groups[1].percentage, 0.12);
        assert_eq!(groups[0].percentage, 99.88);
    }

    #[test]
    fn chart_slices_follow_breakdown_order() {
        let ledger = ledger(&[("Food", 10.0), ("Rent", 30.0)]);
        let slices = AnalyticsService::chart_slices(&ledger);
        assert_eq!(slices[0].label, "Rent");
        assert_eq!(slices[0].percentage, 75.0);
        assert_eq!(slices[1].value, 10.0);
    }
}
