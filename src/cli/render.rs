//! Text views over service results. Pure functions so the shell stays thin.

use crate::cli::output::{plain, MessageKind};
use crate::cli::table::{Table, TableColumn};
use crate::config::Config;
use crate::core::services::{CategoryBreakdown, ChartSlice, SpendingSummary};
use crate::ledger::ExpenseRecord;

const RULE_WIDTH: usize = 40;
const BAR_WIDTH: usize = 30;
const DESCRIPTION_WIDTH: usize = 40;

fn record_block(title: &str, record: &ExpenseRecord, config: &Config) -> Vec<String> {
    vec![
        format!("{title}:"),
        format!("  Date: {}", record.display_date()),
        format!("  Category: {}", record.category),
        format!("  Amount: {}", config.format_amount(record.amount)),
        format!("  Description: {}", record.description),
    ]
}

pub fn summary(summary: &SpendingSummary<'_>, config: &Config) -> String {
    let mut lines = vec![
        plain(MessageKind::Section, "SPENDING SUMMARY"),
        format!("Total Expenses: {}", config.format_amount(summary.total)),
        String::new(),
    ];
    lines.extend(record_block("Most Expensive Item", summary.max_record, config));
    lines.push(String::new());
    lines.extend(record_block("Least Expensive Item", summary.min_record, config));
    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n")
}

pub fn category_table(breakdown: &[CategoryBreakdown], config: &Config) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::right("Total Amount"),
        TableColumn::right("Transaction Count"),
        TableColumn::right("Percentage (%)"),
    ]);
    for group in breakdown {
        table.push_row(vec![
            group.category.clone(),
            config.format_amount(group.total),
            group.count.to_string(),
            format!("{:.2}", group.percentage),
        ]);
    }
    table.render()
}

pub fn record_table(records: &[&ExpenseRecord], config: &Config) -> String {
    let mut table = Table::new(vec![
        TableColumn::left("Date"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Description").max_width(DESCRIPTION_WIDTH),
    ]);
    for record in records {
        table.push_row(vec![
            record.display_date(),
            record.category.clone(),
            config.format_amount(record.amount),
            record.description.clone(),
        ]);
    }
    table.render()
}

/// Horizontal bar per category, sized by its share of total spending.
pub fn chart(slices: &[ChartSlice]) -> String {
    let label_width = slices
        .iter()
        .map(|slice| slice.label.chars().count())
        .max()
        .unwrap_or(0);
    let mut lines = vec![plain(MessageKind::Section, "Spending by Category")];
    for slice in slices {
        let filled = ((slice.percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        let padding = label_width - slice.label.chars().count();
        lines.push(format!(
            "{}{} |{}{}| {:>5.1}%",
            slice.label,
            " ".repeat(padding),
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            slice.percentage
        ));
    }
    lines.join("\n")
}
