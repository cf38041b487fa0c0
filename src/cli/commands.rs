//! Non-interactive subcommands: each loads a file, prints one view, and exits.
//!
//! File arguments are names inside the configured data directory. Only the
//! final path component is used and a `.csv` suffix is enforced.

use std::path::PathBuf;

use crate::cli::{load_config, output, render, CliError};
use crate::config::{Config, ConfigManager};
use crate::core::services::{AnalyticsService, FilterService, ReportService};
use crate::ledger::{ExpenseRecord, Ledger};
use crate::logging::tracing_diagnostics;
use crate::utils::paths::safe_file_path;

pub const USAGE: &str = "\
Usage:
  expense_ledger_cli [shell]                     Start the interactive menu
  expense_ledger_cli summary <file>              Total, most and least expensive items
  expense_ledger_cli categories <file>           Spending per category
  expense_ledger_cli chart <file>                Spending chart per category
  expense_ledger_cli month <file> <month>        Expenses in a month, e.g. 2024-03
  expense_ledger_cli range <file> [start] [end]  Expenses between two dates
  expense_ledger_cli export <file> [report]      Write the category report
  expense_ledger_cli config [show]               Show preferences
  expense_ledger_cli config set <key> <value>    Change a preference

Files are looked up in the configured data directory.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Summary(String),
    Categories(String),
    Chart(String),
    Month(String, String),
    Range(String, Option<String>, Option<String>),
    Export(String, Option<String>),
    ShowConfig,
    SetConfig(String, String),
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let (name, rest) = args
            .split_first()
            .ok_or_else(|| CliError::Input("missing command".into()))?;
        let file = || {
            rest.first()
                .cloned()
                .ok_or_else(|| CliError::Input(format!("`{name}` needs an expense file")))
        };
        let arg = |idx: usize| rest.get(idx).cloned();

        match name.as_str() {
            "summary" => Ok(Command::Summary(file()?)),
            "categories" => Ok(Command::Categories(file()?)),
            "chart" => Ok(Command::Chart(file()?)),
            "month" => {
                let month = arg(1)
                    .ok_or_else(|| CliError::Input("`month` needs a month, e.g. 2024-03".into()))?;
                Ok(Command::Month(file()?, month))
            }
            "range" => Ok(Command::Range(file()?, arg(1), arg(2))),
            "export" => Ok(Command::Export(file()?, arg(1))),
            "config" => match rest.first().map(String::as_str) {
                None | Some("show") => Ok(Command::ShowConfig),
                Some("set") if rest.len() >= 2 => {
                    Ok(Command::SetConfig(rest[1].clone(), rest[2..].join(" ")))
                }
                _ => Err(CliError::Input(
                    "usage: config [show] | config set <key> <value>".into(),
                )),
            },
            other => Err(CliError::Input(format!("unknown command `{other}`"))),
        }
    }
}

pub fn run_command(args: &[String], manager: &ConfigManager) -> Result<(), CliError> {
    let command = Command::parse(args)?;
    let mut config = load_config(manager);

    match command {
        Command::Summary(file) => {
            let ledger = load(&file, &config);
            match AnalyticsService::summary(&ledger) {
                Some(summary) => output::block(&render::summary(&summary, &config)),
                None => output::info("No expenses found"),
            }
        }
        Command::Categories(file) => {
            let ledger = load(&file, &config);
            let breakdown = AnalyticsService::by_category(&ledger);
            if breakdown.is_empty() {
                output::info("No expenses to analyze");
            } else {
                output::block(&render::category_table(&breakdown, &config));
            }
        }
        Command::Chart(file) => {
            let ledger = load(&file, &config);
            let slices = AnalyticsService::chart_slices(&ledger);
            if slices.is_empty() {
                output::info("No data for chart");
            } else {
                output::block(&render::chart(&slices));
            }
        }
        Command::Month(file, month) => {
            let ledger = load(&file, &config);
            print_records(&FilterService::by_month(&ledger, &month)?, &config);
        }
        Command::Range(file, start, end) => {
            let ledger = load(&file, &config);
            let records = FilterService::by_range(&ledger, start.as_deref(), end.as_deref())?;
            print_records(&records, &config);
        }
        Command::Export(file, report) => {
            let ledger = load(&file, &config);
            let report = match report {
                Some(name) => resolve(&name, &config),
                None => config.report_path(),
            };
            let rows = ReportService::export(&ledger, &report)?;
            output::success(format!(
                "Report saved to {} ({rows} categories)",
                report.display()
            ));
        }
        Command::ShowConfig => {
            output::section("CONFIGURATION");
            for (key, value) in config.entries() {
                output::info(format!("{key}: {value}"));
            }
        }
        Command::SetConfig(key, value) => {
            config.set_value(&key, &value)?;
            manager.save(&config)?;
            output::success(format!("Updated {key} in {}", manager.path().display()));
        }
    }
    Ok(())
}

fn resolve(name: &str, config: &Config) -> PathBuf {
    safe_file_path(&config.data_dir(), name)
}

fn load(name: &str, config: &Config) -> Ledger {
    Ledger::load_with(&resolve(name, config), tracing_diagnostics(), config.ledger_options())
}

fn print_records(records: &[&ExpenseRecord], config: &Config) {
    if records.is_empty() {
        output::info("No matching records found");
    } else {
        output::block(&render::record_table(records, config));
    }
}
