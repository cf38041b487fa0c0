use std::{
    env, io,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate};

use crate::cli::prompts::{DialoguerPrompter, Prompter, ScriptPrompter};
use crate::cli::{load_config, output, render, CliError, SCRIPT_ENV};
use crate::config::{Config, ConfigManager};
use crate::core::services::{AnalyticsService, FilterService, ReportService, ServiceError};
use crate::ledger::Ledger;
use crate::logging::tracing_diagnostics;
use crate::utils::paths::{list_csv_files, safe_file_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Summary,
    Categories,
    Chart,
    Filter,
    AddExpense,
    Export,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 7] = [
        MenuAction::Summary,
        MenuAction::Categories,
        MenuAction::Chart,
        MenuAction::Filter,
        MenuAction::AddExpense,
        MenuAction::Export,
        MenuAction::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Summary => "Spending Summary",
            MenuAction::Categories => "Category Analysis",
            MenuAction::Chart => "Spending Chart",
            MenuAction::Filter => "Filter Expenses",
            MenuAction::AddExpense => "Add Expense",
            MenuAction::Export => "Export Report",
            MenuAction::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let config = load_config(&ConfigManager::new());
    if env::var_os(SCRIPT_ENV).is_some() {
        run_with(config, ScriptPrompter::new(io::stdin().lock()))
    } else {
        run_with(config, DialoguerPrompter::new())
    }
}

fn run_with<P: Prompter>(config: Config, mut prompter: P) -> Result<(), CliError> {
    let data_path = match choose_data_file(&mut prompter, &config) {
        Ok(path) => path,
        Err(CliError::EndOfInput) => return Ok(()),
        Err(err) => return Err(err),
    };
    let diagnostics = tracing_diagnostics();
    diagnostics.info(&format!("Using data file: {}", file_name(&data_path)));
    let ledger = Ledger::load_with(&data_path, diagnostics, config.ledger_options());
    Session::new(ledger, config, data_path, prompter).run()
}

/// Offers the `.csv` files in the data directory, defaulting to the configured file.
fn choose_data_file<P: Prompter>(prompter: &mut P, config: &Config) -> Result<PathBuf, CliError> {
    let dir = config.data_dir();
    let files = list_csv_files(&dir).unwrap_or_default();
    if files.is_empty() {
        return Ok(config.data_path());
    }
    let mut items = files.clone();
    items.push(format!("Use default ({})", config.data_file));
    let default = items.len() - 1;
    let choice = prompter.select("Select expense file", &items, default)?;
    Ok(match files.get(choice) {
        Some(name) => safe_file_path(&dir, name),
        None => config.data_path(),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One interactive session over a single expense file.
pub struct Session<P: Prompter> {
    ledger: Ledger,
    config: Config,
    data_path: PathBuf,
    prompter: P,
    today: NaiveDate,
    unsaved: bool,
}

impl<P: Prompter> Session<P> {
    pub fn new(ledger: Ledger, config: Config, data_path: PathBuf, prompter: P) -> Self {
        Self {
            ledger,
            config,
            data_path,
            prompter,
            today: Local::now().date_naive(),
            unsaved: false,
        }
    }

    /// Overrides the date used to detect future-dated expenses.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn run(&mut self) -> Result<(), CliError> {
        output::info(format!(
            "Welcome to Expense Ledger! (Data file: {})",
            file_name(&self.data_path)
        ));
        loop {
            match self.step() {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(CliError::EndOfInput) => {
                    output::info("Exiting shell.");
                    break;
                }
                Err(err @ (CliError::Prompt(_) | CliError::Io(_))) => return Err(err),
                Err(err) => output::error(err),
            }
        }
        Ok(())
    }

    fn step(&mut self) -> Result<LoopControl, CliError> {
        let labels: Vec<String> = MenuAction::ALL
            .iter()
            .map(|action| action.label().to_string())
            .collect();
        let choice = self.prompter.select("Choose an option", &labels, 0)?;
        self.dispatch(MenuAction::ALL[choice])
    }

    pub fn dispatch(&mut self, action: MenuAction) -> Result<LoopControl, CliError> {
        match action {
            MenuAction::Summary => self.show_summary(),
            MenuAction::Categories => self.show_categories(),
            MenuAction::Chart => self.show_chart(),
            MenuAction::Filter => self.filter()?,
            MenuAction::AddExpense => self.add_expense()?,
            MenuAction::Export => self.export_report(),
            MenuAction::Exit => return self.exit(),
        }
        Ok(LoopControl::Continue)
    }

    fn show_summary(&self) {
        match AnalyticsService::summary(&self.ledger) {
            Some(summary) => output::block(&render::summary(&summary, &self.config)),
            None => output::info("No expenses found"),
        }
    }

    fn show_categories(&self) {
        let breakdown = AnalyticsService::by_category(&self.ledger);
        if breakdown.is_empty() {
            output::info("No expenses to analyze");
            return;
        }
        output::section("CATEGORY ANALYSIS");
        output::block(&render::category_table(&breakdown, &self.config));
    }

    fn show_chart(&self) {
        let slices = AnalyticsService::chart_slices(&self.ledger);
        if slices.is_empty() {
            output::info("No data for chart");
            return;
        }
        output::block(&render::chart(&slices));
    }

    fn filter(&mut self) -> Result<(), CliError> {
        let kinds = vec!["Date Range".to_string(), "Month".to_string()];
        let records = if self.prompter.select("Filter by", &kinds, 0)? == 0 {
            let start = self
                .prompter
                .input("Start date (e.g., DD-MM-YYYY, blank for none)")?;
            let end = self
                .prompter
                .input("End date (e.g., DD-MM-YYYY, blank for none)")?;
            FilterService::by_range(&self.ledger, Some(start.as_str()), Some(end.as_str()))?
        } else {
            let month = self.prompter.input("Month (e.g., YYYY-MM)")?;
            FilterService::by_month(&self.ledger, &month)?
        };

        if records.is_empty() {
            output::info("No matching records found");
        } else {
            output::block(&render::record_table(&records, &self.config));
        }
        Ok(())
    }

    fn add_expense(&mut self) -> Result<(), CliError> {
        let date_text = self
            .prompter
            .input("Enter date (DD-MM-YYYY, MM/DD/YYYY, or YYYY.MM.DD)")?;
        let category = self.prompter.input("Enter category")?;
        let amount = self.prompter.input("Enter amount")?;
        let description = self.prompter.input("Enter description")?;

        let Some(date) = self.ledger.date_parser().parse(date_text.as_str()) else {
            output::warning("Please use a valid date format like DD-MM-YYYY");
            return Ok(());
        };
        if date > self.today
            && !self
                .prompter
                .confirm("Future date detected. Continue?", false)?
        {
            output::info("Expense not added");
            return Ok(());
        }

        let category = if category.trim().is_empty() {
            self.config.default_category.clone()
        } else {
            category
        };
        let added = match self
            .ledger
            .add(date, &category, &amount, description.trim())
        {
            Ok(record) => format!(
                "Added: {}, {}, {}",
                record.display_date(),
                record.category,
                self.config.format_amount(record.amount)
            ),
            Err(err) => {
                output::error(err);
                return Ok(());
            }
        };
        output::success(added);
        self.unsaved = true;

        if self.prompter.confirm("Save to file now?", false)? {
            if self.save() {
                output::success("Expense saved successfully!");
            } else {
                output::error("Failed to save expense");
            }
        } else {
            output::info("Expense added locally. Save before exiting!");
        }
        Ok(())
    }

    fn export_report(&self) {
        let path = self.config.report_path();
        match ReportService::export(&self.ledger, &path) {
            Ok(rows) => {
                output::block(&render::category_table(
                    &AnalyticsService::by_category(&self.ledger),
                    &self.config,
                ));
                output::success(format!(
                    "Report saved to {} ({rows} categories)",
                    path.display()
                ));
            }
            Err(ServiceError::Invalid(message)) => output::info(message),
            Err(err) => output::error(err),
        }
    }

    fn exit(&mut self) -> Result<LoopControl, CliError> {
        if !self.ledger.is_empty()
            && self
                .prompter
                .confirm("Save changes before exiting?", self.unsaved)?
        {
            if self.save() {
                output::success("Changes saved successfully!");
            } else {
                output::error("Save failed");
            }
        }
        output::info("Thank you for using Expense Ledger!");
        Ok(LoopControl::Exit)
    }

    fn save(&mut self) -> bool {
        let saved = self.ledger.save(&self.data_path);
        if saved {
            self.unsaved = false;
        }
        saved
    }
}
