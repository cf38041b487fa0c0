//! User input sources for the shell: dialoguer widgets or scripted stdin lines.

use std::io::{BufRead, Lines};

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use super::output;
use super::CliError;

pub trait Prompter {
    /// Returns the index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize, CliError>;
    /// Free-form text; may be empty.
    fn input(&mut self, prompt: &str) -> Result<String, CliError>;
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CliError>;
}

pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize, CliError> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn input(&mut self, prompt: &str) -> Result<String, CliError> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CliError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

/// Answers prompts from consecutive input lines, one answer per line.
///
/// Selections accept a 1-based index or the item text (case-insensitive);
/// a blank line picks the default. Confirmations accept `y`/`yes`/`n`/`no`.
pub struct ScriptPrompter<R> {
    lines: Lines<R>,
}

impl<R: BufRead> ScriptPrompter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    fn next_answer(&mut self, prompt: &str) -> Result<String, CliError> {
        let line = self.lines.next().ok_or(CliError::EndOfInput)??;
        let answer = line.trim().to_string();
        output::prompt(format!("{prompt}: {answer}"));
        Ok(answer)
    }
}

impl<R: BufRead> Prompter for ScriptPrompter<R> {
    fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize, CliError> {
        let answer = self.next_answer(prompt)?;
        if answer.is_empty() {
            return Ok(default);
        }
        if let Ok(number) = answer.parse::<usize>() {
            if (1..=items.len()).contains(&number) {
                return Ok(number - 1);
            }
        }
        items
            .iter()
            .position(|item| item.eq_ignore_ascii_case(&answer))
            .ok_or_else(|| CliError::Input(format!("`{answer}` is not a valid choice")))
    }

    fn input(&mut self, prompt: &str) -> Result<String, CliError> {
        self.next_answer(prompt)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, CliError> {
        let answer = self.next_answer(prompt)?.to_ascii_lowercase();
        match answer.as_str() {
            "" => Ok(default),
            "y" | "yes" => Ok(true),
            "n" | "no" => Ok(false),
            other => Err(CliError::Input(format!("expected y or n, got `{other}`"))),
        }
    }
}
