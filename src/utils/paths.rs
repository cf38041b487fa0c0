//! File-name resolution for the shell. The core only ever sees the result.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub const DEFAULT_DATA_FILE: &str = "expenses.csv";
pub const DEFAULT_REPORT_FILE: &str = "expense_summary.csv";
const CSV_EXTENSION: &str = ".csv";

/// Keeps only the final component of `requested`, defaults it when empty,
/// forces a `.csv` suffix, and places it inside `dir`.
pub fn safe_file_path(dir: &Path, requested: &str) -> PathBuf {
    let base = Path::new(requested.trim())
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    let mut name = if base.is_empty() {
        DEFAULT_DATA_FILE.to_string()
    } else {
        base.to_string()
    };
    if !name.to_ascii_lowercase().ends_with(CSV_EXTENSION) {
        name.push_str(CSV_EXTENSION);
    }
    dir.join(name)
}

/// Names of the `.csv` files directly inside `dir`, sorted.
pub fn list_csv_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.to_ascii_lowercase().ends_with(CSV_EXTENSION) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
