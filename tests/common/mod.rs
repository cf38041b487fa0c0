#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;

pub const HEADER: &str = "Date,Category,Amount,Description";

/// Writes an expense file with the standard header followed by `rows`.
pub fn write_expenses(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut contents = String::from(HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    fs::write(&path, contents).expect("write expense file");
    path
}

/// Points the CLI at `home` for configuration and `data_dir` for expense files.
pub fn write_config(home: &Path, data_dir: &Path) {
    let config = format!(
        r#"{{ "data_dir": {} }}"#,
        serde_json::to_string(&data_dir.display().to_string()).expect("encode path")
    );
    fs::write(home.join("config.json"), config).expect("write config");
}

/// CLI command isolated from the user's real configuration and colours.
pub fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expense_ledger_cli").expect("binary exists");
    cmd.env("EXPENSE_LEDGER_HOME", home)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "expense_ledger=info");
    cmd
}
