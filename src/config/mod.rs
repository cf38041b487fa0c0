use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::ledger::{ledger::DEFAULT_CATEGORY, LedgerOptions};
use crate::utils::paths::{safe_file_path, DEFAULT_DATA_FILE, DEFAULT_REPORT_FILE};

const DEFAULT_DIR_NAME: &str = ".expense_ledger";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "EXPENSE_LEDGER_HOME";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration format error: {0}")]
    Format(#[from] serde_json::Error),
    #[error("Unknown configuration key `{0}` (expected one of: {keys})", keys = Config::KEYS.join(", "))]
    UnknownKey(String),
    #[error("Configuration key `{0}` needs a non-empty value")]
    EmptyValue(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding expense files. Defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub data_file: String,
    pub report_file: String,
    pub default_category: String,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            data_file: DEFAULT_DATA_FILE.into(),
            report_file: DEFAULT_REPORT_FILE.into(),
            default_category: DEFAULT_CATEGORY.into(),
            currency_symbol: "$".into(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 5] = [
        "data_dir",
        "data_file",
        "report_file",
        "default_category",
        "currency_symbol",
    ];

    /// Current values in [`Config::KEYS`] order, rendered for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("data_dir", self.data_dir().display().to_string()),
            ("data_file", self.data_file.clone()),
            ("report_file", self.report_file.clone()),
            ("default_category", self.default_category.clone()),
            ("currency_symbol", self.currency_symbol.clone()),
        ]
    }

    /// Updates one preference. A blank `data_dir` resets it to the working directory.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let required = |key: &'static str| {
            if value.is_empty() {
                Err(ConfigError::EmptyValue(key))
            } else {
                Ok(value.to_string())
            }
        };
        match key {
            "data_dir" => {
                self.data_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "data_file" => self.data_file = required("data_file")?,
            "report_file" => self.report_file = required("report_file")?,
            "default_category" => self.default_category = required("default_category")?,
            "currency_symbol" => self.currency_symbol = required("currency_symbol")?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn data_path(&self) -> PathBuf {
        safe_file_path(&self.data_dir(), &self.data_file)
    }

    pub fn report_path(&self) -> PathBuf {
        safe_file_path(&self.data_dir(), &self.report_file)
    }

    pub fn ledger_options(&self) -> LedgerOptions {
        LedgerOptions {
            default_category: self.default_category.clone(),
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `$EXPENSE_LEDGER_HOME`, falling back to `~/.expense_ledger`.
    pub fn new() -> Self {
        Self::with_base_dir(base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        assert_eq!(manager.load().unwrap(), Config::default());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().join("nested"));
        let config = Config {
            data_dir: Some(temp.path().to_path_buf()),
            default_category: "Misc".into(),
            currency_symbol: "€".into(),
            ..Config::default()
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        fs::write(manager.path(), r#"{ "data_file": "household" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.data_file, "household");
        assert_eq!(config.report_file, DEFAULT_REPORT_FILE);
        assert_eq!(
            config.data_path(),
            config.data_dir().join("household.csv")
        );
    }

    #[test]
    fn set_value_updates_known_keys_only() {
        let mut config = Config::default();
        config.set_value("default_category", " Misc ").unwrap();
        config.set_value("data_dir", "/srv/ledger").unwrap();
        assert_eq!(config.default_category, "Misc");
        assert_eq!(config.data_dir(), PathBuf::from("/srv/ledger"));

        config.set_value("data_dir", "").unwrap();
        assert_eq!(config.data_dir, None);
        assert!(matches!(
            config.set_value("currency_symbol", "  "),
            Err(ConfigError::EmptyValue("currency_symbol"))
        ));
        assert!(matches!(
            config.set_value("theme", "dark"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn amounts_use_currency_symbol() {
        let config = Config::default();
        assert_eq!(config.format_amount(45.5), "$45.50");
    }
}
