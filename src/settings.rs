use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GstError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// chrono format of `Document Date (2B)` cells.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Used for rows whose `Company Name` cell is blank.
    #[serde(default)]
    pub default_company: String,
}

fn default_date_format() -> String {
    "%d-%m-%Y".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            currency_symbol: default_currency_symbol(),
            default_company: String::new(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("gstrecon")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring unreadable {}: {e}", path.display());
            Settings::default()
        })
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| GstError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            date_format: "%Y-%m-%d".to_string(),
            currency_symbol: "Rs ".to_string(),
            default_company: "TestCorp".to_string(),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: Settings = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert_eq!(loaded.currency_symbol, "Rs ");
        assert_eq!(loaded.default_company, "TestCorp");
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.date_format, "%d-%m-%Y");
        assert_eq!(s.currency_symbol, "₹");
        assert!(s.default_company.is_empty());
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let json = r#"{"default_company": "Acme"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.date_format, "%d-%m-%Y");
        assert_eq!(s.default_company, "Acme");
    }
}
