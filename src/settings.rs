use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{EasyPayError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Optional JSON catalog replacing the built-in products/firms/tiers.
    #[serde(default)]
    pub catalog_file: Option<String>,
    #[serde(default = "default_order_delay_ms")]
    pub order_delay_ms: u64,
    /// Block wizard steps on validation errors instead of only showing them.
    #[serde(default)]
    pub enforce_validation: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

fn default_order_delay_ms() -> u64 {
    1500
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_file: None,
            order_delay_ms: default_order_delay_ms(),
            enforce_validation: false,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn order_delay(&self) -> Duration {
        Duration::from_millis(self.order_delay_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        match &self.log_file {
            Some(p) => PathBuf::from(shellexpand_path(p)),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("easypay")
                .join("easypay.log"),
        }
    }

    /// The configured catalog, or the built-in one when no file is set.
    /// `override_path` (from the command line) wins over the settings file.
    pub fn catalog(&self, override_path: Option<&str>) -> Result<Catalog> {
        match override_path.or(self.catalog_file.as_deref()) {
            Some(p) => Catalog::load(&PathBuf::from(shellexpand_path(p))),
            None => Ok(Catalog::default()),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("easypay")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| EasyPayError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
