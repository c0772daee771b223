use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_CHECK_INTERVAL: u64 = 300;
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Monitor configuration.
///
/// Example YAML:
/// ```yaml
/// latitude: 52.52
/// longitude: 13.41
/// check_interval: 300
/// alert_once: true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub latitude: f64,
    pub longitude: f64,

    /// Seconds between polls.
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,

    /// Notify only once per dry spell; rain re-arms it.
    #[serde(default = "default_alert_once")]
    pub alert_once: bool,
}

fn default_check_interval() -> u64 {
    DEFAULT_CHECK_INTERVAL
}

fn default_alert_once() -> bool {
    true
}

/// On-disk encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

impl Config {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            check_interval: DEFAULT_CHECK_INTERVAL,
            alert_once: true,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.check_interval)
    }

    /// Load config from `path`. A missing file is an error, not an empty default.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Missing config file: {}", path.display());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&contents, ConfigFormat::from_path(path))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Self> {
        let cfg: Config = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
            ConfigFormat::Toml => toml::from_str(contents)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.check_interval == 0 {
            bail!("check_interval must be a positive number of seconds");
        }
        Ok(())
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = match ConfigFormat::from_path(path) {
            ConfigFormat::Yaml => {
                serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")?
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?
            }
        };

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the per-user config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "drycheck", "drycheck")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Pick the config file: explicit path, then `./config.yaml`, then the per-user file.
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Ok(local);
        }

        Self::config_file_path()
    }
}
