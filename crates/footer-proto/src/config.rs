use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub panel: PanelConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Fold state the footer mounts with.
    #[serde(default = "default_start_folded")]
    pub start_folded: bool,
    /// Terminal width from which the wide button group replaces the menu.
    #[serde(default = "default_wide_min_width")]
    pub wide_min_width: u16,
}

/// Where the stream/player catalog is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML catalog, or an m3u playlist of live streams.
    /// Defaults to `$XDG_CONFIG_HOME/media-footer/streams.toml`.
    #[serde(default = "default_streams_toml")]
    pub streams_toml: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            start_folded: default_start_folded(),
            wide_min_width: default_wide_min_width(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            streams_toml: default_streams_toml(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_start_folded() -> bool {
    true
}

fn default_wide_min_width() -> u16 {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_streams_toml() -> PathBuf {
    platform::config_dir().join("streams.toml")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.panel.start_folded);
        assert_eq!(config.panel.wide_min_width, 100);
        assert_eq!(config.logging.filter, "info");
        assert!(config
            .catalog
            .streams_toml
            .ends_with("media-footer/streams.toml"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml_str("[panel]\nstart_folded = false\n").unwrap();
        assert!(!config.panel.start_folded);
        assert_eq!(config.panel.wide_min_width, 100);
        assert_eq!(config.logging.filter, "info");
    }
}
