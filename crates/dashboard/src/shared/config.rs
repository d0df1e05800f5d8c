use anyhow::Context;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows per page when the page state does not set one
    pub page_size: usize,
    pub percent_decimals: u8,
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            percent_decimals: 1,
            currency: "$".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Shorter queries leave the list unfiltered; 0 lets any non-empty query narrow it
    pub min_query_len: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { min_query_len: 0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is not set
    pub level: String,
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "target/logs".to_string(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[display]
page_size = 10
percent_decimals = 1
currency = "$"

[search]
min_query_len = 0

[logging]
level = "info"
dir = "target/logs"
"#;

/// Where the configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    NextToExecutable(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::NextToExecutable(path) => {
                write!(f, "{}", path.display())
            }
            ConfigSource::Embedded => f.write_str("embedded defaults"),
        }
    }
}

/// Load configuration
///
/// Search order:
/// 1. `explicit` path (an error if it cannot be read)
/// 2. config.toml next to the executable
/// 3. Falls back to embedded default config
///
/// Logging is not initialised yet at this point, so the source is returned
/// for the caller to report.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, ConfigSource)> {
    if let Some(path) = explicit {
        let config = read_config(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");
            if config_path.exists() {
                let config = read_config(&config_path)?;
                return Ok((config, ConfigSource::NextToExecutable(config_path)));
            }
        }
    }

    let config: Config = toml::from_str(DEFAULT_CONFIG).context("embedded default config")?;
    Ok((config, ConfigSource::Embedded))
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("invalid config {}", path.display()))
}
