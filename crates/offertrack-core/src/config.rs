use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Period of the repeating follow-up check, in minutes.
    #[serde(default = "default_period_minutes")]
    pub period_minutes: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            period_minutes: default_period_minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Maximum rows `ot list` shows without an explicit limit.
    #[serde(default = "default_list_limit")]
    pub default_limit: usize,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_limit: default_list_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Trailing weeks shown in the weekly trend.
    #[serde(default = "default_trend_weeks")]
    pub trend_weeks: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            trend_weeks: default_trend_weeks(),
        }
    }
}

const fn default_period_minutes() -> u64 {
    60
}

const fn default_list_limit() -> usize {
    50
}

const fn default_trend_weeks() -> usize {
    8
}

/// Load `config.toml` from the data root. A missing file yields defaults.
pub fn load_config(root: &Path) -> Result<ProjectConfig> {
    let path = root.join("config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    toml::from_str::<ProjectConfig>(&content).map_err(|source| Error::ConfigParse { path, source })
}

/// Resolve the data root directory.
///
/// Precedence: explicit flag, then `OFFERTRACK_HOME`, then the platform data
/// directory (`~/.local/share/offertrack` on Linux), then `.offertrack` in
/// the current directory as a last resort.
#[must_use]
pub fn resolve_data_root(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Some(path) = env::var_os("OFFERTRACK_HOME") {
        return PathBuf::from(path);
    }
    dirs::data_dir().map_or_else(|| PathBuf::from(".offertrack"), |d| d.join("offertrack"))
}

#[cfg(test)]
mod tests {
    use super::{ProjectConfig, load_config, resolve_data_root};
    use std::path::PathBuf;

    #[test]
    fn defaults_are_sane() {
        let config = ProjectConfig::default();
        assert_eq!(config.notify.period_minutes, 60);
        assert_eq!(config.list.default_limit, 50);
        assert_eq!(config.stats.trend_weeks, 8);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(dir.path()).expect("defaults");
        assert_eq!(config.notify.period_minutes, 60);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.toml"), "[notify]\nperiod_minutes = 15\n")
            .expect("write config");

        let config = load_config(dir.path()).expect("parses");
        assert_eq!(config.notify.period_minutes, 15);
        assert_eq!(config.list.default_limit, 50);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.toml"), "[notify\n").expect("write config");
        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn explicit_flag_wins_root_resolution() {
        let root = resolve_data_root(Some(PathBuf::from("/tmp/custom")));
        assert_eq!(root, PathBuf::from("/tmp/custom"));
    }
}
