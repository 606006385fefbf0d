use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{eyre::WrapErr, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};

/// User-level configuration loaded from `~/.config/tasklist/config.toml` (platform-specific).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Location the list starts at when `--url` is not given.
    pub initial_url: Option<String>,
    /// Install the four demo tasks on startup.
    pub seed_demo: bool,
    /// `chrono` format string for task timestamps.
    pub timestamp_format: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_url: None,
            seed_demo: true,
            timestamp_format: None,
        }
    }
}

/// Load config from the default path; if missing, return defaults.
pub fn load() -> Result<Config> {
    let path = default_path()?;
    load_from_path(path)
}

/// Load config from a given path; if missing or empty, return defaults.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    toml::from_str(&contents).wrap_err_with(|| format!("invalid config at {}", path.display()))
}

/// Resolve the default config path (platform aware).
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| color_eyre::eyre::eyre!("no config dir available"))?;
    Ok(base.join("tasklist").join("config.toml"))
}

/// Write the given config to the default path unless a file is already there.
pub fn write_default_if_missing(config: &Config) -> Result<PathBuf> {
    let path = default_path()?;
    write_to_path_if_missing(config, &path)?;
    Ok(path)
}

fn write_to_path_if_missing(config: &Config, path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_default_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_from_path(dir.path().join("config.toml")).expect("load");
        assert_eq!(cfg, Config::default());
        assert!(cfg.seed_demo);
    }

    #[test]
    fn parses_custom_config() {
        let contents = r#"
            initial_url = "/?search=learn"
            seed_demo = false
            timestamp_format = "%Y-%m-%d %H:%M"
        "#;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write temp config");

        let cfg = load_from_path(&path).expect("load");
        assert_eq!(
            cfg,
            Config {
                initial_url: Some("/?search=learn".into()),
                seed_demo: false,
                timestamp_format: Some("%Y-%m-%d %H:%M".into()),
            }
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "initial_url = \"/todo\"\n").expect("write temp config");

        let cfg = load_from_path(&path).expect("load");
        assert!(cfg.seed_demo);
        assert_eq!(cfg.initial_url.as_deref(), Some("/todo"));
    }

    #[test]
    fn rejects_malformed_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "seed_demo = \"maybe\"\n").expect("write temp config");

        let err = load_from_path(&path).expect_err("should fail");
        assert!(err.to_string().contains("invalid config"));
    }

    #[test]
    fn write_default_creates_file_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            initial_url: Some("/".into()),
            ..Config::default()
        };

        write_to_path_if_missing(&cfg, &path).expect("write should succeed");
        let other = Config {
            seed_demo: false,
            ..Config::default()
        };
        write_to_path_if_missing(&other, &path).expect("second write ok");

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded, cfg);
    }
}
