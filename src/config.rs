use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::embedding::Format;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EvalConfig {
    pub logging: LoggingConfig,
    pub embedding: EmbeddingConfig,
    pub tasks: TasksConfig,
    /// File the values were read from; `None` when defaults were used.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Format used when neither a flag nor the file extension decides.
    pub default_format: Format,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TasksConfig {
    /// Extra directories searched for plugin manifests.
    pub plugin_dirs: Vec<String>,
    /// Per-task timeout in seconds; 0 disables it.
    pub timeout_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            default_format: Format::Text,
        }
    }
}

/// Returns `~/.embedeval/`
pub fn default_embedeval_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".embedeval")
}

/// Returns the default config file path: `~/.embedeval/config.toml`
pub fn default_config_path() -> PathBuf {
    default_embedeval_dir().join("config.toml")
}

impl EvalConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            let mut config: EvalConfig =
                toml::from_str(&contents).context("failed to parse config TOML")?;
            config.source = Some(path.to_path_buf());
            config
        } else {
            EvalConfig::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (EMBEDEVAL_LOG_LEVEL, EMBEDEVAL_TASK_PATH, EMBEDEVAL_TASK_TIMEOUT).
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("EMBEDEVAL_LOG_LEVEL") {
            self.logging.log_level = val;
        }
        if let Some(val) = std::env::var_os("EMBEDEVAL_TASK_PATH") {
            self.tasks.plugin_dirs.extend(
                std::env::split_paths(&val)
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| p.to_string_lossy().into_owned()),
            );
        }
        if let Ok(val) = std::env::var("EMBEDEVAL_TASK_TIMEOUT") {
            self.tasks.timeout_secs = val
                .parse()
                .with_context(|| format!("EMBEDEVAL_TASK_TIMEOUT must be whole seconds, got '{val}'"))?;
        }
        Ok(())
    }

    /// Plugin directories with `~` expanded.
    pub fn resolved_plugin_dirs(&self) -> Vec<PathBuf> {
        self.tasks.plugin_dirs.iter().map(|d| expand_tilde(d)).collect()
    }

    /// The configured per-task timeout, if any.
    pub fn task_timeout(&self) -> Option<Duration> {
        (self.tasks.timeout_secs > 0).then(|| Duration::from_secs(self.tasks.timeout_secs))
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
