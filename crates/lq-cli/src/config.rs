//! `lq.toml` configuration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lq_expr::Domain;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "lq.toml";

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Question file.
    pub store: PathBuf,
    /// Seed for the mascot tip RNG. Random when unset.
    pub seed: Option<u64>,
    /// Seconds between mascot tips.
    pub tip_interval_secs: u64,
    /// Plot sampling domain.
    pub plot: Domain,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: PathBuf::from("questions.json"),
            seed: None,
            tip_interval_secs: 8,
            plot: Domain::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] when it exists, or
    /// fall back to defaults. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let path = match path {
            Some(p) if p.exists() => p.to_path_buf(),
            Some(p) => return Err(format!("config file not found: {}", p.display())),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.exists() {
                    return Ok(Self::default());
                }
                local
            }
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        Self::parse(&text).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Parse TOML text.
    pub fn parse(text: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(text).map_err(|e| e.to_string())?;
        let plot = &config.plot;
        if plot.samples == 0 || !plot.step.is_finite() || plot.step <= 0.0 {
            return Err("plot.samples and plot.step must be positive".into());
        }
        if !plot.start.is_finite() {
            return Err("plot.start must be a finite number".into());
        }
        Ok(config)
    }

    /// Override the question file.
    pub fn with_store(mut self, store: Option<PathBuf>) -> Self {
        if let Some(store) = store {
            self.store = store;
        }
        self
    }

    /// Override the tip seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Delay between mascot tips (at least one second).
    pub fn tip_interval(&self) -> Duration {
        Duration::from_secs(self.tip_interval_secs.max(1))
    }

    /// Where the TUI writes its log: the question file with `.log` appended.
    pub fn log_path(&self) -> PathBuf {
        let mut name = OsString::from(self.store.as_os_str());
        name.push(".log");
        PathBuf::from(name)
    }
}
