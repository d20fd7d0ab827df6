use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use swipedeck_engine::GestureTuning;

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. SWIPEDECK_CONFIG environment variable (with tilde expansion)
/// 3. Platform config directory (`<config_dir>/swipedeck/config.toml`)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("SWIPEDECK_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("swipedeck").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no platform config directory found".to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Which flush scheduler the vote queue uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerKind {
    /// Wait for the stack to go idle, bounded by `idle_timeout_ms`
    #[default]
    Idle,
    /// Run on the next runtime tick
    Timer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// `limit` passed to every page fetch
    pub page_size: usize,
    /// Active index that triggers a page load; also the compaction amount
    pub pagination_threshold: usize,
    /// Exit animation duration before the old active card is retired
    pub settle_delay_ms: u64,
    /// Delay before retrying a flush pass that stopped on a failure
    pub flush_backoff_ms: u64,
    pub favorites_debounce_ms: u64,
    /// Longest the idle scheduler waits for an idle period
    pub idle_timeout_ms: u64,
    pub scheduler: SchedulerKind,
    pub gesture: GestureTuning,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            pagination_threshold: 10,
            settle_delay_ms: 500,
            flush_backoff_ms: 3000,
            favorites_debounce_ms: 400,
            idle_timeout_ms: 200,
            scheduler: SchedulerKind::Idle,
            gesture: GestureTuning::default(),
        }
    }
}

impl DeckConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: DeckConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be positive".to_string()));
        }
        if self.pagination_threshold == 0 {
            return Err(Error::Config(
                "pagination_threshold must be positive".to_string(),
            ));
        }

        let gesture = &self.gesture;
        for (name, value) in [
            ("gesture.commit_fraction", gesture.commit_fraction),
            ("gesture.fade_start_fraction", gesture.fade_start_fraction),
        ] {
            if value.is_nan() || value <= 0.0 || value > 1.0 {
                return Err(Error::Config(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("gesture.trigger_divisor", gesture.trigger_divisor),
            ("gesture.lift_divisor", gesture.lift_divisor),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn flush_backoff(&self) -> Duration {
        Duration::from_millis(self.flush_backoff_ms)
    }

    pub fn favorites_debounce(&self) -> Duration {
        Duration::from_millis(self.favorites_debounce_ms)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }
}
