use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default collection endpoint of the heroes API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/heros";

/// Global configuration loaded from `~/.config/heroes/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroesConfig {
    /// Collection endpoint; single records live at `<base_url>/<id>`.
    pub base_url: String,
    /// Quiet window in milliseconds before a typed query is searched.
    pub debounce_ms: u64,
    /// Optional whole-request timeout in seconds (None = no explicit timeout).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for HeroesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: 300,
            timeout_secs: None,
        }
    }
}

impl HeroesConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("heroes")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HeroesConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HeroesConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<HeroesConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: HeroesConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
