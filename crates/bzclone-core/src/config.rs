use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Desktop Safari UA; the tracker serves the full login form to browsers only.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_3) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/13.0.5 Safari/605.1.15";

/// Global configuration loaded from `~/.config/bzclone/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClonerConfig {
    /// Tracker root, with trailing slash (e.g. "https://bugzilla.redhat.com/").
    pub base_url: String,
    /// Product passed to `enter_bug.cgi` when requesting the clone form.
    pub product: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Accept-Language sent with every request.
    pub accept_language: String,
    /// When true, a missing login token or cloned-bug link is an error.
    /// When false, the run continues and only logs a warning.
    pub strict: bool,
    /// Optional connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Optional whole-request timeout in seconds (None = no limit).
    pub timeout_secs: Option<u64>,
}

impl Default for ClonerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://bugzilla.redhat.com/".to_string(),
            product: "OpenShift Container Platform".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: "en-us".to_string(),
            strict: true,
            connect_timeout_secs: None,
            timeout_secs: None,
        }
    }
}

impl ClonerConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bzclone")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ClonerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ClonerConfig::default();
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

/// Load configuration from an explicit file. The file must exist.
pub fn load_from_path(path: &Path) -> Result<ClonerConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: ClonerConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
