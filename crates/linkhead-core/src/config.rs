use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::RuleSnapshot;

/// Global configuration loaded from `~/.config/linkhead/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkheadConfig {
    /// Public home URL of the site; fallback canonicals are built under it.
    #[serde(default = "default_home_url")]
    pub home_url: String,
    /// Optional rule snapshot location; defaults to `~/.local/share/linkhead/rules.json`.
    #[serde(default)]
    pub rules_path: Option<PathBuf>,
    /// Whether search/author/date/404 canonical overrides are honored.
    #[serde(default = "default_dynamic_overrides")]
    pub dynamic_overrides: bool,
}

fn default_home_url() -> String {
    "http://localhost".to_string()
}

fn default_dynamic_overrides() -> bool {
    true
}

impl Default for LinkheadConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            rules_path: None,
            dynamic_overrides: default_dynamic_overrides(),
        }
    }
}

impl LinkheadConfig {
    /// Rule snapshot path: configured override, else the XDG default.
    pub fn rules_path(&self) -> Result<PathBuf> {
        match &self.rules_path {
            Some(path) => Ok(path.clone()),
            None => RuleSnapshot::default_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("linkhead")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LinkheadConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<LinkheadConfig> {
    if !path.exists() {
        let default_cfg = LinkheadConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: LinkheadConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
