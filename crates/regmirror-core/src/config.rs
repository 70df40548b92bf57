use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::registry_config::DEFAULT_HOSTS_FILE_NAME;

fn default_output_dir() -> PathBuf {
    PathBuf::from("/etc/containerd/certs.d")
}

fn default_hosts_file_name() -> String {
    DEFAULT_HOSTS_FILE_NAME.to_string()
}

/// Global configuration loaded from `~/.config/regmirror/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegmirrorConfig {
    /// Root of containerd's per-registry config directories.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File written inside each per-source directory.
    #[serde(default = "default_hosts_file_name")]
    pub hosts_file_name: String,
}

impl Default for RegmirrorConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            hosts_file_name: default_hosts_file_name(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("regmirror")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RegmirrorConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit config file path.
pub fn load_or_init_at(path: &Path) -> Result<RegmirrorConfig> {
    if !path.exists() {
        let default_cfg = RegmirrorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("writing default config {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: RegmirrorConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
