use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quaddrop_distributor::msg::DistributionConfigMsg;
use serde::Deserialize;

/// On-disk configuration. Every field may be overridden from the command line.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub total_pool: Option<String>,
    pub basis_mode: Option<String>,
}

impl ConfigFile {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Layer flags over the optional config file. Flags win.
pub fn resolve_config(
    file: Option<&Path>,
    total_pool: Option<String>,
    basis_mode: Option<String>,
) -> Result<DistributionConfigMsg> {
    let base = match file {
        Some(path) => ConfigFile::from_json_file(path)?,
        None => ConfigFile::default(),
    };

    let total_pool = total_pool
        .or(base.total_pool)
        .context("no total pool given: pass --total-pool or set totalPool in the config file")?;
    let basis_mode = basis_mode
        .or(base.basis_mode)
        .unwrap_or_else(|| "free".to_string());

    Ok(DistributionConfigMsg {
        total_pool,
        basis_mode,
    })
}
