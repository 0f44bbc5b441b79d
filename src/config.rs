use crate::gametime;
use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_offset")]
    pub clock_offset_minutes: i32,
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
    #[serde(default = "default_true")]
    pub confirm_clear: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clock_offset_minutes: gametime::DEFAULT_OFFSET_MINUTES,
            catalog_dir: None,
            confirm_clear: true,
        }
    }
}

impl AppConfig {
    pub fn load_or_create() -> Result<Self> {
        let base_dir = data_dir()?;
        fs::create_dir_all(&base_dir).context("create app data dir")?;
        let path = base_dir.join("config.json");
        if path.exists() {
            let raw = fs::read_to_string(&path).context("read app config")?;
            let config: AppConfig = serde_json::from_str(&raw).unwrap_or_default();
            return Ok(config);
        }

        let config = AppConfig::default();
        config.save()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let base_dir = data_dir()?;
        fs::create_dir_all(&base_dir).context("create app data dir")?;
        let path = base_dir.join("config.json");
        let raw = serde_json::to_string_pretty(self).context("serialize app config")?;
        fs::write(path, raw).context("write app config")?;
        Ok(())
    }
}

pub fn data_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().context("resolve home dir")?;
    Ok(base.data_local_dir().join("heartsmith"))
}

fn default_offset() -> i32 {
    gametime::DEFAULT_OFFSET_MINUTES
}

fn default_true() -> bool {
    true
}
