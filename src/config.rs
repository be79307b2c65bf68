use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "vgsales-dashboard.json";

/// Environment variable overriding [`DashboardConfig::data_path`].
pub const DATA_ENV: &str = "VGSALES_DATA";

// ---------------------------------------------------------------------------
// Startup configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Sales table loaded at startup.
    pub data_path: PathBuf,
    /// Year preselected in the platform-share chart, if the data has it.
    pub initial_year: i64,
    /// Initial window size in points.
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("vgsales.csv"),
            initial_year: 2000,
            window_size: [1200.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Defaults, then [`CONFIG_FILE`] if present, then [`DATA_ENV`].
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(Path::new(CONFIG_FILE))?.unwrap_or_default();
        if let Some(path) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Read a settings file; `Ok(None)` when it does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(Some(config))
    }
}
