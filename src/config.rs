use anyhow::Result;
use serde::Deserialize;

use crate::progress::PhaseThresholds;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: PhaseThresholds,
    pub capture: CaptureConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Elapsed-time tick interval while recording, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Spool directory for locally stored media payloads.
    pub media_dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            media_dir: "recordings".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
