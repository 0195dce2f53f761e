use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use physio_bodymap::store::DEFAULT_HISTORY_LIMIT;
use physio_core::models::geometry::CanvasSize;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

/// Submit timeout given to configs written before the field existed.
pub const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysioConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Root of the JSON record store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub canvas: CanvasSize,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_intensity")]
    pub default_intensity: u8,
    /// `None` (an explicit `null`) waits on the record store indefinitely.
    /// Added in v1.
    #[serde(default = "default_submit_timeout")]
    pub submit_timeout_secs: Option<u64>,
}

impl PhysioConfig {
    pub fn submit_timeout(&self) -> Option<Duration> {
        self.submit_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for PhysioConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: default_data_dir(),
            canvas: CanvasSize::default(),
            history_limit: default_history_limit(),
            default_intensity: default_intensity(),
            submit_timeout_secs: default_submit_timeout(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("physio")
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_intensity() -> u8 {
    7
}

fn default_submit_timeout() -> Option<u64> {
    Some(DEFAULT_SUBMIT_TIMEOUT_SECS)
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("physio"))
}

/// `override_path` if given, else the per-user config file.
pub fn config_path(override_path: Option<&Path>) -> eyre::Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_dir()?.join("config.json")),
    }
}

/// Load the config at `path`, or the defaults if there is no file yet.
pub fn load_config(path: &Path) -> eyre::Result<PhysioConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(PhysioConfig::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: PhysioConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update physio."
        ));
    }

    // v0 → v1: add submit_timeout_secs
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("submit_timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_SUBMIT_TIMEOUT_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added submit_timeout_secs)");
    }

    Ok(json)
}

pub fn save_config(config: &PhysioConfig, path: &Path) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
