//! Configuration sections and their RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Platform config directory for terra, e.g. `~/.config/terra` on Linux.
///
/// Falls back to the working directory when the platform has none.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("terra"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub features: FeatureConfig,
    pub palette: PaletteConfig,
    pub debug: DebugConfig,
}

/// World layout and the projection from line space to lon/lat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk side length in voxels.
    pub chunk_size: u32,
    /// Longitude at line-space `x = 0`.
    pub origin_lon: f64,
    /// Latitude at line-space `z = 0`.
    pub origin_lat: f64,
    /// Line-space units (one voxel each) per degree of arc.
    pub meters_per_degree: f64,
}

/// Widths used when painting features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureConfig {
    /// Half-width of every river, in voxels.
    pub river_half_width: f64,
    /// Distance from a river's centerline that is water rather than bank.
    pub channel_half_width: f64,
    /// Half-width added per road lane.
    pub lane_half_width: f64,
}

/// Voxel type names for each painted material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub empty: String,
    pub water_source: String,
    pub beach: String,
    pub asphalt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level filter (e.g. "debug", "info", "terra_roads=trace").
    pub log_level: String,
    /// Directory for the JSON log file in debug builds.
    pub log_dir: Option<PathBuf>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_size: 16,
            origin_lon: 0.0,
            origin_lat: 0.0,
            meters_per_degree: 111_320.0,
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            river_half_width: 5.0,
            channel_half_width: 2.0,
            lane_half_width: 1.5,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            empty: "air".to_string(),
            water_source: "water".to_string(),
            beach: "dirt".to_string(),
            asphalt: "gray_concrete".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Loads `config.ron` from `config_dir`, writing a default one if missing.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Writes this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-reads the file; `Some` only if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}
