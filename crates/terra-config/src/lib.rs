//! Settings for the terra tools, persisted as `config.ron`.
//!
//! Every section carries `#[serde(default)]`, so older or partial files keep
//! loading as fields are added. Command-line flags override the loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, FeatureConfig, PaletteConfig, WorldConfig, default_config_dir};
pub use error::ConfigError;
