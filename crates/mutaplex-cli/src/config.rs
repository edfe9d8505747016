mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::{AppConfig, OligoSettings, ServiceSettings};

use directories::ProjectDirs;
use std::path::PathBuf;

/// `<platform config dir>/mutaplex/config.toml`, whether or not it exists.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "mutaplex", "mutaplex").map(|dirs| dirs.config_dir().join("config.toml"))
}
