use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileServiceConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileCustomConfig {
    pub generation_mode: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSaturationConfig {
    pub generation_mode: Option<String>,
    pub exclude_stops: Option<bool>,
    pub include_original: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileScanningConfig {
    pub library_type: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOligoConfig {
    pub oligo_length: Option<usize>,
    pub overlap_length: Option<usize>,
    pub gap_length: Option<usize>,
    pub na_conc: Option<f64>,
    pub k_conc: Option<f64>,
    pub oligo_conc: Option<f64>,
    pub method: Option<String>,
    pub clean: Option<bool>,
    pub optimize: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePlateConfig {
    pub format: Option<String>,
    pub destination_format: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub service: Option<FileServiceConfig>,
    pub custom: Option<FileCustomConfig>,
    pub saturation: Option<FileSaturationConfig>,
    pub scanning: Option<FileScanningConfig>,
    pub oligos: Option<FileOligoConfig>,
    pub plate: Option<FilePlateConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
