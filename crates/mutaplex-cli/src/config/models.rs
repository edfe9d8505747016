use mutaplex::core::models::service::{GenerationMode, LibraryType};
use mutaplex::engine::config::TilingMethod;
use mutaplex::engine::plate::PlateFormat;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceSettings {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationSettings {
    pub generation_mode: GenerationMode,
    pub exclude_stops: bool,
    pub include_original: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OligoSettings {
    pub oligo_length: usize,
    pub overlap_length: usize,
    pub gap_length: usize,
    pub na_conc: f64,
    pub k_conc: f64,
    pub oligo_conc: f64,
    pub method: TilingMethod,
    pub clean: bool,
    pub optimize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateSettings {
    pub format: PlateFormat,
    pub destination_format: PlateFormat,
}

/// Settings after merging defaults, the config file and `--set` overrides.
/// Subcommand flags are applied on top by each command.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub custom_mode: GenerationMode,
    pub saturation: SaturationSettings,
    pub library_type: LibraryType,
    pub oligos: OligoSettings,
    pub plate: PlateSettings,
}
