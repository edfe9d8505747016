use mutaplex::core::models::service::{GenerationMode, LibraryType};
use mutaplex::engine::config::TilingMethod;
use mutaplex::engine::plate::PlateFormat;

pub struct DefaultsConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub generation_mode: GenerationMode,
    pub exclude_stops: bool,
    pub include_original: bool,
    pub library_type: LibraryType,
    pub oligo_length: usize,
    pub overlap_length: usize,
    pub gap_length: usize,
    pub na_conc: f64,
    pub k_conc: f64,
    pub oligo_conc: f64,
    pub method: TilingMethod,
    pub clean: bool,
    pub optimize: bool,
    pub plate_format: PlateFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001/api".to_string(),
            timeout_secs: 60,
            generation_mode: GenerationMode::Individual,
            exclude_stops: false,
            include_original: false,
            library_type: LibraryType::Nnk,
            oligo_length: 60,
            overlap_length: 30,
            gap_length: 20,
            na_conc: 50.0,
            k_conc: 0.0,
            oligo_conc: 250.0,
            method: TilingMethod::Simple,
            clean: false,
            optimize: false,
            plate_format: PlateFormat::WELLS_96_COLUMN,
        }
    }
}
