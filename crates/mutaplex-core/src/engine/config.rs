use crate::core::models::service::{GenerationMode, LibraryType};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

pub const OLIGO_LENGTH_RANGE: RangeInclusive<usize> = 20..=200;
pub const OVERLAP_LENGTH_RANGE: RangeInclusive<usize> = 15..=80;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{parameter}' = {value} is outside {min}..={max}")]
    OutOfRange {
        parameter: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("Parameter '{parameter}' does not accept '{value}'")]
    Unsupported {
        parameter: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomRequestConfig {
    pub generation_mode: GenerationMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaturationConfig {
    pub generation_mode: GenerationMode,
    pub exclude_stops: bool,
    pub include_original: bool,
}

/// Which codons a scanning library covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanWindow {
    Full,
    /// 1-based, inclusive nucleotide range.
    Range { start: usize, end: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanningConfig {
    pub window: ScanWindow,
    pub library_type: LibraryType,
}

/// Tiling strategy requested from the design service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TilingMethod {
    Simple,
    Gapped,
}

impl FromStr for TilingMethod {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(TilingMethod::Simple),
            "gapped" => Ok(TilingMethod::Gapped),
            _ => Err(ConfigError::Unsupported {
                parameter: "method",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TilingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TilingMethod::Simple => write!(f, "simple"),
            TilingMethod::Gapped => write!(f, "gapped"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OligoDesignConfig {
    pub oligo_length: usize,
    pub overlap_length: usize,
    pub gap_length: usize,
    pub na_conc: f64,    // mM
    pub k_conc: f64,     // mM
    pub oligo_conc: f64, // nM
    pub method: TilingMethod,
    pub clean: bool,
    pub optimize: bool,
}

#[derive(Default)]
pub struct CustomRequestConfigBuilder {
    generation_mode: Option<GenerationMode>,
}

impl CustomRequestConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation_mode(mut self, mode: GenerationMode) -> Self {
        self.generation_mode = Some(mode);
        self
    }

    pub fn build(self) -> Result<CustomRequestConfig, ConfigError> {
        let generation_mode = self
            .generation_mode
            .ok_or(ConfigError::MissingParameter("generation_mode"))?;
        if generation_mode == GenerationMode::GroupDegenerate {
            return Err(ConfigError::Unsupported {
                parameter: "generation_mode",
                value: generation_mode.to_string(),
            });
        }
        Ok(CustomRequestConfig { generation_mode })
    }
}

#[derive(Default)]
pub struct SaturationConfigBuilder {
    generation_mode: Option<GenerationMode>,
    exclude_stops: Option<bool>,
    include_original: Option<bool>,
}

impl SaturationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation_mode(mut self, mode: GenerationMode) -> Self {
        self.generation_mode = Some(mode);
        self
    }
    pub fn exclude_stops(mut self, exclude: bool) -> Self {
        self.exclude_stops = Some(exclude);
        self
    }
    pub fn include_original(mut self, include: bool) -> Self {
        self.include_original = Some(include);
        self
    }

    pub fn build(self) -> Result<SaturationConfig, ConfigError> {
        Ok(SaturationConfig {
            generation_mode: self
                .generation_mode
                .ok_or(ConfigError::MissingParameter("generation_mode"))?,
            exclude_stops: self.exclude_stops.unwrap_or(false),
            include_original: self.include_original.unwrap_or(false),
        })
    }
}

#[derive(Default)]
pub struct ScanningConfigBuilder {
    window: Option<ScanWindow>,
    library_type: Option<LibraryType>,
}

impl ScanningConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_sequence(mut self) -> Self {
        self.window = Some(ScanWindow::Full);
        self
    }
    pub fn window(mut self, start: usize, end: usize) -> Self {
        self.window = Some(ScanWindow::Range { start, end });
        self
    }
    pub fn library_type(mut self, library_type: LibraryType) -> Self {
        self.library_type = Some(library_type);
        self
    }

    /// Only checks what is knowable without the sequence: `start >= 1` and
    /// `start <= end`. The upper bound is checked against the sequence later.
    pub fn build(self) -> Result<ScanningConfig, ConfigError> {
        let window = self.window.ok_or(ConfigError::MissingParameter("window"))?;
        if let ScanWindow::Range { start, end } = window {
            if start == 0 {
                return Err(ConfigError::OutOfRange {
                    parameter: "start_position",
                    value: start,
                    min: 1,
                    max: end.max(1),
                });
            }
            if end < start {
                return Err(ConfigError::OutOfRange {
                    parameter: "end_position",
                    value: end,
                    min: start,
                    max: usize::MAX,
                });
            }
        }
        Ok(ScanningConfig {
            window,
            library_type: self
                .library_type
                .ok_or(ConfigError::MissingParameter("library_type"))?,
        })
    }
}

pub struct OligoDesignConfigBuilder {
    oligo_length: Option<usize>,
    overlap_length: Option<usize>,
    gap_length: usize,
    na_conc: f64,
    k_conc: f64,
    oligo_conc: f64,
    method: Option<TilingMethod>,
    clean: bool,
    optimize: bool,
}

impl Default for OligoDesignConfigBuilder {
    fn default() -> Self {
        Self {
            oligo_length: None,
            overlap_length: None,
            gap_length: 20,
            na_conc: 50.0,
            k_conc: 0.0,
            oligo_conc: 250.0,
            method: None,
            clean: false,
            optimize: false,
        }
    }
}

impl OligoDesignConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn oligo_length(mut self, length: usize) -> Self {
        self.oligo_length = Some(length);
        self
    }
    pub fn overlap_length(mut self, length: usize) -> Self {
        self.overlap_length = Some(length);
        self
    }
    pub fn gap_length(mut self, length: usize) -> Self {
        self.gap_length = length;
        self
    }
    pub fn na_conc(mut self, mm: f64) -> Self {
        self.na_conc = mm;
        self
    }
    pub fn k_conc(mut self, mm: f64) -> Self {
        self.k_conc = mm;
        self
    }
    pub fn oligo_conc(mut self, nm: f64) -> Self {
        self.oligo_conc = nm;
        self
    }
    pub fn method(mut self, method: TilingMethod) -> Self {
        self.method = Some(method);
        self
    }
    pub fn clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }
    pub fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    pub fn build(self) -> Result<OligoDesignConfig, ConfigError> {
        let oligo_length = self
            .oligo_length
            .ok_or(ConfigError::MissingParameter("oligo_length"))?;
        let overlap_length = self
            .overlap_length
            .ok_or(ConfigError::MissingParameter("overlap_length"))?;
        check_range("oligo_length", oligo_length, &OLIGO_LENGTH_RANGE)?;
        check_range("overlap_length", overlap_length, &OVERLAP_LENGTH_RANGE)?;
        if overlap_length >= oligo_length {
            return Err(ConfigError::OutOfRange {
                parameter: "overlap_length",
                value: overlap_length,
                min: *OVERLAP_LENGTH_RANGE.start(),
                max: oligo_length - 1,
            });
        }

        Ok(OligoDesignConfig {
            oligo_length,
            overlap_length,
            gap_length: self.gap_length,
            na_conc: self.na_conc,
            k_conc: self.k_conc,
            oligo_conc: self.oligo_conc,
            method: self.method.ok_or(ConfigError::MissingParameter("method"))?,
            clean: self.clean,
            optimize: self.optimize,
        })
    }
}

fn check_range(
    parameter: &'static str,
    value: usize,
    range: &RangeInclusive<usize>,
) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            parameter,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_builder_requires_mode_and_rejects_degenerate_grouping() {
        assert_eq!(
            CustomRequestConfigBuilder::new().build(),
            Err(ConfigError::MissingParameter("generation_mode"))
        );
        assert!(matches!(
            CustomRequestConfigBuilder::new()
                .generation_mode(GenerationMode::GroupDegenerate)
                .build(),
            Err(ConfigError::Unsupported { .. })
        ));
        let config = CustomRequestConfigBuilder::new()
            .generation_mode(GenerationMode::Group)
            .build()
            .unwrap();
        assert_eq!(config.generation_mode, GenerationMode::Group);
    }

    #[test]
    fn saturation_builder_defaults_flags_to_false() {
        let config = SaturationConfigBuilder::new()
            .generation_mode(GenerationMode::GroupDegenerate)
            .build()
            .unwrap();
        assert!(!config.exclude_stops);
        assert!(!config.include_original);
    }

    #[test]
    fn scanning_builder_validates_window_shape() {
        assert_eq!(
            ScanningConfigBuilder::new()
                .library_type(LibraryType::Nnk)
                .build(),
            Err(ConfigError::MissingParameter("window"))
        );
        assert!(matches!(
            ScanningConfigBuilder::new()
                .window(0, 9)
                .library_type(LibraryType::Nnk)
                .build(),
            Err(ConfigError::OutOfRange {
                parameter: "start_position",
                ..
            })
        ));
        assert!(matches!(
            ScanningConfigBuilder::new()
                .window(10, 4)
                .library_type(LibraryType::Nnk)
                .build(),
            Err(ConfigError::OutOfRange {
                parameter: "end_position",
                ..
            })
        ));
        let config = ScanningConfigBuilder::new()
            .window(4, 12)
            .library_type(LibraryType::Nnn)
            .build()
            .unwrap();
        assert_eq!(config.window, ScanWindow::Range { start: 4, end: 12 });
    }

    #[test]
    fn oligo_builder_applies_service_defaults() {
        let config = OligoDesignConfigBuilder::new()
            .oligo_length(60)
            .overlap_length(30)
            .method(TilingMethod::Simple)
            .build()
            .unwrap();
        assert_eq!(config.gap_length, 20);
        assert_eq!(config.na_conc, 50.0);
        assert_eq!(config.oligo_conc, 250.0);
        assert!(!config.clean);
    }

    #[test]
    fn oligo_builder_enforces_length_bounds() {
        let base = || {
            OligoDesignConfigBuilder::new()
                .method(TilingMethod::Gapped)
                .overlap_length(20)
        };
        assert!(matches!(
            base().oligo_length(10).build(),
            Err(ConfigError::OutOfRange {
                parameter: "oligo_length",
                ..
            })
        ));
        assert!(matches!(
            base().oligo_length(60).overlap_length(90).build(),
            Err(ConfigError::OutOfRange {
                parameter: "overlap_length",
                ..
            })
        ));
        assert!(matches!(
            base().oligo_length(25).overlap_length(25).build(),
            Err(ConfigError::OutOfRange {
                parameter: "overlap_length",
                max: 24,
                ..
            })
        ));
    }

    #[test]
    fn tiling_method_parses_names() {
        assert_eq!("Gapped".parse::<TilingMethod>(), Ok(TilingMethod::Gapped));
        assert!("tiled".parse::<TilingMethod>().is_err());
    }
}
