use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, OligoSettings, PlateSettings, SaturationSettings, ServiceSettings};
use crate::error::{CliError, Result};
use crate::utils::parser;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Merges built-in defaults, the config file and `--set` overrides.
///
/// An explicit `config_path` must exist. Without one, `fallback_path` is used
/// only when the file is present.
pub fn build_config(
    config_path: Option<&Path>,
    fallback_path: Option<PathBuf>,
    set_values: &[String],
) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = match (config_path, fallback_path) {
        (Some(path), _) => FileConfig::from_file(path)?,
        (None, Some(path)) if path.is_file() => FileConfig::from_file(&path)?,
        _ => {
            debug!("No configuration file found, using built-in defaults.");
            FileConfig::default()
        }
    };

    let mut file_config = apply_set_values(file_config, set_values)?;

    let service_file = file_config.service.take().unwrap_or_default();
    let service = ServiceSettings {
        base_url: service_file
            .base_url
            .unwrap_or(defaults.base_url)
            .trim_end_matches('/')
            .to_string(),
        timeout: Duration::from_secs(service_file.timeout_secs.unwrap_or(defaults.timeout_secs)),
    };

    let custom_file = file_config.custom.take().unwrap_or_default();
    let custom_mode = parse_or(
        "custom.generation-mode",
        custom_file.generation_mode.as_deref(),
        defaults.generation_mode,
    )?;

    let saturation_file = file_config.saturation.take().unwrap_or_default();
    let saturation = SaturationSettings {
        generation_mode: parse_or(
            "saturation.generation-mode",
            saturation_file.generation_mode.as_deref(),
            defaults.generation_mode,
        )?,
        exclude_stops: saturation_file.exclude_stops.unwrap_or(defaults.exclude_stops),
        include_original: saturation_file
            .include_original
            .unwrap_or(defaults.include_original),
    };

    let scanning_file = file_config.scanning.take().unwrap_or_default();
    let library_type = parse_or(
        "scanning.library-type",
        scanning_file.library_type.as_deref(),
        defaults.library_type,
    )?;

    let oligo_file = file_config.oligos.take().unwrap_or_default();
    let oligos = OligoSettings {
        oligo_length: oligo_file.oligo_length.unwrap_or(defaults.oligo_length),
        overlap_length: oligo_file.overlap_length.unwrap_or(defaults.overlap_length),
        gap_length: oligo_file.gap_length.unwrap_or(defaults.gap_length),
        na_conc: oligo_file.na_conc.unwrap_or(defaults.na_conc),
        k_conc: oligo_file.k_conc.unwrap_or(defaults.k_conc),
        oligo_conc: oligo_file.oligo_conc.unwrap_or(defaults.oligo_conc),
        method: parse_or("oligos.method", oligo_file.method.as_deref(), defaults.method)?,
        clean: oligo_file.clean.unwrap_or(defaults.clean),
        optimize: oligo_file.optimize.unwrap_or(defaults.optimize),
    };

    let plate_file = file_config.plate.take().unwrap_or_default();
    let format = parse_or(
        "plate.format",
        plate_file.format.as_deref(),
        defaults.plate_format,
    )?;
    let plate = PlateSettings {
        format,
        destination_format: parse_or(
            "plate.destination-format",
            plate_file.destination_format.as_deref(),
            format,
        )?,
    };

    Ok(AppConfig {
        service,
        custom_mode,
        saturation,
        library_type,
        oligos,
        plate,
    })
}

fn parse_or<T>(key: &str, value: Option<&str>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(text) => text
            .parse()
            .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e))),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, expected: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", expected, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        match key {
            "service.base-url" => {
                config.service.get_or_insert_with(Default::default).base_url =
                    Some(value.to_string());
            }
            "service.timeout-secs" => {
                config.service.get_or_insert_with(Default::default).timeout_secs =
                    Some(parse_value(key, value, "integer")?);
            }
            "custom.generation-mode" => {
                config.custom.get_or_insert_with(Default::default).generation_mode =
                    Some(value.to_string());
            }
            "saturation.generation-mode" => {
                config
                    .saturation
                    .get_or_insert_with(Default::default)
                    .generation_mode = Some(value.to_string());
            }
            "saturation.exclude-stops" => {
                config
                    .saturation
                    .get_or_insert_with(Default::default)
                    .exclude_stops = Some(parse_value(key, value, "boolean")?);
            }
            "saturation.include-original" => {
                config
                    .saturation
                    .get_or_insert_with(Default::default)
                    .include_original = Some(parse_value(key, value, "boolean")?);
            }
            "scanning.library-type" => {
                config.scanning.get_or_insert_with(Default::default).library_type =
                    Some(value.to_string());
            }
            "oligos.oligo-length" => {
                config.oligos.get_or_insert_with(Default::default).oligo_length =
                    Some(parse_value(key, value, "integer")?);
            }
            "oligos.overlap-length" => {
                config.oligos.get_or_insert_with(Default::default).overlap_length =
                    Some(parse_value(key, value, "integer")?);
            }
            "oligos.gap-length" => {
                config.oligos.get_or_insert_with(Default::default).gap_length =
                    Some(parse_value(key, value, "integer")?);
            }
            "oligos.na-conc" => {
                config.oligos.get_or_insert_with(Default::default).na_conc =
                    Some(parse_value(key, value, "float")?);
            }
            "oligos.k-conc" => {
                config.oligos.get_or_insert_with(Default::default).k_conc =
                    Some(parse_value(key, value, "float")?);
            }
            "oligos.oligo-conc" => {
                config.oligos.get_or_insert_with(Default::default).oligo_conc =
                    Some(parse_value(key, value, "float")?);
            }
            "oligos.method" => {
                config.oligos.get_or_insert_with(Default::default).method = Some(value.to_string());
            }
            "oligos.clean" => {
                config.oligos.get_or_insert_with(Default::default).clean =
                    Some(parse_value(key, value, "boolean")?);
            }
            "oligos.optimize" => {
                config.oligos.get_or_insert_with(Default::default).optimize =
                    Some(parse_value(key, value, "boolean")?);
            }
            "plate.format" => {
                config.plate.get_or_insert_with(Default::default).format = Some(value.to_string());
            }
            "plate.destination-format" => {
                config
                    .plate
                    .get_or_insert_with(Default::default)
                    .destination_format = Some(value.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutaplex::core::models::service::{GenerationMode, LibraryType};
    use mutaplex::engine::config::TilingMethod;
    use mutaplex::engine::plate::PlateFormat;
    use once_cell::sync::Lazy;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    static TEST_DIR: Lazy<TempDir> = Lazy::new(|| tempdir().expect("Failed to create temp dir"));

    fn write_config_file(name: &str, content: &str) -> PathBuf {
        let file_path = TEST_DIR.path().join(name);
        fs::write(&file_path, content).unwrap();
        file_path
    }

    fn sets(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_apply_without_any_file() {
        let missing = TEST_DIR.path().join("absent.toml");
        let config = build_config(None, Some(missing), &[]).unwrap();

        assert_eq!(config.service.base_url, "http://localhost:5001/api");
        assert_eq!(config.service.timeout, Duration::from_secs(60));
        assert_eq!(config.custom_mode, GenerationMode::Individual);
        assert_eq!(config.library_type, LibraryType::Nnk);
        assert_eq!(config.oligos.oligo_length, 60);
        assert_eq!(config.oligos.overlap_length, 30);
        assert_eq!(config.oligos.gap_length, 20);
        assert_eq!(config.oligos.oligo_conc, 250.0);
        assert_eq!(config.plate.format, PlateFormat::WELLS_96_COLUMN);
        assert_eq!(config.plate.destination_format, PlateFormat::WELLS_96_COLUMN);
    }

    #[test]
    fn file_values_replace_defaults() {
        let path = write_config_file(
            "full.toml",
            r#"
            [service]
            base-url = "https://design.example.org/api/"
            timeout-secs = 5

            [saturation]
            generation-mode = "group_degenerate"
            exclude-stops = true

            [scanning]
            library-type = "NNN"

            [oligos]
            oligo-length = 80
            method = "gapped"
            clean = true

            [plate]
            format = "384-row"
            "#,
        );
        let config = build_config(Some(&path), None, &[]).unwrap();

        assert_eq!(config.service.base_url, "https://design.example.org/api");
        assert_eq!(config.service.timeout, Duration::from_secs(5));
        assert_eq!(
            config.saturation.generation_mode,
            GenerationMode::GroupDegenerate
        );
        assert!(config.saturation.exclude_stops);
        assert!(!config.saturation.include_original);
        assert_eq!(config.library_type, LibraryType::Nnn);
        assert_eq!(config.oligos.oligo_length, 80);
        assert_eq!(config.oligos.method, TilingMethod::Gapped);
        assert!(config.oligos.clean);
        assert_eq!(config.plate.format, PlateFormat::WELLS_384_ROW);
        assert_eq!(config.plate.destination_format, PlateFormat::WELLS_384_ROW);
    }

    #[test]
    fn fallback_file_is_used_when_present() {
        let path = write_config_file("fallback.toml", "[custom]\ngeneration-mode = \"group\"\n");
        let config = build_config(None, Some(path), &[]).unwrap();
        assert_eq!(config.custom_mode, GenerationMode::Group);
    }

    #[test]
    fn set_values_override_file_values() {
        let path = write_config_file("override.toml", "[oligos]\noligo-length = 80\n");
        let config = build_config(
            Some(&path),
            None,
            &sets(&[
                "oligos.oligo-length=100",
                "oligos.na-conc=25.5",
                "plate.destination-format=96-row",
                "saturation.include-original=true",
            ]),
        )
        .unwrap();

        assert_eq!(config.oligos.oligo_length, 100);
        assert_eq!(config.oligos.na_conc, 25.5);
        assert_eq!(config.plate.format, PlateFormat::WELLS_96_COLUMN);
        assert_eq!(config.plate.destination_format, PlateFormat::WELLS_96_ROW);
        assert!(config.saturation.include_original);
    }

    #[test]
    fn unknown_keys_are_configuration_errors() {
        let result = build_config(None, None, &sets(&["oligos.tm=60"]));
        assert!(matches!(result, Err(CliError::Config(_))));

        let malformed = build_config(None, None, &sets(&["oligos.oligo-length"]));
        assert!(matches!(malformed, Err(CliError::Config(_))));

        let bad_value = build_config(None, None, &sets(&["service.timeout-secs=soon"]));
        assert!(matches!(bad_value, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_file_fields_fail_to_parse() {
        let path = write_config_file("unknown.toml", "[oligos]\nmelting-temp = 60\n");
        let result = build_config(Some(&path), None, &[]);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn invalid_enum_text_is_reported_with_its_key() {
        let path = write_config_file("badmode.toml", "[custom]\ngeneration-mode = \"pooled\"\n");
        match build_config(Some(&path), None, &[]) {
            Err(CliError::Config(msg)) => assert!(msg.contains("custom.generation-mode")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn explicit_missing_file_is_an_io_error() {
        let path = TEST_DIR.path().join("nope.toml");
        assert!(matches!(
            build_config(Some(&path), None, &[]),
            Err(CliError::Io(_))
        ));
    }
}
