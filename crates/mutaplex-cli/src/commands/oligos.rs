use crate::cli::OligosArgs;
use crate::client::DesignServiceClient;
use crate::config::{AppConfig, OligoSettings};
use crate::error::{CliError, Result};
use mutaplex::core::io::fasta::FastaFile;
use mutaplex::core::models::service::{OligoDesignResponse, PrimerPair};
use mutaplex::engine::config::{OligoDesignConfig, OligoDesignConfigBuilder, TilingMethod};
use mutaplex::engine::layout::OligoLayout;
use mutaplex::engine::plate::{
    Destination, DilutionRow, PoolingRow, PrimerAssignment, WellAssignment, destination_map,
};
use mutaplex::workflows::oligos;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

pub async fn run(args: OligosArgs, config: &AppConfig) -> Result<()> {
    let response = match (&args.response, &args.input) {
        (Some(path), _) => read_response(path)?,
        (None, Some(input)) => {
            let records = FastaFile::read_upload(input, None).map_err(|e| CliError::FileParsing {
                path: input.clone(),
                source: e.into(),
            })?;
            let design = design_config(&config.oligos, &args)?;
            let request = oligos::build_request(&records, &design)?;

            if !args.submit.submit {
                let body = serde_json::to_string_pretty(&request)
                    .map_err(|e| CliError::Other(e.into()))?;
                println!("{}", body);
                println!("Dry run: pass --submit to send this request to the design service.");
                return Ok(());
            }
            let client = DesignServiceClient::new(&config.service)?;
            client.design_oligos(&request).await?
        }
        (None, None) => {
            return Err(CliError::Argument(
                "Either an input FASTA file or --response is required.".to_string(),
            ));
        }
    };

    let layout = oligos::consume(&response)?;
    print!("{}", layout);

    if args.wells || args.plate_format.is_some() {
        let format = args.plate_format.unwrap_or(config.plate.format);
        print_wells(&oligos::plate_map(&layout, format));
    }
    if args.destinations {
        print_destinations(&destinations(&layout, config));
    }
    let source_format = args.plate_format.unwrap_or(config.plate.format);
    if args.pooling {
        let (pooling, dilution) =
            oligos::pooling_plan(&layout, source_format, config.plate.destination_format);
        print_pooling(&pooling);
        print_dilution(&dilution);
    }
    if let Some(path) = &args.primers {
        let primers = read_primers(path)?;
        print_primers(&oligos::primer_plate(
            &primers,
            &layout,
            source_format,
            config.plate.destination_format,
        ));
    }

    info!(
        "Displayed {} oligo(s) in {} fragment group(s).",
        layout.total_oligos(),
        layout.groups().len()
    );
    Ok(())
}

fn design_config(settings: &OligoSettings, args: &OligosArgs) -> Result<OligoDesignConfig> {
    let method: TilingMethod = args.method.unwrap_or(settings.method);
    Ok(OligoDesignConfigBuilder::new()
        .oligo_length(args.oligo_length.unwrap_or(settings.oligo_length))
        .overlap_length(args.overlap_length.unwrap_or(settings.overlap_length))
        .gap_length(settings.gap_length)
        .na_conc(settings.na_conc)
        .k_conc(settings.k_conc)
        .oligo_conc(settings.oligo_conc)
        .method(method)
        .clean(settings.clean)
        .optimize(settings.optimize)
        .build()?)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::FileParsing {
        path: PathBuf::from(path),
        source: e.into(),
    })
}

fn read_response(path: &Path) -> Result<OligoDesignResponse> {
    info!("Loading saved oligo design response from {:?}", path);
    read_json(path)
}

fn read_primers(path: &Path) -> Result<BTreeMap<String, PrimerPair>> {
    info!("Loading primer pairs from {:?}", path);
    read_json(path)
}

fn destinations(layout: &OligoLayout<'_>, config: &AppConfig) -> Vec<Destination> {
    destination_map(layout, config.plate.destination_format)
}

fn print_wells(wells: &[WellAssignment]) {
    println!("Plate\tWell\tFragment\tLabel\tSequence");
    for w in wells {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            w.plate, w.well, w.fragment, w.label, w.sequence
        );
    }
}

fn print_pooling(rows: &[PoolingRow]) {
    println!();
    println!("Plate Source\tWell Source\tSequence\tPlate Destination\tWell Destination\tVolume (uL)");
    for r in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            r.source_plate, r.source_well, r.sequence, r.dest_plate, r.dest_well, r.volume_ul
        );
    }
}

fn print_dilution(rows: &[DilutionRow]) {
    println!();
    println!("Plate Source\tWell\tWorking Plate\tVolume (uL)");
    for r in rows {
        println!("{}\t{}\t{}\t{}", r.source_plate, r.well, r.working_plate, r.volume_ul);
    }
}

fn print_primers(rows: &[PrimerAssignment]) {
    println!();
    println!("Plate Source\tWell Source\tName\tSequence\tPlate Destination\tWell Destination");
    for r in rows {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            r.source_plate, r.source_well, r.label, r.sequence, r.dest_plate, r.dest_well
        );
    }
}

fn print_destinations(destinations: &[Destination]) {
    println!();
    println!("Fragment\tPlate\tWell");
    for d in destinations {
        println!("{}\t{}\t{}", d.fragment, d.plate, d.well);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SubmitFlag;
    use std::fs;
    use tempfile::tempdir;

    fn args() -> OligosArgs {
        OligosArgs {
            input: Some(PathBuf::from("frag.fasta")),
            response: None,
            oligo_length: None,
            overlap_length: Some(25),
            method: Some(TilingMethod::Gapped),
            wells: false,
            plate_format: None,
            destinations: false,
            pooling: false,
            primers: None,
            submit: SubmitFlag { submit: false },
        }
    }

    fn settings() -> OligoSettings {
        OligoSettings {
            oligo_length: 70,
            overlap_length: 30,
            gap_length: 20,
            na_conc: 50.0,
            k_conc: 0.0,
            oligo_conc: 250.0,
            method: TilingMethod::Simple,
            clean: true,
            optimize: false,
        }
    }

    #[test]
    fn flags_override_configured_oligo_settings() {
        let design = design_config(&settings(), &args()).unwrap();
        assert_eq!(design.oligo_length, 70);
        assert_eq!(design.overlap_length, 25);
        assert_eq!(design.method, TilingMethod::Gapped);
        assert!(design.clean);
    }

    #[test]
    fn out_of_range_lengths_are_configuration_errors() {
        let mut bad = args();
        bad.oligo_length = Some(10);
        assert!(matches!(
            design_config(&settings(), &bad),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn saved_responses_are_read_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("response.json");
        fs::write(
            &path,
            r#"{"oligos": [{"label": "RC_1", "sequence": "GG", "length": 2, "fragment": "f"},
                           {"label": "FF_1", "sequence": "CC", "length": 2, "fragment": "f", "invalid": true}],
                "primers": []}"#,
        )
        .unwrap();
        let response = read_response(&path).unwrap();
        let layout = oligos::consume(&response).unwrap();
        assert_eq!(layout.groups()[0].labels(), vec!["FF_1", "RC_1"]);
        assert!(layout.to_string().contains("INVALID_FF_1\tCC\t2"));
    }

    #[test]
    fn primer_files_are_read_as_pairs_per_fragment() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("primers.json");
        fs::write(
            &path,
            r#"{"f": {"forward_primer": "ATGC", "reverse_primer": "GCAT"}, "g": {}}"#,
        )
        .unwrap();
        let primers = read_primers(&path).unwrap();
        assert_eq!(primers.len(), 2);
        assert_eq!(primers["f"].reverse_primer.as_deref(), Some("GCAT"));
        assert_eq!(primers["g"], PrimerPair::default());
    }

    #[test]
    fn malformed_response_file_is_a_parsing_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            read_response(&path),
            Err(CliError::FileParsing { .. })
        ));
    }
}
