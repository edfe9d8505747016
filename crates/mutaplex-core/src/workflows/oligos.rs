use crate::core::io::fasta::to_fasta_string;
use crate::core::models::sequence::SequenceRecord;
use crate::core::models::service::{OligoDesignRequest, OligoDesignResponse, PrimerPair};
use crate::engine::config::{OligoDesignConfig, TilingMethod};
use crate::engine::error::{EngineError, ValidationError};
use crate::engine::layout::{OligoLayout, layout};
use crate::engine::plate::{
    DilutionRow, PlateFormat, PoolingRow, PrimerAssignment, WellAssignment, assign_wells,
    dilution_map, pooling_map, primer_map,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Builds the oligo design request for one or more fragments.
///
/// Every record becomes one FASTA block of the request body. Records without
/// any sequence are refused rather than silently dropped.
#[instrument(skip_all, name = "oligo_request")]
pub fn build_request(
    records: &[SequenceRecord],
    config: &OligoDesignConfig,
) -> Result<OligoDesignRequest, EngineError> {
    if records.is_empty() || records.iter().any(SequenceRecord::is_empty) {
        return Err(ValidationError::MissingSequence.into());
    }
    info!(
        "Prepared {} oligo design for {} fragment(s) (oligo {} nt, overlap {} nt).",
        config.method,
        records.len(),
        config.oligo_length,
        config.overlap_length
    );
    Ok(OligoDesignRequest {
        sequence: to_fasta_string(records),
        oligo_length: config.oligo_length,
        overlap_length: config.overlap_length,
        gap_length: config.gap_length,
        na_conc: config.na_conc,
        k_conc: config.k_conc,
        oligo_conc: config.oligo_conc,
        simple_oligo_maker: config.method == TilingMethod::Simple,
        gapped_oligo_maker: config.method == TilingMethod::Gapped,
        clean_oligos: config.clean,
        optimized_oligos: config.optimize,
    })
}

/// Lays out the oligos of a design response, or reports the service error.
#[instrument(skip_all, name = "oligo_layout")]
pub fn consume(response: &OligoDesignResponse) -> Result<OligoLayout<'_>, EngineError> {
    if let Some(message) = &response.error {
        return Err(EngineError::upstream(message.clone()));
    }
    let view = layout(&response.oligos);
    let invalid = response.oligos.iter().filter(|o| o.invalid).count();
    if invalid > 0 {
        warn!("{} oligo(s) were flagged invalid by the design service.", invalid);
    }
    info!(
        "Laid out {} oligo(s) across {} fragment(s).",
        view.total_oligos(),
        view.groups().len()
    );
    Ok(view)
}

pub fn plate_map(layout: &OligoLayout<'_>, format: PlateFormat) -> Vec<WellAssignment> {
    let wells = assign_wells(layout, format);
    if let Some(last) = wells.last() {
        info!(
            "Assigned {} oligo(s) to {} ({} format).",
            wells.len(),
            last.plate,
            format
        );
    }
    wells
}

/// Pooling transfers plus the working-plate copies of the same source plates.
#[instrument(skip_all, name = "pooling_plan")]
pub fn pooling_plan(
    layout: &OligoLayout<'_>,
    source: PlateFormat,
    destination: PlateFormat,
) -> (Vec<PoolingRow>, Vec<DilutionRow>) {
    let pooling = pooling_map(layout, source, destination);
    let dilution = dilution_map(&assign_wells(layout, source));
    info!(
        "Planned {} pooling transfer(s) into {} destination well(s).",
        pooling.len(),
        layout.groups().len()
    );
    (pooling, dilution)
}

/// Primer plate for the fragments of `layout`.
///
/// Primers are placed in layout fragment order; primers of fragments the layout
/// does not contain follow in name order and receive no destination.
#[instrument(skip_all, name = "primer_plate")]
pub fn primer_plate(
    primers: &BTreeMap<String, PrimerPair>,
    layout: &OligoLayout<'_>,
    source: PlateFormat,
    destination: PlateFormat,
) -> Vec<PrimerAssignment> {
    let fragments = layout.fragments();
    let mut ordered: Vec<(String, PrimerPair)> = fragments
        .iter()
        .filter_map(|f| primers.get(*f).map(|p| (f.to_string(), p.clone())))
        .collect();
    let unmatched: Vec<(String, PrimerPair)> = primers
        .iter()
        .filter(|(name, _)| !fragments.contains(&name.as_str()))
        .map(|(name, p)| (name.clone(), p.clone()))
        .collect();
    if !unmatched.is_empty() {
        debug!("{} primer pair(s) have no matching fragment.", unmatched.len());
    }
    ordered.extend(unmatched);

    let placed = primer_map(&ordered, layout, source, destination);
    info!("Placed {} primer(s).", placed.len());
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::oligo::OligoRecord;
    use crate::engine::config::OligoDesignConfigBuilder;
    use serde_json::json;

    fn config(method: TilingMethod) -> OligoDesignConfig {
        OligoDesignConfigBuilder::new()
            .oligo_length(60)
            .overlap_length(30)
            .method(method)
            .clean(true)
            .build()
            .unwrap()
    }

    #[test]
    fn request_joins_fragments_and_sets_method_flags() {
        let records = vec![
            SequenceRecord::new("a", "ATGC"),
            SequenceRecord::new("b", "GGCC"),
        ];
        let request = build_request(&records, &config(TilingMethod::Gapped)).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["sequence"], json!(">a\nATGC\n>b\nGGCC"));
        assert_eq!(value["simple_oligo_maker"], json!(false));
        assert_eq!(value["gapped_oligo_maker"], json!(true));
        assert_eq!(value["clean_oligos"], json!(true));
        assert_eq!(value["gap_length"], json!(20));
        assert_eq!(value["na_conc"], json!(50.0));
    }

    #[test]
    fn request_refuses_missing_sequences() {
        let cfg = config(TilingMethod::Simple);
        assert!(matches!(
            build_request(&[], &cfg),
            Err(EngineError::Validation(ValidationError::MissingSequence))
        ));
        let records = vec![SequenceRecord::new("a", "")];
        assert!(build_request(&records, &cfg).is_err());
    }

    #[test]
    fn consume_interlaces_the_response() {
        let response = OligoDesignResponse {
            oligos: vec![
                OligoRecord::new("RC_2", "TT", "frag"),
                OligoRecord::new("FF_2", "AA", "frag"),
                OligoRecord::new("RC_1", "GG", "frag"),
                OligoRecord::new("FF_1", "CC", "frag"),
            ],
            ..Default::default()
        };
        let view = consume(&response).unwrap();
        assert_eq!(view.groups()[0].labels(), vec!["FF_1", "RC_1", "FF_2", "RC_2"]);
    }

    #[test]
    fn consume_reports_service_errors() {
        let response = OligoDesignResponse {
            error: Some("Sequence too short".into()),
            ..Default::default()
        };
        let err = consume(&response).unwrap_err();
        assert!(err.to_string().contains("Sequence too short"));
    }

    #[test]
    fn pooling_plan_pairs_transfers_with_dilution_copies() {
        let response = OligoDesignResponse {
            oligos: vec![
                OligoRecord::new("FF_1", "CC", "a"),
                OligoRecord::new("FF_1", "GG", "b"),
            ],
            ..Default::default()
        };
        let view = consume(&response).unwrap();
        let (pooling, dilution) = pooling_plan(&view, PlateFormat::default(), PlateFormat::default());
        assert_eq!(pooling.len(), 2);
        assert_eq!(pooling[1].dest_well, "B1");
        assert_eq!(dilution.len(), 2);
        assert_eq!(dilution[1].well, pooling[1].source_well);
    }

    #[test]
    fn primer_plate_follows_layout_fragment_order() {
        let response = OligoDesignResponse {
            oligos: vec![
                OligoRecord::new("FF_1", "CC", "zeta"),
                OligoRecord::new("FF_1", "GG", "alpha"),
            ],
            ..Default::default()
        };
        let view = consume(&response).unwrap();
        let primers: BTreeMap<String, PrimerPair> = serde_json::from_value(json!({
            "alpha": {"forward_primer": "AAA", "reverse_primer": "TTT"},
            "zeta": {"forward_primer": "CCC", "reverse_primer": "GGG"},
            "beta": {"forward_primer": "ATA"}
        }))
        .unwrap();

        let placed = primer_plate(&primers, &view, PlateFormat::default(), PlateFormat::default());
        let labels: Vec<_> = placed.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["zeta_FP", "zeta_RP", "alpha_FP", "alpha_RP"]);
        assert_eq!(placed[2].dest_well, "B1");
        assert_eq!(placed[3].source_well, "D1");
    }

    #[test]
    fn plate_map_follows_layout_order() {
        let response = OligoDesignResponse {
            oligos: vec![
                OligoRecord::new("RC_1", "GG", "frag"),
                OligoRecord::new("FF_1", "CC", "frag"),
            ],
            ..Default::default()
        };
        let view = consume(&response).unwrap();
        let wells = plate_map(&view, PlateFormat::default());
        assert_eq!(wells[0].label, "FF_1");
        assert_eq!(wells[1].well, "B1");
        assert!(plate_map(&OligoLayout::default(), PlateFormat::default()).is_empty());
    }
}
