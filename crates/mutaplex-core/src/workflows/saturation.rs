use super::variants::{check_submission, dedup_records, substitute};
use crate::core::models::mutation::MutationRecord;
use crate::core::models::sequence::{AddressType, SequenceRecord};
use crate::core::models::service::SaturationMutagenesisRequest;
use crate::core::utils::codons::{
    NUCLEOTIDES, STANDARD_AMINO_ACIDS, STOP, UNKNOWN_RESIDUE, codons_for,
    contains_stop_in_frame, translate_codon,
};
use crate::core::utils::sequence::is_in_frame;
use crate::engine::config::SaturationConfig;
use crate::engine::error::EngineError;
use crate::engine::ledger::{LedgerKind, MutationLedger};
use tracing::{debug, info, instrument};

#[instrument(skip_all, name = "saturation_request")]
pub fn build_request(
    record: &SequenceRecord,
    ledger: &MutationLedger,
    config: &SaturationConfig,
) -> Result<SaturationMutagenesisRequest, EngineError> {
    check_saturation(record, ledger)?;
    info!(
        "Prepared saturation request for '{}' with {} site(s).",
        record.name(),
        ledger.len()
    );
    Ok(SaturationMutagenesisRequest {
        original_sequence: record.sequence().to_string(),
        original_name: record.name().to_string(),
        fasta_content: record.to_fasta(),
        mutations: Vec::new(),
        saturation_mutations: ledger.site_specs(),
        exclude_stops: config.exclude_stops,
        include_original: config.include_original,
        generation_mode: config.generation_mode,
    })
}

/// Generates every substitution at the ledger sites locally.
///
/// Nucleotide sites produce the three other bases; amino-acid sites produce
/// every other residue through each of its codons. With `exclude_stops`, stop
/// residues are not targeted and base changes are kept only when the whole
/// variant reads without an in-frame stop codon.
#[instrument(skip_all, name = "saturation_expansion")]
pub fn expand(
    record: &SequenceRecord,
    ledger: &MutationLedger,
    config: &SaturationConfig,
) -> Result<Vec<SequenceRecord>, EngineError> {
    check_saturation(record, ledger)?;

    let mut variants = Vec::new();
    if config.include_original {
        variants.push(record.clone());
    }
    for site in ledger.iter() {
        let before = variants.len();
        match site.kind() {
            AddressType::Nucleotide => saturate_base(record, site, config, &mut variants),
            AddressType::AminoAcid => saturate_residue(record, site, config, &mut variants),
        }
        debug!("Site {} produced {} variant(s).", site, variants.len() - before);
    }

    let variants = dedup_records(variants);
    info!(
        "Generated {} saturation variant(s) for '{}' ({} mode).",
        variants.len(),
        record.name(),
        config.generation_mode
    );
    Ok(variants)
}

fn check_saturation(record: &SequenceRecord, ledger: &MutationLedger) -> Result<(), EngineError> {
    check_submission(record, ledger, LedgerKind::Saturation)?;
    let has_residue_sites = ledger.iter().any(|s| s.kind() == AddressType::AminoAcid);
    if has_residue_sites && !is_in_frame(record.sequence()) {
        return Err(EngineError::ReadingFrame {
            length: record.len(),
        });
    }
    Ok(())
}

fn saturate_base(
    record: &SequenceRecord,
    site: &MutationRecord,
    config: &SaturationConfig,
    out: &mut Vec<SequenceRecord>,
) {
    let sequence = record.sequence();
    let Some(index) = site.kind().start_offset(site.position()) else {
        return;
    };
    let Some(original) = sequence.get(index..index + 1) else {
        return;
    };

    for base in NUCLEOTIDES.chars() {
        if original.starts_with(base) {
            continue;
        }
        let mutated = substitute(sequence, index, base.encode_utf8(&mut [0; 4]));
        if config.exclude_stops && contains_stop_in_frame(&mutated) {
            continue;
        }
        out.push(SequenceRecord::new(
            format!("{}_N{}{}", record.name(), site.position(), base),
            mutated,
        ));
    }
}

fn saturate_residue(
    record: &SequenceRecord,
    site: &MutationRecord,
    config: &SaturationConfig,
    out: &mut Vec<SequenceRecord>,
) {
    let sequence = record.sequence();
    let Some(start) = site.kind().start_offset(site.position()) else {
        return;
    };
    let Some(codon) = sequence.get(start..start + 3) else {
        return;
    };
    let original = translate_codon(codon).unwrap_or(UNKNOWN_RESIDUE);

    let targets = STANDARD_AMINO_ACIDS
        .chars()
        .chain((!config.exclude_stops).then_some(STOP));
    for target in targets.filter(|&t| t != original) {
        for new_codon in codons_for(target) {
            out.push(SequenceRecord::new(
                format!("{}_{}{}{}", record.name(), original, site.position(), target),
                substitute(sequence, start, new_codon),
            ));
        }
    }
}
