use super::variants::{check_submission, dedup_records, substitute};
use crate::core::models::mutation::MutationRecord;
use crate::core::models::sequence::{AddressType, SequenceRecord};
use crate::core::models::service::{CustomMutagenesisRequest, GenerationMode};
use crate::core::utils::codons::{UNKNOWN_RESIDUE, preferred_codon, translate_codon};
use crate::engine::config::CustomRequestConfig;
use crate::engine::error::EngineError;
use crate::engine::ledger::{LedgerKind, MutationLedger};
use tracing::{info, instrument};

#[instrument(skip_all, name = "custom_request")]
pub fn build_request(
    record: &SequenceRecord,
    ledger: &MutationLedger,
    config: &CustomRequestConfig,
) -> Result<CustomMutagenesisRequest, EngineError> {
    check_submission(record, ledger, LedgerKind::Custom)?;
    info!(
        "Prepared custom request for '{}' with {} mutation(s) ({} mode).",
        record.name(),
        ledger.len(),
        config.generation_mode
    );
    Ok(CustomMutagenesisRequest {
        original_sequence: record.sequence().to_string(),
        original_name: record.name().to_string(),
        mutations: ledger.mutation_specs(),
        generation_mode: config.generation_mode,
    })
}

/// Generates the custom library locally.
///
/// In `individual` mode every ledger value yields its own variant. In `group`
/// mode the first value of each edit is applied cumulatively, in position
/// order, to a single variant whose name is the parent name directly followed
/// by every applied tag (`geneA1CK2R`).
#[instrument(skip_all, name = "custom_expansion")]
pub fn expand(
    record: &SequenceRecord,
    ledger: &MutationLedger,
    config: &CustomRequestConfig,
) -> Result<Vec<SequenceRecord>, EngineError> {
    check_submission(record, ledger, LedgerKind::Custom)?;

    let variants = match config.generation_mode {
        GenerationMode::Individual => expand_individual(record, ledger),
        _ => vec![expand_group(record, ledger)],
    };

    info!(
        "Generated {} custom variant(s) for '{}'.",
        variants.len(),
        record.name()
    );
    Ok(variants)
}

fn expand_individual(record: &SequenceRecord, ledger: &MutationLedger) -> Vec<SequenceRecord> {
    let mut variants = Vec::new();
    for mutation in ledger.iter() {
        for &value in mutation.new_values() {
            if let Some((sequence, tag)) = apply(record.sequence(), mutation, value) {
                variants.push(SequenceRecord::new(
                    format!("{}_{}", record.name(), tag),
                    sequence,
                ));
            }
        }
    }
    dedup_records(variants)
}

fn expand_group(record: &SequenceRecord, ledger: &MutationLedger) -> SequenceRecord {
    let mut ordered: Vec<&MutationRecord> = ledger.iter().collect();
    ordered.sort_by_key(|m| m.position());

    let mut sequence = record.sequence().to_string();
    let mut tags = String::new();
    for mutation in ordered {
        let Some(&value) = mutation.new_values().first() else {
            continue;
        };
        if let Some((next, tag)) = apply(&sequence, mutation, value) {
            sequence = next;
            tags.push_str(&tag);
        }
    }
    SequenceRecord::new(format!("{}{}", record.name(), tags), sequence)
}

/// Applies one edit, returning the new sequence and its `{from}{pos}{to}` tag.
fn apply(sequence: &str, mutation: &MutationRecord, value: char) -> Option<(String, String)> {
    let position = mutation.position();
    let start = mutation.kind().start_offset(position)?;
    match mutation.kind() {
        AddressType::Nucleotide => {
            let original = sequence.get(start..start + 1)?;
            let replaced = substitute(sequence, start, value.encode_utf8(&mut [0; 4]));
            Some((replaced, format!("{}{}{}", original, position, value)))
        }
        AddressType::AminoAcid => {
            let codon = sequence.get(start..start + 3)?;
            let original = translate_codon(codon).unwrap_or(UNKNOWN_RESIDUE);
            let new_codon = preferred_codon(value)?;
            let replaced = substitute(sequence, start, new_codon);
            Some((replaced, format!("{}{}{}", original, position, value)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::CustomRequestConfigBuilder;
    use serde_json::json;

    fn config(mode: GenerationMode) -> CustomRequestConfig {
        CustomRequestConfigBuilder::new()
            .generation_mode(mode)
            .build()
            .unwrap()
    }

    fn fixture() -> (SequenceRecord, MutationLedger) {
        let record = SequenceRecord::new("gene", "ATGAAATAG");
        let mut ledger = MutationLedger::custom();
        ledger
            .add(record.sequence(), AddressType::AminoAcid, "2", "R,K")
            .unwrap();
        ledger
            .add(record.sequence(), AddressType::Nucleotide, "1", "C")
            .unwrap();
        (record, ledger)
    }

    fn names(records: &[SequenceRecord]) -> Vec<&str> {
        records.iter().map(SequenceRecord::name).collect()
    }

    #[test]
    fn request_carries_ledger_in_wire_shape() {
        let (record, ledger) = fixture();
        let request = build_request(&record, &ledger, &config(GenerationMode::Group)).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "original_sequence": "ATGAAATAG",
                "original_name": "gene",
                "mutations": [
                    {"type": "AA", "pos": 2, "new": ["R", "K"]},
                    {"type": "N", "pos": 1, "new": ["C"]}
                ],
                "generation_mode": "group"
            })
        );
    }

    #[test]
    fn request_requires_at_least_one_mutation() {
        let record = SequenceRecord::new("gene", "ATG");
        let ledger = MutationLedger::custom();
        let result = build_request(&record, &ledger, &config(GenerationMode::Individual));
        assert!(matches!(result, Err(EngineError::EmptyLedger)));
    }

    #[test]
    fn individual_mode_yields_one_variant_per_value() {
        let (record, ledger) = fixture();
        let variants = expand(&record, &ledger, &config(GenerationMode::Individual)).unwrap();
        assert_eq!(names(&variants), vec!["gene_K2R", "gene_K2K", "gene_A1C"]);
        assert_eq!(variants[0].sequence(), "ATGAGATAG");
        assert_eq!(variants[1].sequence(), "ATGAAATAG");
        assert_eq!(variants[2].sequence(), "CTGAAATAG");
    }

    #[test]
    fn individual_mode_drops_repeated_edits() {
        let record = SequenceRecord::new("gene", "ATGAAA");
        let mut ledger = MutationLedger::custom();
        ledger.add(record.sequence(), AddressType::Nucleotide, "4", "G").unwrap();
        ledger.add(record.sequence(), AddressType::Nucleotide, "4", "G").unwrap();
        let variants = expand(&record, &ledger, &config(GenerationMode::Individual)).unwrap();
        assert_eq!(names(&variants), vec!["gene_A4G"]);
    }

    #[test]
    fn group_mode_applies_first_values_in_position_order() {
        let (record, ledger) = fixture();
        let variants = expand(&record, &ledger, &config(GenerationMode::Group)).unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].name(), "geneA1CK2R");
        assert_eq!(variants[0].sequence(), "CTGAGATAG");
    }

    #[test]
    fn group_mode_reads_residues_from_the_edited_sequence() {
        let record = SequenceRecord::new("orf", "ATGAAA");
        let mut ledger = MutationLedger::custom();
        ledger.add(record.sequence(), AddressType::Nucleotide, "1", "C").unwrap();
        ledger.add(record.sequence(), AddressType::AminoAcid, "1", "W").unwrap();
        let variants = expand(&record, &ledger, &config(GenerationMode::Group)).unwrap();
        assert_eq!(variants[0].name(), "orfA1CL1W");
        assert_eq!(variants[0].sequence(), "TGGAAA");
    }
}
