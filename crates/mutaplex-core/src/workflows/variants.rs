use crate::core::io::fasta::parse_fasta;
use crate::core::models::mutation::MutationRecord;
use crate::core::models::sequence::SequenceRecord;
use crate::core::models::service::VariantResponse;
use crate::engine::config::ConfigError;
use crate::engine::error::{EngineError, ValidationError};
use crate::engine::ledger::{LedgerKind, MutationLedger};
use std::collections::HashSet;
use tracing::debug;

/// Copy of `sequence` with `replacement` written over it at byte offset `start`.
/// Offsets that do not fall on character boundaries leave the sequence unchanged.
pub(crate) fn substitute(sequence: &str, start: usize, replacement: &str) -> String {
    let end = start + replacement.len();
    match (sequence.get(..start), sequence.get(end..)) {
        (Some(head), Some(tail)) => format!("{head}{replacement}{tail}"),
        _ => sequence.to_string(),
    }
}

/// Drops repeated `(name, sequence)` pairs, keeping first occurrences.
pub(crate) fn dedup_records(records: Vec<SequenceRecord>) -> Vec<SequenceRecord> {
    let before = records.len();
    let mut seen = HashSet::new();
    let unique: Vec<SequenceRecord> = records
        .into_iter()
        .filter(|r| seen.insert((r.name().to_string(), r.sequence().to_string())))
        .collect();
    if unique.len() < before {
        debug!("Removed {} duplicate variant(s).", before - unique.len());
    }
    unique
}

/// Common preconditions for submitting a ledger against a record.
pub(crate) fn check_submission(
    record: &SequenceRecord,
    ledger: &MutationLedger,
    expected: LedgerKind,
) -> Result<(), EngineError> {
    if ledger.kind() != expected {
        return Err(ConfigError::Unsupported {
            parameter: "ledger",
            value: format!("{:?}", ledger.kind()),
        }
        .into());
    }
    if record.is_empty() {
        return Err(ValidationError::MissingSequence.into());
    }
    if ledger.is_empty() {
        return Err(EngineError::EmptyLedger);
    }
    ledger
        .iter()
        .try_for_each(|m| check_fits(m, record.len()))
}

fn check_fits(mutation: &MutationRecord, length: usize) -> Result<(), EngineError> {
    if mutation.kind().fits(mutation.position(), length) {
        Ok(())
    } else {
        Err(ValidationError::OutOfBounds {
            position: mutation.position(),
            length,
        }
        .into())
    }
}

/// Turns a mutagenesis response into records, or an upstream failure when the
/// service reported an error.
pub fn records_from_response(response: &VariantResponse) -> Result<Vec<SequenceRecord>, EngineError> {
    if let Some(message) = &response.error {
        return Err(EngineError::upstream(message.clone()));
    }
    let records = parse_fasta(&response.variants.join("\n"), None);
    debug!(
        "Service returned {} variant(s), parsed {}.",
        response.total_count,
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::sequence::AddressType;

    #[test]
    fn substitute_replaces_in_place() {
        assert_eq!(substitute("ATGAAATAG", 3, "NNK"), "ATGNNKTAG");
        assert_eq!(substitute("ATG", 0, "C"), "CTG");
        assert_eq!(substitute("ATG", 2, "C"), "ATC");
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let records = vec![
            SequenceRecord::new("a", "AT"),
            SequenceRecord::new("b", "AT"),
            SequenceRecord::new("a", "AT"),
        ];
        let names: Vec<_> = dedup_records(records)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn submission_checks_ledger_kind_and_contents() {
        let record = SequenceRecord::new("g", "ATGAAA");
        let mut ledger = MutationLedger::custom();
        assert!(matches!(
            check_submission(&record, &ledger, LedgerKind::Custom),
            Err(EngineError::EmptyLedger)
        ));
        ledger.add("ATGAAA", AddressType::Nucleotide, "6", "C").unwrap();
        assert!(check_submission(&record, &ledger, LedgerKind::Custom).is_ok());
        assert!(matches!(
            check_submission(&record, &ledger, LedgerKind::Saturation),
            Err(EngineError::Config(ConfigError::Unsupported { .. }))
        ));

        let shorter = SequenceRecord::new("g", "ATG");
        assert!(matches!(
            check_submission(&shorter, &ledger, LedgerKind::Custom),
            Err(EngineError::Validation(ValidationError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn response_variants_are_parsed_as_fasta() {
        let response = VariantResponse {
            success: true,
            variants: vec![">g_A1C\nCTG".into(), ">g_T2A\nAAG".into()],
            total_count: 2,
            ..Default::default()
        };
        let records = records_from_response(&response).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name(), "g_T2A");
    }

    #[test]
    fn response_errors_become_upstream_failures() {
        let response = VariantResponse {
            error: Some("Original name is required".into()),
            ..Default::default()
        };
        let err = records_from_response(&response).unwrap_err();
        assert!(matches!(err, EngineError::Upstream(_)));
        assert!(err.to_string().contains("Original name is required"));
    }
}
