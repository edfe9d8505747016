use super::variants::substitute;
use crate::core::models::sequence::SequenceRecord;
use crate::core::models::service::ScanningLibraryRequest;
use crate::engine::config::{ScanWindow, ScanningConfig};
use crate::engine::error::{EngineError, ValidationError};
use std::ops::Range;
use tracing::{info, instrument};

#[instrument(skip_all, name = "scanning_request")]
pub fn build_request(
    record: &SequenceRecord,
    config: &ScanningConfig,
) -> Result<ScanningLibraryRequest, EngineError> {
    scan_span(record, config.window)?;
    let (start_position, end_position, full_sequence) = match config.window {
        ScanWindow::Full => (None, None, true),
        ScanWindow::Range { start, end } => (Some(start), Some(end), false),
    };
    info!(
        "Prepared {} scanning request for '{}'.",
        config.library_type,
        record.name()
    );
    Ok(ScanningLibraryRequest {
        sequence: record.sequence().to_string(),
        sequence_name: record.name().to_string(),
        start_position,
        end_position,
        full_sequence,
        library_type: config.library_type,
    })
}

/// Replaces one codon at a time with the degenerate library triplet.
///
/// Codons are taken every three nucleotides from the start of the window, and
/// only whole codons inside the window are scanned. Variants are numbered from 1.
#[instrument(skip_all, name = "scanning_expansion")]
pub fn expand(
    record: &SequenceRecord,
    config: &ScanningConfig,
) -> Result<Vec<SequenceRecord>, EngineError> {
    let span = scan_span(record, config.window)?;
    let triplet = config.library_type.triplet();

    let variants: Vec<SequenceRecord> = span
        .step_by(3)
        .enumerate()
        .map(|(k, start)| {
            SequenceRecord::new(
                format!("{}_{}", record.name(), k + 1),
                substitute(record.sequence(), start, triplet),
            )
        })
        .collect();

    info!(
        "Generated {} scanning variant(s) for '{}'.",
        variants.len(),
        record.name()
    );
    Ok(variants)
}

/// 0-based start offsets that may begin a scanned codon.
fn scan_span(record: &SequenceRecord, window: ScanWindow) -> Result<Range<usize>, EngineError> {
    if record.is_empty() {
        return Err(ValidationError::MissingSequence.into());
    }
    let length = record.len();
    match window {
        ScanWindow::Full => Ok(0..length.saturating_sub(2)),
        ScanWindow::Range { start, end } => {
            if start < 1 || end > length || start > end {
                return Err(EngineError::InvalidRange { start, end, length });
            }
            Ok(start - 1..end.saturating_sub(2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::service::LibraryType;
    use crate::engine::config::ScanningConfigBuilder;

    fn full(library_type: LibraryType) -> ScanningConfig {
        ScanningConfigBuilder::new()
            .full_sequence()
            .library_type(library_type)
            .build()
            .unwrap()
    }

    fn window(start: usize, end: usize) -> ScanningConfig {
        ScanningConfigBuilder::new()
            .window(start, end)
            .library_type(LibraryType::Nnk)
            .build()
            .unwrap()
    }

    #[test]
    fn full_scan_replaces_every_codon() {
        let record = SequenceRecord::new("g", "ATGAAATAG");
        let variants = expand(&record, &full(LibraryType::Nnn)).unwrap();
        let pairs: Vec<_> = variants.iter().map(|v| (v.name(), v.sequence())).collect();
        assert_eq!(
            pairs,
            vec![
                ("g_1", "NNNAAATAG"),
                ("g_2", "ATGNNNTAG"),
                ("g_3", "ATGAAANNN")
            ]
        );
    }

    #[test]
    fn full_scan_ignores_a_trailing_partial_codon() {
        let record = SequenceRecord::new("g", "ATGAAAT");
        let variants = expand(&record, &full(LibraryType::Nnk)).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[1].sequence(), "ATGNNKT");
    }

    #[test]
    fn windowed_scan_steps_from_the_window_start() {
        let record = SequenceRecord::new("g", "ATGAAACCCGGG");
        let variants = expand(&record, &window(2, 10)).unwrap();
        let sequences: Vec<_> = variants.iter().map(SequenceRecord::sequence).collect();
        assert_eq!(
            sequences,
            vec!["ANNKAACCCGGG", "ATGANNKCCGGG", "ATGAAACNNKGG"]
        );
    }

    #[test]
    fn window_shorter_than_a_codon_yields_nothing() {
        let record = SequenceRecord::new("g", "ATGAAA");
        assert!(expand(&record, &window(4, 5)).unwrap().is_empty());
    }

    #[test]
    fn window_past_the_sequence_end_is_rejected() {
        let record = SequenceRecord::new("g", "ATGAAA");
        let err = build_request(&record, &window(1, 7)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidRange {
                start: 1,
                end: 7,
                length: 6
            }
        ));
    }

    #[test]
    fn request_sends_null_window_for_full_scans() {
        let record = SequenceRecord::new("g", "ATGAAA");
        let request = build_request(&record, &full(LibraryType::Nnk)).unwrap();
        assert!(request.full_sequence);
        assert_eq!(request.start_position, None);
        assert_eq!(request.sequence, "ATGAAA");

        let ranged = build_request(&record, &window(1, 6)).unwrap();
        assert_eq!((ranged.start_position, ranged.end_position), (Some(1), Some(6)));
        assert!(!ranged.full_sequence);
    }

    #[test]
    fn empty_records_are_rejected() {
        let record = SequenceRecord::new("g", "");
        assert!(matches!(
            expand(&record, &full(LibraryType::Nnk)),
            Err(EngineError::Validation(ValidationError::MissingSequence))
        ));
    }
}
