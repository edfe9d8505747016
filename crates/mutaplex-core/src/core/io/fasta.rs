use crate::core::io::traits::SequenceFile;
use crate::core::models::sequence::SequenceRecord;
use crate::core::utils::sequence::normalize_residues;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["fasta", "fa", "txt"];

const PLACEHOLDER_PREFIX: &str = "fragment";

#[derive(Debug, Error)]
pub enum FastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Splits raw pasted or uploaded text into named sequence records.
///
/// Text that does not start with `>` becomes a single record named
/// `fallback_name` (or `fragment1`). Otherwise every `>` block becomes a record
/// whose name is the trimmed first line; blocks with no letters left after
/// cleaning are dropped. Never fails.
pub fn parse_fasta(text: &str, fallback_name: Option<&str>) -> Vec<SequenceRecord> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if !trimmed.starts_with('>') {
        let name = fallback_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_name(1));
        return vec![SequenceRecord::new(name, normalize_residues(trimmed))];
    }

    let mut records: Vec<SequenceRecord> = Vec::new();
    for block in trimmed.split('>') {
        if block.trim().is_empty() {
            continue;
        }

        let mut lines = block.lines();
        let header = lines.next().unwrap_or("").trim();
        let sequence: String = lines.map(normalize_residues).collect();

        if sequence.is_empty() {
            debug!("Dropping FASTA block '{}' with no sequence letters.", header);
            continue;
        }

        let name = if header.is_empty() {
            placeholder_name(records.len() + 1)
        } else {
            header.to_string()
        };
        records.push(SequenceRecord::new(name, sequence));
    }
    records
}

/// Serializes records as `>name\nsequence` blocks joined by newlines.
pub fn to_fasta_string(records: &[SequenceRecord]) -> String {
    records
        .iter()
        .map(SequenceRecord::to_fasta)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extension check for uploads. Advisory only; content is never inspected.
pub fn is_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}

fn placeholder_name(ordinal: usize) -> String {
    format!("{}{}", PLACEHOLDER_PREFIX, ordinal)
}

pub struct FastaFile;

impl FastaFile {
    /// Reads an uploaded file, naming a headerless sequence after `fallback_name`.
    pub fn read_upload<P: AsRef<Path>>(
        path: P,
        fallback_name: Option<&str>,
    ) -> Result<Vec<SequenceRecord>, FastaError> {
        let path = path.as_ref();
        if !is_supported_extension(path) {
            warn!(
                "File {:?} does not have a FASTA extension ({}); reading it anyway.",
                path,
                SUPPORTED_EXTENSIONS.join(", ")
            );
        }
        let text = fs::read_to_string(path)?;
        let records = parse_fasta(&text, fallback_name);
        debug!("Read {} record(s) from {:?}.", records.len(), path);
        Ok(records)
    }
}

impl SequenceFile for FastaFile {
    type Error = FastaError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<SequenceRecord>, Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(parse_fasta(&text, None))
    }

    fn write_to(records: &[SequenceRecord], writer: &mut impl Write) -> Result<(), Self::Error> {
        for record in records {
            writeln!(writer, ">{}", record.name())?;
            writeln!(writer, "{}", record.sequence())?;
        }
        Ok(())
    }
}
