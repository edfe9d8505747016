pub mod custom;
pub mod oligos;
pub mod parse;
pub mod resolve;
pub mod saturation;
pub mod scanning;

use crate::cli::SequenceIo;
use crate::error::{CliError, Result};
use crate::utils::parser::MutationArg;
use mutaplex::core::io::fasta::{FastaFile, parse_fasta};
use mutaplex::core::io::traits::SequenceFile;
use mutaplex::core::models::sequence::SequenceRecord;
use mutaplex::engine::ledger::MutationLedger;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const STDIN_MARKER: &str = "-";

/// Reads every record named by `io.input`, or standard input for `-`.
pub fn load_records(io: &SequenceIo) -> Result<Vec<SequenceRecord>> {
    let records = if io.input.as_os_str() == STDIN_MARKER {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        parse_fasta(&text, io.name.as_deref())
    } else {
        info!("Loading sequences from {:?}", &io.input);
        FastaFile::read_upload(&io.input, io.name.as_deref()).map_err(|e| {
            CliError::FileParsing {
                path: io.input.clone(),
                source: e.into(),
            }
        })?
    };
    if records.is_empty() {
        return Err(CliError::FileParsing {
            path: io.input.clone(),
            source: anyhow::anyhow!("no sequence records found"),
        });
    }
    Ok(records)
}

/// The record named by `io.record`, or the first one.
pub fn load_target(io: &SequenceIo) -> Result<SequenceRecord> {
    let mut records = load_records(io)?;
    match &io.record {
        Some(name) => records
            .into_iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| CliError::Argument(format!("No record named '{}' in the input.", name))),
        None => {
            if records.len() > 1 {
                warn!(
                    "Input holds {} records; using the first one ('{}').",
                    records.len(),
                    records[0].name()
                );
            }
            Ok(records.swap_remove(0))
        }
    }
}

/// Feeds parsed command-line edits into `ledger`, printing every rejection.
///
/// Rejected edits do not stop the remaining ones from being added, mirroring
/// how an interactive form keeps its list. Returns the number of rejections.
pub fn fill_ledger(
    ledger: &mut MutationLedger,
    target: &SequenceRecord,
    edits: &[MutationArg],
) -> usize {
    let mut rejected = 0;
    for edit in edits {
        match ledger.add(target.sequence(), edit.kind, &edit.position, &edit.values) {
            Ok(record) => info!("Added {} to the ledger.", record),
            Err(e) => {
                rejected += 1;
                eprintln!("✗ {}:{} rejected: {}", edit.kind, edit.position.trim(), e);
            }
        }
    }
    rejected
}

pub fn write_records(records: &[SequenceRecord], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            FastaFile::write_to_path(records, path).map_err(|e| CliError::FileParsing {
                path: PathBuf::from(path),
                source: e.into(),
            })?;
            println!("Wrote {} record(s) to {}", records.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            FastaFile::write_to(records, &mut handle).map_err(|e| CliError::Other(e.into()))?;
        }
    }
    Ok(())
}
