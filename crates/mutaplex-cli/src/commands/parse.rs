use super::{load_records, write_records};
use crate::cli::ParseArgs;
use crate::error::Result;
use mutaplex::core::models::sequence::SequenceRecord;
use mutaplex::core::utils::sequence::gc_content;
use tracing::info;

pub fn run(args: ParseArgs) -> Result<()> {
    let records = load_records(&args.io)?;
    info!("Parsed {} record(s).", records.len());

    if args.summary {
        for line in summarize(&records) {
            println!("{}", line);
        }
        return Ok(());
    }
    write_records(&records, args.io.output.as_deref())
}

fn summarize(records: &[SequenceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            format!(
                "{}\t{} nt\tGC {:.1}%",
                r.name(),
                r.len(),
                gc_content(r.sequence()) * 100.0
            )
        })
        .collect()
}
