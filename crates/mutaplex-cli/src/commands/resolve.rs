use super::load_target;
use crate::cli::ResolveArgs;
use crate::error::{CliError, Result};
use mutaplex::core::models::sequence::AddressType;
use mutaplex::engine::error::EngineError;
use mutaplex::engine::ledger::parse_values;
use mutaplex::engine::resolver::{Resolution, parse_position, recap, resolve_str};
use tracing::info;

pub fn run(args: ResolveArgs) -> Result<()> {
    let target = load_target(&args.io)?;
    let resolution = resolve_str(target.sequence(), args.kind, &args.position);
    info!(
        "Resolved {}:{} on '{}' as {}.",
        args.kind,
        args.position.trim(),
        target.name(),
        resolution
    );

    println!("{}", resolution);
    if !resolution.is_valid() {
        return Err(CliError::Argument(format!(
            "Position '{}' is not valid for a {}-nt sequence.",
            args.position.trim(),
            target.len()
        )));
    }

    if let Some(values) = &args.new_values {
        println!("{}", recap_line(args.kind, &args.position, &resolution, values)?);
    }
    Ok(())
}

/// Confirmation line for `--new`, rejecting values the ledger would refuse.
fn recap_line(
    kind: AddressType,
    raw_position: &str,
    resolution: &Resolution,
    raw_values: &str,
) -> Result<String> {
    let position = parse_position(raw_position).ok_or_else(|| {
        CliError::Argument(format!("Position '{}' is not a positive integer.", raw_position.trim()))
    })?;
    let values = parse_values(kind, raw_values).map_err(EngineError::from)?;
    Ok(recap(kind, position, resolution.current_token(), &values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mutaplex::engine::error::ValidationError;
    use mutaplex::engine::resolver::resolve;

    const ORF: &str = "ATGAAATAG";

    #[test]
    fn recap_lists_every_accepted_value() {
        let resolution = resolve(ORF, AddressType::AminoAcid, 1);
        let line = recap_line(AddressType::AminoAcid, "1", &resolution, "a, c").unwrap();
        assert_eq!(line, "Change amino acid at position 1 from M to A,C.");
    }

    #[test]
    fn multi_letter_values_are_refused_instead_of_truncated() {
        let resolution = resolve(ORF, AddressType::AminoAcid, 1);
        let result = recap_line(AddressType::AminoAcid, "1", &resolution, "AC");
        assert!(matches!(
            result,
            Err(CliError::Core(EngineError::Validation(
                ValidationError::InvalidAlphabet { .. }
            )))
        ));
    }

    #[test]
    fn blank_value_lists_are_refused() {
        let resolution = resolve(ORF, AddressType::Nucleotide, 2);
        assert!(matches!(
            recap_line(AddressType::Nucleotide, "2", &resolution, " , "),
            Err(CliError::Core(EngineError::Validation(ValidationError::EmptyValue)))
        ));
    }
}
