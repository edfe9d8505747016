use mutaplex::core::models::sequence::AddressType;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid mutation format for '{0}'. Expected 'TYPE:POS:VALUES' (e.g., 'N:5:T,G').")]
    InvalidMutationFormat(String),

    #[error("Invalid site format for '{0}'. Expected 'TYPE:POS' (e.g., 'AA:3').")]
    InvalidSiteFormat(String),

    #[error("Unknown address type '{kind}' in '{spec}'. Expected 'N' or 'AA'.")]
    UnknownKind { kind: String, spec: String },

    #[error("Invalid key=value pair '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// A mutation as typed on the command line. Position and values stay raw so the
/// ledger can report its own validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationArg {
    pub kind: AddressType,
    pub position: String,
    pub values: String,
}

fn parse_kind(kind: &str, spec: &str) -> Result<AddressType, ParseError> {
    kind.parse().map_err(|_| ParseError::UnknownKind {
        kind: kind.to_string(),
        spec: spec.to_string(),
    })
}

/// Parses `TYPE:POS:VALUES`, e.g. `N:5:T,G` or `aa:3:C`.
pub fn parse_mutation(spec: &str) -> Result<MutationArg, ParseError> {
    let parts: Vec<&str> = spec.splitn(3, ':').collect();
    match parts.as_slice() {
        [kind, position, values] => Ok(MutationArg {
            kind: parse_kind(kind, spec)?,
            position: position.to_string(),
            values: values.to_string(),
        }),
        _ => Err(ParseError::InvalidMutationFormat(spec.to_string())),
    }
}

/// Parses a saturation site `TYPE:POS`, e.g. `AA:3`.
pub fn parse_site(spec: &str) -> Result<MutationArg, ParseError> {
    let parts: Vec<&str> = spec.split(':').collect();
    match parts.as_slice() {
        [kind, position] => Ok(MutationArg {
            kind: parse_kind(kind, spec)?,
            position: position.to_string(),
            values: String::new(),
        }),
        _ => Err(ParseError::InvalidSiteFormat(spec.to_string())),
    }
}

/// Splits a `--set` override into trimmed key and value.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}
