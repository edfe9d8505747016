use crate::core::models::sequence::AddressType;
use crate::core::utils::codons::{UNKNOWN_RESIDUE, translate_codon};
use std::fmt;

const PLACEHOLDER: &str = "-";

/// What currently sits at a position of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    current_token: String, // Base or residue; empty when invalid
    codon: Option<String>, // Source codon for amino-acid lookups
    valid: bool,
}

impl Resolution {
    fn invalid() -> Self {
        Self {
            current_token: String::new(),
            codon: None,
            valid: false,
        }
    }

    pub fn current_token(&self) -> &str {
        &self.current_token
    }

    pub fn codon(&self) -> Option<&str> {
        self.codon.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// `-` when invalid, `ATG (M)` for amino acids, the bare base for nucleotides.
impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "{}", PLACEHOLDER);
        }
        match &self.codon {
            Some(codon) => write!(f, "{} ({})", codon, self.current_token),
            None => write!(f, "{}", self.current_token),
        }
    }
}

/// Parses user-entered position text. Only trimmed decimal integers of at
/// least 1 are accepted.
pub fn parse_position(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<usize>().ok().filter(|&p| p >= 1)
}

/// Looks up the token at a 1-based `position`.
///
/// Never fails: a zero or out-of-bounds position yields an invalid
/// [`Resolution`]. Codons outside the standard table translate to `?`.
pub fn resolve(sequence: &str, kind: AddressType, position: usize) -> Resolution {
    if !kind.fits(position, sequence.len()) {
        return Resolution::invalid();
    }

    let Some(slice) = kind
        .start_offset(position)
        .and_then(|start| sequence.get(start..start + kind.span()))
    else {
        return Resolution::invalid();
    };

    match kind {
        AddressType::Nucleotide => Resolution {
            current_token: slice.to_string(),
            codon: None,
            valid: true,
        },
        AddressType::AminoAcid => {
            let residue = translate_codon(slice).unwrap_or(UNKNOWN_RESIDUE);
            Resolution {
                current_token: residue.to_string(),
                codon: Some(slice.to_string()),
                valid: true,
            }
        }
    }
}

/// Same as [`resolve`], taking the raw position text as typed.
pub fn resolve_str(sequence: &str, kind: AddressType, raw_position: &str) -> Resolution {
    match parse_position(raw_position) {
        Some(position) => resolve(sequence, kind, position),
        None => Resolution::invalid(),
    }
}

/// Confirmation line for a pending edit, e.g.
/// `Change amino acid at position 3 from M to A,C.`
pub fn recap(kind: AddressType, position: usize, current: &str, new_values: &[char]) -> String {
    let targets = new_values
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "Change {} at position {} from {} to {}.",
        kind.describe(),
        position,
        current,
        targets
    )
}
