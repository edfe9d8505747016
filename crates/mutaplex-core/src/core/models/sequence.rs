use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a 1-based position addresses a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressType {
    #[serde(rename = "N")]
    Nucleotide,
    #[serde(rename = "AA")]
    AminoAcid,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid address type: '{0}' (expected 'N' or 'AA')")]
pub struct ParseAddressTypeError(pub String);

impl AddressType {
    /// The short code used on the wire and in ledger labels.
    pub fn code(&self) -> &'static str {
        match self {
            AddressType::Nucleotide => "N",
            AddressType::AminoAcid => "AA",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            AddressType::Nucleotide => "nucleotide",
            AddressType::AminoAcid => "amino acid",
        }
    }

    /// Number of nucleotides covered by one position.
    pub fn span(&self) -> usize {
        match self {
            AddressType::Nucleotide => 1,
            AddressType::AminoAcid => 3,
        }
    }

    /// 0-based offset of the first nucleotide covered by a 1-based `position`.
    /// `None` for position 0 or when the offset does not fit in `usize`.
    pub fn start_offset(&self, position: usize) -> Option<usize> {
        position.checked_sub(1)?.checked_mul(self.span())
    }

    /// Whether a 1-based `position` lies inside a sequence of `length` nucleotides.
    pub fn fits(&self, position: usize, length: usize) -> bool {
        self.start_offset(position)
            .and_then(|start| start.checked_add(self.span()))
            .is_some_and(|end| end <= length)
    }
}

impl FromStr for AddressType {
    type Err = ParseAddressTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n" | "nt" | "nucleotide" => Ok(AddressType::Nucleotide),
            "aa" | "amino-acid" | "aminoacid" => Ok(AddressType::AminoAcid),
            _ => Err(ParseAddressTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    name: String,     // Header text, or a synthesized `fragment<N>` placeholder
    sequence: String, // Upper-cased letters only
}

impl SequenceRecord {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn to_fasta(&self) -> String {
        format!(">{}\n{}", self.name, self.sequence)
    }
}

impl fmt::Display for SequenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">{}\n{}", self.name, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_type_parses_codes_and_long_names() {
        assert_eq!("N".parse::<AddressType>(), Ok(AddressType::Nucleotide));
        assert_eq!(" aa ".parse::<AddressType>(), Ok(AddressType::AminoAcid));
        assert_eq!(
            "amino-acid".parse::<AddressType>(),
            Ok(AddressType::AminoAcid)
        );
        assert!("codon".parse::<AddressType>().is_err());
    }

    #[test]
    fn address_type_bounds_follow_codon_span() {
        assert!(AddressType::Nucleotide.fits(9, 9));
        assert!(!AddressType::Nucleotide.fits(10, 9));
        assert!(AddressType::AminoAcid.fits(3, 9));
        assert!(!AddressType::AminoAcid.fits(4, 9));
        assert!(!AddressType::AminoAcid.fits(0, 9));
    }

    #[test]
    fn huge_positions_never_fit_and_never_overflow() {
        assert!(!AddressType::AminoAcid.fits(6148914691236517207, 9));
        assert!(!AddressType::AminoAcid.fits(usize::MAX, usize::MAX));
        assert!(!AddressType::Nucleotide.fits(usize::MAX, 9));
        assert_eq!(AddressType::AminoAcid.start_offset(usize::MAX), None);
        assert_eq!(AddressType::AminoAcid.start_offset(3), Some(6));
        assert_eq!(AddressType::Nucleotide.start_offset(0), None);
    }

    #[test]
    fn address_type_serializes_as_wire_code() {
        let json = serde_json::to_string(&AddressType::AminoAcid).unwrap();
        assert_eq!(json, "\"AA\"");
        let back: AddressType = serde_json::from_str("\"N\"").unwrap();
        assert_eq!(back, AddressType::Nucleotide);
    }

    #[test]
    fn sequence_record_renders_as_fasta_block() {
        let record = SequenceRecord::new("gene", "ATGC");
        assert_eq!(record.to_fasta(), ">gene\nATGC");
        assert_eq!(record.to_string(), record.to_fasta());
        assert_eq!(record.len(), 4);
    }
}
