use super::sequence::AddressType;
use std::fmt;

/// A validated pending edit held by a [`MutationLedger`](crate::engine::ledger::MutationLedger).
///
/// Position-only ledgers (saturation) store records with no `new_values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub(crate) kind: AddressType,
    pub(crate) position: usize,        // 1-based, always inside the target sequence
    pub(crate) new_values: Vec<char>,  // Ordered, de-duplicated replacement tokens
}

impl MutationRecord {
    pub fn kind(&self) -> AddressType {
        self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn new_values(&self) -> &[char] {
        &self.new_values
    }

    pub fn is_position_only(&self) -> bool {
        self.new_values.is_empty()
    }

    /// Comma-joined replacement tokens, e.g. `C,D`.
    pub fn joined_values(&self) -> String {
        self.new_values
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Renders the compact label shown for a ledger entry: `N:5:T,G` or `AA:3`.
impl fmt::Display for MutationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_position_only() {
            write!(f, "{}:{}", self.kind, self.position)
        } else {
            write!(f, "{}:{}:{}", self.kind, self.position, self.joined_values())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_compact_label_with_values() {
        let record = MutationRecord {
            kind: AddressType::Nucleotide,
            position: 5,
            new_values: vec!['T', 'G'],
        };
        assert_eq!(record.to_string(), "N:5:T,G");
    }

    #[test]
    fn display_omits_values_for_position_only_records() {
        let record = MutationRecord {
            kind: AddressType::AminoAcid,
            position: 3,
            new_values: Vec::new(),
        };
        assert!(record.is_position_only());
        assert_eq!(record.to_string(), "AA:3");
    }
}
