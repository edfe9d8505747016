use super::error::ValidationError;
use super::resolver::parse_position;
use crate::core::models::mutation::MutationRecord;
use crate::core::models::sequence::AddressType;
use crate::core::models::service::{MutationSpec, SiteSpec};
use crate::core::utils::codons::{AMINO_ACID_TOKENS, NUCLEOTIDE_TOKENS};
use tracing::debug;

/// Which validation policy a ledger applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    /// Explicit replacement values; repeated positions are allowed.
    Custom,
    /// Position-only sites; each `(type, position)` pair may appear once.
    Saturation,
}

/// Ordered list of pending edits owned by one workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationLedger {
    kind: LedgerKind,
    records: Vec<MutationRecord>,
}

impl MutationLedger {
    pub fn new(kind: LedgerKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn custom() -> Self {
        Self::new(LedgerKind::Custom)
    }

    pub fn saturation() -> Self {
        Self::new(LedgerKind::Saturation)
    }

    pub fn kind(&self) -> LedgerKind {
        self.kind
    }

    /// Validates and appends an edit against `target`.
    ///
    /// `position` and `new_values` are taken as typed by the user; values are a
    /// comma-separated list. Saturation ledgers ignore `new_values`.
    ///
    /// # Errors
    ///
    /// Returns the first failing check, in this order: missing sequence,
    /// invalid position, empty value, out of bounds, invalid alphabet,
    /// duplicate position.
    pub fn add(
        &mut self,
        target: &str,
        kind: AddressType,
        position: &str,
        new_values: &str,
    ) -> Result<MutationRecord, ValidationError> {
        if target.trim().is_empty() {
            return Err(ValidationError::MissingSequence);
        }

        let position_num = parse_position(position).ok_or_else(|| ValidationError::InvalidPosition {
            input: position.trim().to_string(),
        })?;

        let tokens = match self.kind {
            LedgerKind::Custom => non_empty_tokens(new_values)?,
            LedgerKind::Saturation => Vec::new(),
        };

        if !kind.fits(position_num, target.len()) {
            return Err(ValidationError::OutOfBounds {
                position: position_num,
                length: target.len(),
            });
        }

        let values = check_alphabet(kind, &tokens)?;

        if self.kind == LedgerKind::Saturation && self.contains_site(kind, position_num) {
            return Err(ValidationError::DuplicatePosition {
                kind,
                position: position_num,
            });
        }

        let record = MutationRecord {
            kind,
            position: position_num,
            new_values: values,
        };
        debug!("Ledger ({:?}) accepted {}", self.kind, record);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Removes the entry at `index`. Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<MutationRecord> {
        if index < self.records.len() {
            let removed = self.records.remove(index);
            debug!("Ledger ({:?}) removed {}", self.kind, removed);
            Some(removed)
        } else {
            None
        }
    }

    pub fn list(&self) -> &[MutationRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &MutationRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&MutationRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Entries as the `mutations` request array.
    pub fn mutation_specs(&self) -> Vec<MutationSpec> {
        self.records
            .iter()
            .map(|r| MutationSpec {
                kind: r.kind,
                pos: r.position,
                new: r.new_values.clone(),
            })
            .collect()
    }

    /// Entries as the `saturation_mutations` request array.
    pub fn site_specs(&self) -> Vec<SiteSpec> {
        self.records
            .iter()
            .map(|r| SiteSpec {
                kind: r.kind,
                pos: r.position,
            })
            .collect()
    }

    fn contains_site(&self, kind: AddressType, position: usize) -> bool {
        self.records
            .iter()
            .any(|r| r.kind == kind && r.position == position)
    }
}

/// Parses a comma-separated replacement list the way [`MutationLedger::add`]
/// does, without the position checks.
///
/// # Errors
///
/// `EmptyValue` when no token is left after discarding blanks, otherwise
/// `InvalidAlphabet` for the first token that is not a single legal symbol.
pub fn parse_values(kind: AddressType, raw: &str) -> Result<Vec<char>, ValidationError> {
    check_alphabet(kind, &non_empty_tokens(raw)?)
}

fn non_empty_tokens(raw: &str) -> Result<Vec<String>, ValidationError> {
    let tokens = split_tokens(raw);
    if tokens.is_empty() {
        Err(ValidationError::EmptyValue)
    } else {
        Ok(tokens)
    }
}

fn split_tokens(raw: &str) -> Vec<String> {
    raw.to_uppercase()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn check_alphabet(kind: AddressType, tokens: &[String]) -> Result<Vec<char>, ValidationError> {
    let alphabet = match kind {
        AddressType::Nucleotide => &NUCLEOTIDE_TOKENS,
        AddressType::AminoAcid => &AMINO_ACID_TOKENS,
    };

    let mut values: Vec<char> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let mut chars = token.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) if alphabet.contains(&c) => c,
            _ => {
                return Err(ValidationError::InvalidAlphabet {
                    token: token.clone(),
                    kind,
                });
            }
        };
        if !values.contains(&symbol) {
            values.push(symbol);
        }
    }
    Ok(values)
}
