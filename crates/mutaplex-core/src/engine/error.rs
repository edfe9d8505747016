use super::config::ConfigError;
use crate::core::models::sequence::AddressType;
use thiserror::Error;

/// Why a ledger rejected an edit. Checks run in declaration order and the
/// first failure wins.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please provide a sequence first.")]
    MissingSequence,

    #[error("Position must be a positive integer (got '{input}').")]
    InvalidPosition { input: String },

    #[error("Please enter at least one new value.")]
    EmptyValue,

    #[error("Position {position} is out of bounds for a sequence of {length} nucleotides.")]
    OutOfBounds { position: usize, length: usize },

    #[error("Invalid {} value '{token}'.", .kind.describe())]
    InvalidAlphabet { token: String, kind: AddressType },

    #[error("This variant position has already been added ({kind}:{position}).")]
    DuplicatePosition { kind: AddressType, position: usize },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid mutation: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("No mutations have been added to the ledger")]
    EmptyLedger,

    #[error("Invalid scan window {start}..={end} for a sequence of {length} nucleotides")]
    InvalidRange {
        start: usize,
        end: usize,
        length: usize,
    },

    #[error("DNA length must be a multiple of 3 for amino acid variants (length is {length})")]
    ReadingFrame { length: usize },

    #[error("Design service request failed: {0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    /// Wraps any failure from the design service without inspecting it.
    pub fn upstream<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        EngineError::Upstream(error.into())
    }
}
