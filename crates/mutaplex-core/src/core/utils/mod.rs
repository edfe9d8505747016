//! Shared lookup tables and small sequence helpers.

pub mod codons;
pub mod sequence;
