//! # Core Module
//!
//! Stateless foundations of the library: the data models, the standard genetic
//! code, and FASTA input/output.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Sequence records, ledger entries, oligo records and service payloads
//! - **File I/O** ([`io`]) - Forgiving FASTA parsing and writing behind the [`SequenceFile`](io::traits::SequenceFile) trait
//! - **Lookup Tables** ([`utils`]) - The 64-codon table, its canonical reverse mapping, and strand helpers
//!
//! Nothing in this module holds mutable state; the reverse codon table is built
//! once on first use and shared read-only afterwards.

pub mod io;
pub mod models;
pub mod utils;
