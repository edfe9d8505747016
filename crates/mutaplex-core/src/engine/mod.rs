//! # Engine Module
//!
//! The algorithmic layer: answers "what is at this position", keeps the list of
//! pending edits honest, and turns a flat oligo result set into a stable,
//! reviewable order.
//!
//! ## Architecture
//!
//! - **Position Lookup** ([`resolver`]) - Stateless nucleotide/codon lookups, safe to call on every keystroke
//! - **Edit Tracking** ([`ledger`]) - Ordered mutation ledgers with custom and saturation validation policies
//! - **Result Ordering** ([`layout`]) - Fragment grouping and FF/RC interlacing of oligo records
//! - **Plate Mapping** ([`plate`]) - Well assignment over the layout order
//! - **Configuration** ([`config`]) - Request builders with parameter validation
//! - **Error Handling** ([`error`]) - Validation kinds and the workflow error umbrella
//!
//! Every operation here is synchronous and works on caller-owned data, so no
//! locking is involved. Ledgers are plain values owned by the calling workflow.

pub mod config;
pub mod error;
pub mod layout;
pub mod ledger;
pub mod plate;
pub mod resolver;
