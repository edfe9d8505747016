//! # Mutaplex Core Library
//!
//! Sequence addressing, mutation bookkeeping and oligo result layout for DNA
//! mutagenesis design. Tiling, thermodynamics and variant synthesis at scale are
//! left to an external Sequence Design Service; this library prepares what is
//! sent to it and organizes what comes back.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SequenceRecord`,
//!   `MutationRecord`, `OligoRecord`, service wire shapes), the genetic code
//!   tables, and FASTA I/O.
//!
//! - **[`engine`]: The Logic Core.** Position resolution, the validating
//!   `MutationLedger`, the oligo layout pass, well-plate assignment, and the
//!   request configuration builders together with the error taxonomy.
//!
//! - **[`workflows`]: The Public API.** Complete operations built on the two
//!   layers below: assembling custom, saturation, scanning and oligo design
//!   requests, expanding libraries offline, and turning service responses into
//!   records and layouts.

pub mod core;
pub mod engine;
pub mod workflows;
