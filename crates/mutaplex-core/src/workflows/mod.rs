//! # Workflows Module
//!
//! End-to-end operations built from the engine components. Each workflow can
//! either produce the request body for the Sequence Design Service or, where
//! the expansion rules are known, generate the variant library locally.
//!
//! ## Architecture
//!
//! - **Custom Mutagenesis** ([`custom`]) - Explicit point edits, one variant per edit or one combined variant
//! - **Saturation Mutagenesis** ([`saturation`]) - Every substitution at the selected sites
//! - **Scanning Libraries** ([`scanning`]) - Degenerate triplets walked across a window
//! - **Oligo Design** ([`oligos`]) - Design requests, response layout and plate mapping
//!
//! Service responses are treated as opaque: failures are wrapped in
//! [`EngineError::Upstream`](crate::engine::error::EngineError::Upstream) and
//! never inspected further.

pub mod custom;
pub mod oligos;
pub mod saturation;
pub mod scanning;
mod variants;

pub use variants::records_from_response;
