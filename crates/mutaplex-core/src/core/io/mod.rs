//! Provides input/output functionality for sequence file formats.
//!
//! Parsing is deliberately forgiving: malformed text degrades to whatever
//! records can be extracted rather than failing. Errors only arise from the
//! underlying reader or writer.

pub mod fasta;
pub mod traits;
