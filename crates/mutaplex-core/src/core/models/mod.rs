//! # Core Models Module
//!
//! Plain data types shared by every layer of the library.
//!
//! ## Key Components
//!
//! - [`sequence`] - Named sequence records and the [`AddressType`](sequence::AddressType) used to address them
//! - [`mutation`] - Validated ledger entries
//! - [`oligo`] - Oligo records produced by the design service, with label decoding
//! - [`service`] - Request and response bodies exchanged with the design service

pub mod mutation;
pub mod oligo;
pub mod sequence;
pub mod service;
