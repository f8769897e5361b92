//! # atlas-cache
//!
//! Single-flight TTL caching for the Atlas console client. A
//! [`SingleFlight`] cache guarantees that at most one fetch per key is in
//! flight at any instant; all concurrent callers for that key await and
//! share the same result.

pub mod keys;
pub mod single_flight;

pub use single_flight::SingleFlight;
