//! # atlas-client
//!
//! Facade crate for the Atlas console client core. A UI shell embeds this
//! layer for session state, single-flight resource caching, permission
//! resolution, and navigation tree building; the individual crates are
//! re-exported here under short names.

pub mod telemetry;

pub use atlas_access as access;
pub use atlas_cache as cache;
pub use atlas_core as core;
pub use atlas_entity as entity;
pub use atlas_session as session;
pub use atlas_store as store;
