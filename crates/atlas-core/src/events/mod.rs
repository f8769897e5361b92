//! Change events emitted by the session layer.
//!
//! Events are dispatched synchronously to registered observers so that
//! dependent caches and UI state are recomputed before the mutating call
//! returns.

pub mod session;

pub use session::SessionEvent;
