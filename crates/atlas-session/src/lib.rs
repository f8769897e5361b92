//! # atlas-session
//!
//! Session state for the Atlas console client: structural credential
//! decoding, the credential and pending-verification stores mirrored to
//! persistent storage, and the [`SessionManager`] state machine that
//! composes them and notifies observers of changes.

pub mod credential;
pub mod manager;
pub mod token;
pub mod verification;

pub use credential::CredentialStore;
pub use manager::{SessionManager, SessionState};
pub use verification::PendingVerificationStore;
