//! # atlas-entity
//!
//! Domain entity models for the Atlas console client: credentials and
//! claim sets, pending verification records, identity snapshots, menu
//! records, navigation nodes, and page permissions.

pub mod credential;
pub mod identity;
pub mod menu;
pub mod navigation;
pub mod permission;
pub mod verification;

pub use credential::{ClaimSet, Credential};
pub use identity::IdentitySnapshot;
pub use menu::{MenuRecord, PageRecord, SubmenuRecord};
pub use navigation::NavigationNode;
pub use permission::PagePermissions;
pub use verification::PendingVerification;
