//! # atlas-access
//!
//! Access coordination for the Atlas console client: the role-tier
//! policy and per-page permission resolver, the navigation tree builder,
//! the remote access gateway, and the [`AccessService`] that composes
//! them with the single-flight caches and the session.

pub mod gateway;
pub mod navigation;
pub mod resolver;
pub mod roles;
pub mod service;

pub use gateway::AccessGateway;
pub use navigation::build_navigation_tree;
pub use resolver::PermissionResolver;
pub use roles::{NameTierPolicy, RoleTier, RoleTierPolicy, SUPER_ADMIN_ROLE};
pub use service::AccessService;
