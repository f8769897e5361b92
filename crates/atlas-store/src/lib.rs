//! # atlas-store
//!
//! [`StateStore`] providers for the Atlas console client:
//!
//! - **file**: a single JSON state file, the durable default on desktop
//! - **memory**: an in-process map for ephemeral sessions and tests
//!
//! The provider is selected at construction time based on configuration.

pub mod file;
pub mod memory;

use std::sync::Arc;

use tracing::info;

use atlas_core::config::store::StoreConfig;
use atlas_core::error::AppError;
use atlas_core::result::AppResult;
use atlas_core::traits::StateStore;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;

/// Create the configured state store provider.
pub fn from_config(config: &StoreConfig) -> AppResult<Arc<dyn StateStore>> {
    match config.provider.as_str() {
        "file" => {
            info!(path = %config.path, "Initializing file state store");
            Ok(Arc::new(FileStateStore::new(&config.path)))
        }
        "memory" => {
            info!("Initializing in-memory state store");
            Ok(Arc::new(MemoryStateStore::new()))
        }
        other => Err(AppError::configuration(format!(
            "Unknown store provider: '{other}'. Supported: file, memory"
        ))),
    }
}
