pub mod builtin;
pub mod cli;
pub mod config;
pub mod error;
pub mod folder_paths;
pub mod model;
pub mod plugin;
pub mod resolve;

use std::sync::Arc;

pub use cli::run;
pub use config::NodeConfig;
pub use error::LibraryError;
pub use plugin::NodeRegistry;

use crate::builtin::register_builtin_nodes;
use crate::resolve::{HttpFetcher, HttpLoraLookup};

/// Build a registry holding every node of the pack, wired to the real
/// filesystem and HTTP collaborators.
pub fn create_node_registry(config: &NodeConfig) -> Result<NodeRegistry, LibraryError> {
    config.validate()?;
    let fetcher = Arc::new(HttpFetcher::new()?);
    let lookup = Arc::new(HttpLoraLookup::new(config.lora_service_url.clone())?);

    let mut registry = NodeRegistry::new();
    register_builtin_nodes(&mut registry, config, fetcher, lookup);
    Ok(registry)
}
