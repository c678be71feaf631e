//! Built-in node implementations.

pub mod nodes;

use std::sync::Arc;

use crate::config::NodeConfig;
use crate::plugin::NodeRegistry;
use crate::resolve::{ContentFetcher, LoraLookup};

pub use nodes::{
    InputFloat, InputImage, InputInt, InputLoRA, InputString, InputText, OutputImage,
};

/// Register every node of the pack.
pub fn register_builtin_nodes(
    registry: &mut NodeRegistry,
    config: &NodeConfig,
    fetcher: Arc<dyn ContentFetcher>,
    lookup: Arc<dyn LoraLookup>,
) {
    registry.register(Arc::new(InputInt));
    registry.register(Arc::new(InputFloat));
    registry.register(Arc::new(InputString));
    registry.register(Arc::new(InputText));
    registry.register(Arc::new(InputImage::from_config(config, fetcher)));
    registry.register(Arc::new(InputLoRA::from_config(config, lookup)));
    registry.register(Arc::new(OutputImage::new()));
}
