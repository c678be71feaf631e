use std::sync::Arc;

use super::define_node_plugin;
use crate::config::NodeConfig;
use crate::error::LibraryError;
use crate::model::reference::ModelReference;
use crate::model::value::{NodeInputs, NodeOutput, NodeValue, required};
use crate::plugin::{
    NodeCategory, NodePlugin, NodeTypeDefinition, PinDataType, PinDefinition, Plugin,
};
use crate::resolve::{LoraLookup, ModelPairResolver};

const LORA_PIN: &str = "lora";

/// Resolves `lora@base` or a bare LoRA id to a pair of model file paths.
pub struct InputLoRA {
    resolver: ModelPairResolver,
}

define_node_plugin!(
    InputLoRA,
    id: "InputLoRA",
    name: "Input LoRA",
    category: NodeCategory::Input,
    version: (0, 1, 0)
);

impl InputLoRA {
    pub fn new(resolver: ModelPairResolver) -> Self {
        Self { resolver }
    }

    pub fn from_config(config: &NodeConfig, lookup: Arc<dyn LoraLookup>) -> Self {
        Self::new(ModelPairResolver::from_config(config, lookup))
    }
}

impl NodePlugin for InputLoRA {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new(self.id(), &self.name(), self.category())
            .with_description("`lora@base` or a LoRA id known to the lookup service.")
            .with_inputs(vec![
                PinDefinition::input(LORA_PIN, "LoRA", PinDataType::String)
                    .with_default(serde_json::json!("")),
            ])
            .with_outputs(vec![
                PinDefinition::output("base_model", "Base Model", PinDataType::String),
                PinDefinition::output("lora_model", "LoRA Model", PinDataType::String),
            ])
    }

    fn run(&self, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError> {
        let value = required(inputs, LORA_PIN)?;
        let text = value.as_str().ok_or_else(|| {
            LibraryError::UnsupportedSource(format!("LoRA reference of type {}", value.type_name()))
        })?;
        let pair = self.resolver.resolve(ModelReference::classify(text)?)?;
        Ok(NodeOutput::values(vec![
            NodeValue::String(pair.base.to_string_lossy().into_owned()),
            NodeValue::String(pair.lora.to_string_lossy().into_owned()),
        ]))
    }
}
