//! Static node descriptors handed to the host.

use serde::Serialize;

use crate::plugin::pin::{PinDefinition, PinDirection};

/// Entry-point name every node in this pack exposes.
pub const DEFAULT_FUNCTION: &str = "handler";

/// Category of a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    /// Values entering the graph (primitives, images, models)
    Input,
    /// Sinks that publish results to the UI
    Output,
}

impl std::fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeCategory::Input => "input",
            NodeCategory::Output => "output",
        };
        write!(f, "{}", s)
    }
}

/// Definition of a node type, registered in the [`NodeRegistry`].
///
/// This is what the host sees before any execution: pins, entry point and
/// display metadata.
///
/// [`NodeRegistry`]: crate::plugin::NodeRegistry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeTypeDefinition {
    /// Unique type identifier (e.g. "InputImage")
    pub type_id: String,
    /// Human-readable name (e.g. "Input Image")
    pub display_name: String,
    pub category: NodeCategory,
    pub description: String,
    pub function: String,
    pub inputs: Vec<PinDefinition>,
    pub outputs: Vec<PinDefinition>,
    /// Output nodes are always executed and produce a UI payload
    pub output_node: bool,
}

impl NodeTypeDefinition {
    pub fn new(type_id: &str, display_name: &str, category: NodeCategory) -> Self {
        Self {
            type_id: type_id.to_string(),
            display_name: display_name.to_string(),
            category,
            description: String::new(),
            function: DEFAULT_FUNCTION.to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            output_node: category == NodeCategory::Output,
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PinDefinition>) -> Self {
        debug_assert!(inputs.iter().all(|p| p.direction == PinDirection::Input));
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PinDefinition>) -> Self {
        debug_assert!(outputs.iter().all(|p| p.direction == PinDirection::Output));
        self.outputs = outputs;
        self
    }

    /// Output type names in pin order, e.g. `["IMAGE", "MASK"]`.
    pub fn return_types(&self) -> Vec<String> {
        self.outputs.iter().map(|p| p.data_type.to_string()).collect()
    }
}
