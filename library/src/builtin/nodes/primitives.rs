//! Passthrough input nodes for plain values.

use serde_json::json;

use super::define_node_plugin;
use crate::error::LibraryError;
use crate::model::value::{NodeInputs, NodeOutput, NodeValue, required};
use crate::plugin::{
    NodeCategory, NodePlugin, NodeTypeDefinition, PinDataType, PinDefinition, Plugin,
};

const VALUE_PIN: &str = "value";

fn primitive_node(plugin: &dyn NodePlugin, value_pin: PinDefinition) -> NodeTypeDefinition {
    let data_type = value_pin.data_type;
    NodeTypeDefinition::new(plugin.id(), &plugin.name(), plugin.category())
        .with_inputs(vec![value_pin])
        .with_outputs(vec![PinDefinition::output(
            &data_type.to_string(),
            &data_type.to_string(),
            data_type,
        )])
}

/// Returns the `value` input unchanged after checking its type. Ints are
/// widened when a float is expected.
fn passthrough(inputs: &NodeInputs, data_type: PinDataType) -> Result<NodeOutput, LibraryError> {
    let value = required(inputs, VALUE_PIN)?;
    let out = match (data_type, value) {
        (PinDataType::String, NodeValue::String(_))
        | (PinDataType::Int, NodeValue::Int(_))
        | (PinDataType::Float, NodeValue::Float(_)) => value.clone(),
        (PinDataType::Float, NodeValue::Int(v)) => NodeValue::Float(*v as f64),
        _ => {
            return Err(LibraryError::InvalidInput(format!(
                "'{}' expects {}, got {}",
                VALUE_PIN,
                data_type,
                value.type_name()
            )));
        }
    };
    Ok(NodeOutput::values(vec![out]))
}

pub struct InputString;

define_node_plugin!(
    InputString,
    id: "InputString",
    name: "Input String",
    category: NodeCategory::Input,
    version: (0, 1, 0)
);

impl NodePlugin for InputString {
    fn definition(&self) -> NodeTypeDefinition {
        primitive_node(
            self,
            PinDefinition::input(VALUE_PIN, "Value", PinDataType::String).with_default(json!("")),
        )
    }

    fn run(&self, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError> {
        passthrough(inputs, PinDataType::String)
    }
}

pub struct InputText;

define_node_plugin!(
    InputText,
    id: "InputText",
    name: "Input Text",
    category: NodeCategory::Input,
    version: (0, 1, 0)
);

impl NodePlugin for InputText {
    fn definition(&self) -> NodeTypeDefinition {
        primitive_node(
            self,
            PinDefinition::input(VALUE_PIN, "Value", PinDataType::String).multiline(),
        )
    }

    fn run(&self, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError> {
        passthrough(inputs, PinDataType::String)
    }
}

pub struct InputInt;

define_node_plugin!(
    InputInt,
    id: "InputInt",
    name: "Input Int",
    category: NodeCategory::Input,
    version: (0, 1, 0)
);

impl NodePlugin for InputInt {
    fn definition(&self) -> NodeTypeDefinition {
        primitive_node(
            self,
            PinDefinition::input(VALUE_PIN, "Value", PinDataType::Int).with_default(json!(0)),
        )
    }

    fn run(&self, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError> {
        passthrough(inputs, PinDataType::Int)
    }
}

pub struct InputFloat;

define_node_plugin!(
    InputFloat,
    id: "InputFloat",
    name: "Input Float",
    category: NodeCategory::Input,
    version: (0, 1, 0)
);

impl NodePlugin for InputFloat {
    fn definition(&self) -> NodeTypeDefinition {
        primitive_node(
            self,
            PinDefinition::input(VALUE_PIN, "Value", PinDataType::Float).with_default(json!(0.0)),
        )
    }

    fn run(&self, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError> {
        passthrough(inputs, PinDataType::Float)
    }
}
