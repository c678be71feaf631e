//! Registry mapping node type ids to implementations.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;

use crate::error::LibraryError;
use crate::model::value::{ChangeKey, NodeInputs, NodeOutput, Validation};
use crate::plugin::node_types::NodeTypeDefinition;
use crate::plugin::traits::{NodePlugin, Plugin};

#[derive(Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<String, Arc<dyn NodePlugin>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, node: Arc<dyn NodePlugin>) {
        debug!("NodeRegistry: registering '{}'", node.id());
        self.nodes.insert(node.id().to_string(), node);
    }

    pub fn get(&self, type_id: &str) -> Option<&Arc<dyn NodePlugin>> {
        self.nodes.get(type_id)
    }

    fn node(&self, type_id: &str) -> Result<&Arc<dyn NodePlugin>, LibraryError> {
        self.get(type_id)
            .ok_or_else(|| LibraryError::UnknownNode(type_id.to_string()))
    }

    /// Registered type ids, sorted.
    pub fn type_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// type id -> human-readable title.
    pub fn display_name_mappings(&self) -> BTreeMap<String, String> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.name()))
            .collect()
    }

    pub fn definitions(&self) -> Vec<NodeTypeDefinition> {
        self.nodes.values().map(|node| node.definition()).collect()
    }

    /// All node descriptors as one JSON object keyed by type id.
    pub fn object_info(&self) -> Result<serde_json::Value, LibraryError> {
        let mut info = serde_json::Map::new();
        for (id, node) in &self.nodes {
            let mut entry = serde_json::to_value(node.definition())?;
            let (major, minor, patch) = node.version();
            if let Some(fields) = entry.as_object_mut() {
                fields.insert(
                    "version".to_string(),
                    format!("{}.{}.{}", major, minor, patch).into(),
                );
            }
            info.insert(id.clone(), entry);
        }
        Ok(serde_json::Value::Object(info))
    }

    pub fn run(&self, type_id: &str, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError> {
        let node = self.node(type_id)?;
        debug!("NodeRegistry: running '{}'", type_id);
        node.run(inputs)
    }

    pub fn changed(
        &self,
        type_id: &str,
        inputs: &NodeInputs,
    ) -> Result<Option<ChangeKey>, LibraryError> {
        self.node(type_id)?.changed(inputs)
    }

    pub fn validate(&self, type_id: &str, inputs: &NodeInputs) -> Result<Validation, LibraryError> {
        Ok(self.node(type_id)?.validate(inputs))
    }
}
