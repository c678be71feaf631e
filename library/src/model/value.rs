//! Values passed across the host boundary.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::LibraryError;
use crate::model::tensor::{ImageTensor, MaskTensor};

/// A value the host hands to a node, or a node hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    String(String),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
    Image(ImageTensor),
    Mask(MaskTensor),
    None,
}

impl NodeValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeValue::String(_) => "STRING",
            NodeValue::Int(_) => "INT",
            NodeValue::Float(_) => "FLOAT",
            NodeValue::Bytes(_) => "BYTES",
            NodeValue::Image(_) => "IMAGE",
            NodeValue::Mask(_) => "MASK",
            NodeValue::None => "NONE",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageTensor> {
        match self {
            NodeValue::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_mask(&self) -> Option<&MaskTensor> {
        match self {
            NodeValue::Mask(mask) => Some(mask),
            _ => None,
        }
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        NodeValue::String(value.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        NodeValue::String(value)
    }
}

impl From<Vec<u8>> for NodeValue {
    fn from(value: Vec<u8>) -> Self {
        NodeValue::Bytes(value)
    }
}

/// Resolved inputs keyed by pin name.
pub type NodeInputs = HashMap<String, NodeValue>;

/// Fetch a required input or fail with [`LibraryError::InvalidInput`].
pub fn required<'a>(inputs: &'a NodeInputs, name: &str) -> Result<&'a NodeValue, LibraryError> {
    inputs
        .get(name)
        .ok_or_else(|| LibraryError::InvalidInput(format!("missing required input '{}'", name)))
}

/// Result of a node invocation.
#[derive(Debug, Clone, Default)]
pub struct NodeOutput {
    /// Positional outputs, in declared pin order.
    pub values: Vec<NodeValue>,
    /// Preview payload for output nodes.
    pub ui: Option<UiPayload>,
}

impl NodeOutput {
    pub fn values(values: Vec<NodeValue>) -> Self {
        Self { values, ui: None }
    }

    pub fn ui(payload: UiPayload) -> Self {
        Self {
            values: Vec::new(),
            ui: Some(payload),
        }
    }

    /// `{"ui": {...}}` as the host expects it from an output node.
    pub fn ui_json(&self) -> Option<serde_json::Value> {
        self.ui
            .as_ref()
            .map(|payload| serde_json::json!({ "ui": payload }))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiPayload {
    pub images: Vec<UiImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiImage {
    pub base64: String,
    pub prefix: String,
}

/// Opaque identity the host compares across runs to skip re-execution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChangeKey(String);

impl ChangeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of a pre-execution input check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Ok,
    Rejected(String),
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        matches!(self, Validation::Ok)
    }
}
