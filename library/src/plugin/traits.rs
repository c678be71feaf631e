//! Core plugin traits.

use crate::error::LibraryError;
use crate::model::value::{ChangeKey, NodeInputs, NodeOutput, Validation};
use crate::plugin::node_types::{NodeCategory, NodeTypeDefinition};

/// Base trait for all plugins.
pub trait Plugin: Send + Sync {
    /// Class-mapping key, unique across the pack.
    fn id(&self) -> &'static str;
    fn name(&self) -> String;
    fn category(&self) -> NodeCategory;
    fn version(&self) -> (u32, u32, u32) {
        (0, 1, 0)
    }
}

/// A node the host graph can execute.
///
/// `changed` and `validate` receive the same unresolved inputs `run` would, and
/// the host may call them at any time, independently of `run`.
pub trait NodePlugin: Plugin {
    fn definition(&self) -> NodeTypeDefinition;

    fn run(&self, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError>;

    /// `Ok(None)` leaves re-execution to the host's default policy.
    fn changed(&self, _inputs: &NodeInputs) -> Result<Option<ChangeKey>, LibraryError> {
        Ok(None)
    }

    fn validate(&self, _inputs: &NodeInputs) -> Validation {
        Validation::Ok
    }
}
