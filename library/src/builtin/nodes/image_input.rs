//! Image input node.
//!
//! Accepts a bare upload name, an absolute path, an http(s) URL or raw bytes on
//! the `image` pin.

use std::sync::Arc;

use super::define_node_plugin;
use crate::config::NodeConfig;
use crate::error::LibraryError;
use crate::folder_paths::InputFolders;
use crate::model::reference::ImageReference;
use crate::model::value::{ChangeKey, NodeInputs, NodeOutput, NodeValue, Validation, required};
use crate::plugin::{
    NodeCategory, NodePlugin, NodeTypeDefinition, PinDataType, PinDefinition, Plugin,
};
use crate::resolve::{ChangeKeyProvider, ContentFetcher, ImageResolver, InputValidator};

const IMAGE_PIN: &str = "image";

pub struct InputImage {
    folders: InputFolders,
    resolver: ImageResolver,
    change_keys: ChangeKeyProvider,
    validator: InputValidator,
    emit_mask: bool,
}

define_node_plugin!(
    InputImage,
    id: "InputImage",
    name: "Input Image",
    category: NodeCategory::Input,
    version: (0, 3, 0)
);

impl InputImage {
    pub fn new(folders: InputFolders, fetcher: Arc<dyn ContentFetcher>, emit_mask: bool) -> Self {
        Self {
            resolver: ImageResolver::new(folders.clone(), fetcher),
            change_keys: ChangeKeyProvider::new(folders.clone()),
            validator: InputValidator::new(folders.clone()),
            folders,
            emit_mask,
        }
    }

    pub fn from_config(config: &NodeConfig, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self::new(InputFolders::from_config(config), fetcher, config.emit_mask)
    }
}

impl NodePlugin for InputImage {
    fn definition(&self) -> NodeTypeDefinition {
        let mut outputs = vec![PinDefinition::output("IMAGE", "IMAGE", PinDataType::Image)];
        if self.emit_mask {
            outputs.push(PinDefinition::output("MASK", "MASK", PinDataType::Mask));
        }
        NodeTypeDefinition::new(self.id(), &self.name(), self.category())
            .with_description("Loads an image from the input folder, a path, a URL or raw bytes.")
            .with_inputs(vec![
                PinDefinition::input(IMAGE_PIN, "Image", PinDataType::String)
                    .with_choices(self.folders.list_input_files())
                    .with_image_upload(),
            ])
            .with_outputs(outputs)
    }

    fn run(&self, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError> {
        let reference = ImageReference::classify(required(inputs, IMAGE_PIN)?)?;
        let resolved = self.resolver.resolve(reference)?;

        let mut values = vec![NodeValue::Image(resolved.image)];
        if self.emit_mask {
            values.push(NodeValue::Mask(resolved.mask));
        }
        Ok(NodeOutput::values(values))
    }

    fn changed(&self, inputs: &NodeInputs) -> Result<Option<ChangeKey>, LibraryError> {
        match inputs.get(IMAGE_PIN) {
            Some(value) => self.change_keys.key(value),
            None => Ok(None),
        }
    }

    fn validate(&self, inputs: &NodeInputs) -> Validation {
        match required(inputs, IMAGE_PIN) {
            Ok(value) => self.validator.validate(value),
            Err(e) => Validation::Rejected(e.to_string()),
        }
    }
}
