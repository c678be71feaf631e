//! Preview sink: encodes each image in the batch as a base64 JPEG for the UI.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;

use super::define_node_plugin;
use crate::error::LibraryError;
use crate::model::value::{ChangeKey, NodeInputs, NodeOutput, UiImage, UiPayload, required};
use crate::plugin::{
    NodeCategory, NodePlugin, NodeTypeDefinition, PinDataType, PinDefinition, Plugin,
};
use crate::resolve::change_key;

pub const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

const IMAGES_PIN: &str = "images";

pub struct OutputImage {
    quality: u8,
}

define_node_plugin!(
    OutputImage,
    id: "OutputImage",
    name: "Output Image",
    category: NodeCategory::Output,
    version: (0, 1, 0)
);

impl OutputImage {
    pub fn new() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl Default for OutputImage {
    fn default() -> Self {
        Self::new()
    }
}

impl NodePlugin for OutputImage {
    fn definition(&self) -> NodeTypeDefinition {
        NodeTypeDefinition::new(self.id(), &self.name(), self.category())
            .with_inputs(vec![PinDefinition::input(
                IMAGES_PIN,
                "Images",
                PinDataType::Image,
            )])
    }

    fn run(&self, inputs: &NodeInputs) -> Result<NodeOutput, LibraryError> {
        let value = required(inputs, IMAGES_PIN)?;
        let images = value.as_image().ok_or_else(|| {
            LibraryError::InvalidInput(format!(
                "'{}' expects IMAGE, got {}",
                IMAGES_PIN,
                value.type_name()
            ))
        })?;

        let (width, height) = (images.width() as u32, images.height() as u32);
        let mut results = Vec::with_capacity(images.batch());
        for frame in images.frames() {
            let jpeg = encode_jpeg(frame, width, height, self.quality)?;
            results.push(UiImage {
                base64: BASE64.encode(jpeg),
                prefix: JPEG_DATA_URI_PREFIX.to_string(),
            });
        }
        Ok(NodeOutput::ui(UiPayload { images: results }))
    }

    /// Output nodes run on every graph execution.
    fn changed(&self, _inputs: &NodeInputs) -> Result<Option<ChangeKey>, LibraryError> {
        Ok(Some(change_key::fresh()))
    }
}

fn encode_jpeg(
    frame: &[f32],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, LibraryError> {
    let pixels: Vec<u8> = frame
        .iter()
        .map(|v| (v * 255.0).clamp(0.0, 255.0) as u8)
        .collect();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(&pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| LibraryError::Encode(e.to_string()))?;
    Ok(buf)
}
