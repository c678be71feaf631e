//! Classification of loosely-typed references into tagged variants.
//!
//! This is the only place that inspects the raw shape of a value; everything
//! downstream matches on the variants.

use std::path::{Path, PathBuf};

use crate::error::LibraryError;
use crate::model::value::NodeValue;

/// Separator between the LoRA and base parts of an inline model reference.
pub const MODEL_SEPARATOR: char = '@';

/// Where the bytes of an image come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageReference<'a> {
    /// Name under the annotated-inputs convention.
    RelativeName(&'a str),
    AbsolutePath(&'a Path),
    RemoteUrl(&'a str),
    RawBytes(&'a [u8]),
}

impl<'a> ImageReference<'a> {
    pub fn classify(value: &'a NodeValue) -> Result<Self, LibraryError> {
        match value {
            NodeValue::Bytes(bytes) => Ok(ImageReference::RawBytes(bytes)),
            NodeValue::String(text) => Ok(Self::from_text(text)),
            other => Err(LibraryError::UnsupportedSource(format!(
                "image reference of type {}",
                other.type_name()
            ))),
        }
    }

    pub fn from_text(text: &'a str) -> Self {
        if text.starts_with("http://") || text.starts_with("https://") {
            ImageReference::RemoteUrl(text)
        } else if Path::new(text).is_absolute() {
            ImageReference::AbsolutePath(Path::new(text))
        } else {
            ImageReference::RelativeName(text)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ImageReference::RelativeName(_) => "relative",
            ImageReference::AbsolutePath(_) => "absolute",
            ImageReference::RemoteUrl(_) => "url",
            ImageReference::RawBytes(_) => "bytes",
        }
    }
}

/// A LoRA reference as typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelReference<'a> {
    /// `lora@base`, both parts used directly.
    Composite { lora: &'a str, base: &'a str },
    /// A LoRA id whose base model is looked up remotely.
    Identifier(&'a str),
}

impl<'a> ModelReference<'a> {
    pub fn classify(text: &'a str) -> Result<Self, LibraryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LibraryError::InvalidModelIdentifier(
                "empty LoRA reference".to_string(),
            ));
        }
        match text.split_once(MODEL_SEPARATOR) {
            Some((lora, base)) => {
                if lora.is_empty() || base.is_empty() {
                    return Err(LibraryError::InvalidModelIdentifier(text.to_string()));
                }
                Ok(ModelReference::Composite { lora, base })
            }
            None => Ok(ModelReference::Identifier(text)),
        }
    }
}

/// Canonical base/LoRA model locations. Both paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPair {
    pub base: PathBuf,
    pub lora: PathBuf,
}
