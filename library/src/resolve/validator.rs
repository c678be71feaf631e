use log::debug;

use crate::folder_paths::InputFolders;
use crate::model::reference::ImageReference;
use crate::model::value::{NodeValue, Validation};

/// Admission check run by the host before any decoding.
///
/// Only bare names are checked for existence. URLs, absolute paths and raw bytes
/// are accepted as-is and fail later, at resolution time, if they are bad.
pub struct InputValidator {
    folders: InputFolders,
}

impl InputValidator {
    pub fn new(folders: InputFolders) -> Self {
        Self { folders }
    }

    pub fn validate(&self, value: &NodeValue) -> Validation {
        let reference = match ImageReference::classify(value) {
            Ok(reference) => reference,
            Err(e) => return Validation::Rejected(e.to_string()),
        };
        match reference {
            ImageReference::RelativeName(name) => {
                if self.folders.exists_annotated_filepath(name) {
                    Validation::Ok
                } else {
                    debug!("Rejecting missing input image '{}'", name);
                    Validation::Rejected(format!("Invalid image file: {}", name))
                }
            }
            ImageReference::RemoteUrl(_)
            | ImageReference::AbsolutePath(_)
            | ImageReference::RawBytes(_) => Validation::Ok,
        }
    }
}
