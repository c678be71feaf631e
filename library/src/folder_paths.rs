//! Annotated-filename convention for host-managed folders.
//!
//! A bare name such as `cat.png` resolves inside the input directory. A trailing
//! annotation selects another folder: `cat.png [output]`, `cat.png [temp]`,
//! `cat.png [input]`.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::config::NodeConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFolders {
    input: PathBuf,
    output: PathBuf,
    temp: PathBuf,
}

impl InputFolders {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        temp: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            temp: temp.into(),
        }
    }

    pub fn from_config(config: &NodeConfig) -> Self {
        Self::new(&config.input_dir, &config.output_dir, &config.temp_dir)
    }

    pub fn input_dir(&self) -> &Path {
        &self.input
    }

    /// Resolve an annotated name to a path. Unannotated names land in the input folder.
    pub fn annotated_filepath(&self, name: &str) -> PathBuf {
        let (name, base) = if let Some(stripped) = name.strip_suffix(" [output]") {
            (stripped, &self.output)
        } else if let Some(stripped) = name.strip_suffix(" [input]") {
            (stripped, &self.input)
        } else if let Some(stripped) = name.strip_suffix(" [temp]") {
            (stripped, &self.temp)
        } else {
            (name, &self.input)
        };
        base.join(name)
    }

    pub fn exists_annotated_filepath(&self, name: &str) -> bool {
        self.annotated_filepath(name).exists()
    }

    /// Sorted names of the regular files directly inside the input folder.
    pub fn list_input_files(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.input) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list input directory {}: {}", self.input.display(), e);
                return Vec::new();
            }
        };
        let mut files: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        files.sort();
        files
    }
}
