//! Node pack configuration.
//!
//! Loaded once at startup and threaded into the nodes that need it. Nothing in
//! the resolvers reads the environment at call time.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

/// Environment variable overriding [`NodeConfig::lora_service_url`].
pub const LORA_SERVICE_URL_ENV: &str = "LORA_SERVICE_URL";

pub const DEFAULT_LORA_SERVICE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_BASE_MODEL_ROOT: &str = "/models/base_models";
pub const DEFAULT_LORA_ROOT: &str = "/models/lora";
pub const DEFAULT_MODEL_EXTENSION: &str = "safetensors";

const CONFIG_FILE_NAME: &str = "node_pack.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Upload directory that bare image names resolve against.
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub temp_dir: PathBuf,
    /// Root for relative base-model identifiers. Must be absolute.
    pub base_model_root: PathBuf,
    /// Root for relative LoRA identifiers. Must be absolute.
    pub lora_root: PathBuf,
    pub model_extension: String,
    pub lora_service_url: String,
    /// Emit the MASK output from `InputImage` in addition to IMAGE.
    pub emit_mask: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            temp_dir: PathBuf::from("temp"),
            base_model_root: PathBuf::from(DEFAULT_BASE_MODEL_ROOT),
            lora_root: PathBuf::from(DEFAULT_LORA_ROOT),
            model_extension: DEFAULT_MODEL_EXTENSION.to_string(),
            lora_service_url: DEFAULT_LORA_SERVICE_URL.to_string(),
            emit_mask: true,
        }
    }
}

impl NodeConfig {
    /// Parse a TOML config file. Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let toml_str = fs::read_to_string(path)?;
        let config: NodeConfig = toml::from_str(&toml_str)
            .map_err(|e| LibraryError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        info!("Loaded node config from {}", path.display());
        Ok(config)
    }

    /// Load `node_pack.toml` from the platform config directory, or defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config file, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(LORA_SERVICE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.lora_service_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), LibraryError> {
        for (key, root) in [
            ("base_model_root", &self.base_model_root),
            ("lora_root", &self.lora_root),
        ] {
            if !root.is_absolute() {
                return Err(LibraryError::Config(format!(
                    "{} must be an absolute path, got {}",
                    key,
                    root.display()
                )));
            }
        }
        if self.model_extension.is_empty() {
            return Err(LibraryError::Config("model_extension must not be empty".to_string()));
        }
        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "node_pack", "node_pack")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
