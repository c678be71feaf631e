//! LoRA reference resolution.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::NodeConfig;
use crate::error::LibraryError;
use crate::model::reference::{ModelPair, ModelReference};

/// Remote metadata service mapping a LoRA id to its base model.
pub trait LoraLookup: Send + Sync {
    fn base_model_for(&self, lora_id: &str) -> Result<String, LibraryError>;
}

#[derive(Debug, Deserialize)]
struct LoraMetadata {
    #[serde(rename = "BaseModel")]
    base_model: String,
}

/// `GET {base_url}/Image2Image/lora?LoRAId={id}`.
pub struct HttpLoraLookup {
    client: Client,
    base_url: String,
}

impl HttpLoraLookup {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LibraryError> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/Image2Image/lora", self.base_url.trim_end_matches('/'))
    }
}

impl LoraLookup for HttpLoraLookup {
    fn base_model_for(&self, lora_id: &str) -> Result<String, LibraryError> {
        let url = self.endpoint();
        info!("Looking up base model for LoRA '{}'", lora_id);
        let response = self
            .client
            .get(&url)
            .query(&[("LoRAId", lora_id)])
            .send()
            .map_err(|e| LibraryError::RemoteFetch(format!("GET {}: {}", url, e)))?;
        let status = response.status();
        if !status.is_success() {
            debug!("LoRA lookup for '{}' returned {}", lora_id, status);
            return Err(LibraryError::InvalidModelIdentifier(lora_id.to_string()));
        }
        let metadata: LoraMetadata = response
            .json()
            .map_err(|e| LibraryError::RemoteFetch(format!("GET {}: {}", url, e)))?;
        Ok(metadata.base_model)
    }
}

pub struct ModelPairResolver {
    base_root: PathBuf,
    lora_root: PathBuf,
    extension: String,
    lookup: Arc<dyn LoraLookup>,
}

impl ModelPairResolver {
    pub fn new(
        base_root: impl Into<PathBuf>,
        lora_root: impl Into<PathBuf>,
        lookup: Arc<dyn LoraLookup>,
    ) -> Self {
        Self {
            base_root: base_root.into(),
            lora_root: lora_root.into(),
            extension: crate::config::DEFAULT_MODEL_EXTENSION.to_string(),
            lookup,
        }
    }

    pub fn from_config(config: &NodeConfig, lookup: Arc<dyn LoraLookup>) -> Self {
        Self {
            base_root: config.base_model_root.clone(),
            lora_root: config.lora_root.clone(),
            extension: config.model_extension.clone(),
            lookup,
        }
    }

    pub fn resolve(&self, reference: ModelReference<'_>) -> Result<ModelPair, LibraryError> {
        let (lora, base) = match reference {
            ModelReference::Composite { lora, base } => (lora.to_string(), base.to_string()),
            ModelReference::Identifier(lora_id) => {
                let base = self.lookup.base_model_for(lora_id)?;
                (lora_id.to_string(), base)
            }
        };
        let pair = ModelPair {
            base: self.normalize(&self.base_root, &base),
            lora: self.normalize(&self.lora_root, &lora),
        };
        debug!(
            "Resolved model pair base={} lora={}",
            pair.base.display(),
            pair.lora.display()
        );
        Ok(pair)
    }

    /// Absolute identifiers pass through; anything else becomes `<root>/<id>.<ext>`.
    fn normalize(&self, root: &Path, identifier: &str) -> PathBuf {
        let path = Path::new(identifier);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(format!("{}.{}", identifier, self.extension))
        }
    }
}
