//! Change keys: what the host compares between runs to decide whether a node
//! needs to execute again.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use sha2::{Digest, Sha256};

use crate::error::LibraryError;
use crate::folder_paths::InputFolders;
use crate::model::reference::ImageReference;
use crate::model::value::{ChangeKey, NodeValue};

static FRESH_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Computes keys from the raw reference. Does its own file read, independent of
/// any read done by the resolver.
pub struct ChangeKeyProvider {
    folders: InputFolders,
}

impl ChangeKeyProvider {
    pub fn new(folders: InputFolders) -> Self {
        Self { folders }
    }

    /// `None` when the value cannot be classified; the host then skips
    /// identity-based caching for this call.
    pub fn key(&self, value: &NodeValue) -> Result<Option<ChangeKey>, LibraryError> {
        let Ok(reference) = ImageReference::classify(value) else {
            return Ok(None);
        };
        let key = match reference {
            // Identity by reference only: new content at the same URL is not detected.
            ImageReference::RemoteUrl(url) => ChangeKey::new(url),
            ImageReference::RawBytes(bytes) => digest(bytes),
            ImageReference::AbsolutePath(path) => digest(&std::fs::read(path)?),
            ImageReference::RelativeName(name) => {
                digest(&std::fs::read(self.folders.annotated_filepath(name))?)
            }
        };
        debug!("Change key for {} reference: {}", reference.kind(), key);
        Ok(Some(key))
    }
}

/// Hex-encoded SHA-256 of `bytes`.
pub fn digest(bytes: &[u8]) -> ChangeKey {
    ChangeKey::new(format!("{:x}", Sha256::digest(bytes)))
}

/// A key that never equals any previously returned one.
pub fn fresh() -> ChangeKey {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = FRESH_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ChangeKey::new(format!("{}-{}", nanos, seq))
}
