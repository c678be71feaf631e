//! Byte-level access to image sources.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;

use crate::error::LibraryError;

/// Reads the raw bytes behind a reference. Injected into the resolvers so the
/// network side can be swapped out.
pub trait ContentFetcher: Send + Sync {
    /// Single `GET`; a non-success status is an error.
    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, LibraryError>;

    fn read_local(&self, path: &Path) -> Result<Vec<u8>, LibraryError> {
        Ok(fs::read(path)?)
    }
}

/// Blocking HTTP fetcher. No timeout and no retry; the host owns both.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, LibraryError> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, LibraryError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| LibraryError::RemoteFetch(format!("GET {}: {}", url, e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LibraryError::RemoteFetch(format!(
                "GET {} returned {}",
                url, status
            )));
        }
        let body = response
            .bytes()
            .map_err(|e| LibraryError::RemoteFetch(format!("GET {}: {}", url, e)))?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
