use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),
    #[error("Remote fetch failed: {0}")]
    RemoteFetch(String),
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Invalid LoRA reference: {0}")]
    InvalidModelIdentifier(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Unknown node: {0}")]
    UnknownNode(String),
}

impl From<image::ImageError> for LibraryError {
    fn from(err: image::ImageError) -> Self {
        LibraryError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for LibraryError {
    fn from(err: reqwest::Error) -> Self {
        LibraryError::RemoteFetch(err.to_string())
    }
}
