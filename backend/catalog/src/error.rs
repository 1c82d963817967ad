pub use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status} on {path}")]
    Status { status: StatusCode, path: String },

    #[error("Undecodable response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to fetch {0}")]
    Unavailable(String),
}
