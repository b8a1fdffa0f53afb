use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Failure to obtain the dataset as a whole.
///
/// Individual malformed records never produce this; they are skipped.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch dataset from {url}")]
    Fetch {
        url: Url,
        #[source]
        source: reqwest::Error,
    },
    #[error("dataset request to {url} returned {status}")]
    Status {
        url: Url,
        status: reqwest::StatusCode,
    },
    #[error("dataset is not a JSON array")]
    Decode(#[from] serde_json::Error),
}
