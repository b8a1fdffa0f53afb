//! Dataset loading from disk or HTTP.

use flate2::read::GzDecoder;
use reqwest::Client;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::DatasetError;
use crate::models::RawRecord;

/// Where the dataset comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Remote(Url),
}

impl FromStr for DataSource {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DataSource::Remote(Url::parse(s)?))
        } else {
            Ok(DataSource::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Decoded records plus the number of array entries that were not records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<RawRecord>,
    pub skipped: usize,
}

impl Dataset {
    pub async fn load(source: &DataSource) -> Result<Self, DatasetError> {
        info!("Loading dataset from {}", source);
        let bytes = match source {
            DataSource::File(path) => read_file(path)?,
            DataSource::Remote(url) => fetch(url).await?,
        };
        Self::decode(&bytes)
    }

    /// Decode a JSON array, skipping entries that are not record objects
    pub fn decode(bytes: &[u8]) -> Result<Self, DatasetError> {
        let items: Vec<Value> = serde_json::from_slice(bytes)?;
        let mut dataset = Dataset {
            records: Vec::with_capacity(items.len()),
            skipped: 0,
        };

        for (idx, item) in items.into_iter().enumerate() {
            // Derived structs also accept sequences, so only objects are records
            if !item.is_object() {
                debug!("Dataset entry {} is not an object", idx);
                dataset.skipped += 1;
                continue;
            }
            match serde_json::from_value::<RawRecord>(item) {
                Ok(record) => dataset.records.push(record),
                Err(e) => {
                    debug!("Dataset entry {} is not a record: {}", idx, e);
                    dataset.skipped += 1;
                }
            }
        }

        if dataset.skipped > 0 {
            warn!("Skipped {} malformed dataset entries", dataset.skipped);
        }
        info!("Loaded {} records", dataset.records.len());

        Ok(dataset)
    }
}

/// Read a file, gunzipping it when it ends in `.gz`
fn read_file(path: &Path) -> Result<Vec<u8>, DatasetError> {
    let read_err = |source| DatasetError::Read {
        path: path.to_path_buf(),
        source,
    };

    let raw = fs::read(path).map_err(read_err)?;
    if path.extension().map_or(false, |e| e == "gz") {
        let mut out = Vec::new();
        GzDecoder::new(raw.as_slice())
            .read_to_end(&mut out)
            .map_err(read_err)?;
        Ok(out)
    } else {
        Ok(raw)
    }
}

async fn fetch(url: &Url) -> Result<Vec<u8>, DatasetError> {
    let fetch_err = |source| DatasetError::Fetch {
        url: url.clone(),
        source,
    };

    let client = Client::builder()
        .user_agent("archmap/0.1")
        .timeout(Duration::from_secs(60))
        .build()
        .map_err(fetch_err)?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(fetch_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(DatasetError::Status {
            url: url.clone(),
            status,
        });
    }

    let body = response.bytes().await.map_err(fetch_err)?;
    Ok(body.to_vec())
}
