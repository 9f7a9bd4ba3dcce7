//! HTTP client for the dataset service.
//!
//! The service owns dataset storage, `.xlsx` parsing, and the
//! precomputed aggregate statistics (per-channel mean and max plus a
//! peak count). This client only moves data: list datasets, fetch one
//! dataset with its full series, and create/update datasets via
//! multipart upload. The per-channel minimum is deliberately absent
//! from the service payload and is computed client-side
//! (see [`crate::stats::channel_minima`]).

use std::collections::HashMap;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use thiserror::Error;

use crate::series::{ChannelKey, RawSample};

/// Default base URL for the dataset service
const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// User agent for API requests
const USER_AGENT: &str = concat!("MyoView/", env!("CARGO_PKG_VERSION"));

/// MIME type of the only accepted upload format
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Base URL for the service, overridable via `MYOVIEW_API_URL`
pub fn api_base() -> String {
    std::env::var("MYOVIEW_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string())
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when talking to the dataset service
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error during request
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Service returned an error response
    #[error("API error (status {status}): {message}")]
    ApiResponseError { status: u16, message: String },

    /// Failed to parse a service response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to read the upload file
    #[error("File error: {0}")]
    FileError(String),
}

fn map_transport_error(error: ureq::Error) -> ApiError {
    match error {
        ureq::Error::StatusCode(status) => ApiError::ApiResponseError {
            status,
            message: format!("HTTP {}", status),
        },
        _ => ApiError::NetworkError(error.to_string()),
    }
}

// ============================================================================
// API Response Types
// ============================================================================

/// One dataset in the list view
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatasetSummary {
    pub id: i64,
    pub name: String,
}

/// Precomputed aggregates delivered by the service. Keyed by wire
/// channel name ("emg1".."emg4", "angle"); missing keys render blank.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Stats {
    #[serde(default)]
    pub mean: HashMap<String, f64>,
    #[serde(default)]
    pub max: HashMap<String, f64>,
    #[serde(default)]
    pub peaks: u64,
}

impl Stats {
    /// Service-computed mean for a channel, if present
    pub fn mean_for(&self, key: ChannelKey) -> Option<f64> {
        self.mean.get(key.as_ref()).copied()
    }

    /// Service-computed max for a channel, if present
    pub fn max_for(&self, key: ChannelKey) -> Option<f64> {
        self.max.get(key.as_ref()).copied()
    }
}

/// Full dataset payload: identity, aggregates, and the raw series
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub series: Vec<RawSample>,
}

/// The list endpoint returns either a bare array or a wrapper object,
/// depending on the service version
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetListEnvelope {
    Bare(Vec<DatasetSummary>),
    Wrapped { datasets: Vec<DatasetSummary> },
}

/// Response from dataset creation
#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: i64,
}

// ============================================================================
// API Client Functions
// ============================================================================

/// Fetch the list of all datasets (summaries only)
pub fn fetch_dataset_list() -> Result<Vec<DatasetSummary>, ApiError> {
    let url = format!("{}/api/datasets", api_base());

    let mut response = ureq::get(&url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(map_transport_error)?;

    let envelope: DatasetListEnvelope = response
        .body_mut()
        .read_json()
        .map_err(|e| ApiError::ParseError(e.to_string()))?;

    Ok(match envelope {
        DatasetListEnvelope::Bare(datasets) => datasets,
        DatasetListEnvelope::Wrapped { datasets } => datasets,
    })
}

/// Fetch a single dataset with stats and the full sample series
pub fn fetch_dataset(id: i64) -> Result<DatasetDetail, ApiError> {
    let url = format!("{}/api/dataset/{}", api_base(), id);

    let mut response = ureq::get(&url)
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(map_transport_error)?;

    response
        .body_mut()
        .read_json()
        .map_err(|e| ApiError::ParseError(e.to_string()))
}

/// Create a dataset from an `.xlsx` file. Returns the new dataset id.
pub fn create_dataset(name: &str, file_path: &Path) -> Result<i64, ApiError> {
    let url = format!("{}/api/dataset", api_base());
    let (boundary, body) = multipart_form(name, Some(file_path))?;

    let mut response = ureq::post(&url)
        .header("User-Agent", USER_AGENT)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .send(&body[..])
        .map_err(map_transport_error)?;

    let created: CreateResponse = response
        .body_mut()
        .read_json()
        .map_err(|e| ApiError::ParseError(e.to_string()))?;

    Ok(created.id)
}

/// Update a dataset's name and, optionally, replace its source file
pub fn update_dataset(id: i64, name: &str, file_path: Option<&Path>) -> Result<(), ApiError> {
    let url = format!("{}/api/dataset/{}", api_base(), id);
    let (boundary, body) = multipart_form(name, file_path)?;

    ureq::put(&url)
        .header("User-Agent", USER_AGENT)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .send(&body[..])
        .map_err(map_transport_error)?;

    Ok(())
}

// ============================================================================
// Multipart Encoding
// ============================================================================

/// Strip double quotes and ASCII control characters (CR/LF included),
/// which would corrupt a part header line or the body framing
fn sanitize_part_token(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '"' && !c.is_control())
        .collect()
}

/// Encode the upload form (`dataset_name` + optional `file` part).
/// Returns the boundary and the encoded body.
fn multipart_form(name: &str, file_path: Option<&Path>) -> Result<(String, Vec<u8>), ApiError> {
    // Nanosecond timestamp keeps the boundary out of the payload
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let boundary = format!("----myoview-{:x}", nanos);

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"dataset_name\"\r\n\r\n",
    );
    body.extend_from_slice(sanitize_part_token(name).as_bytes());
    body.extend_from_slice(b"\r\n");

    if let Some(path) = file_path {
        let contents = std::fs::read(path).map_err(|e| {
            ApiError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let filename = path
            .file_name()
            .map(|n| sanitize_part_token(&n.to_string_lossy()))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "upload.xlsx".to_string());

        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", XLSX_MIME).as_bytes());
        body.extend_from_slice(&contents);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    Ok((boundary, body))
}
