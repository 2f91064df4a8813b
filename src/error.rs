/// Errors reported by snapshot operations
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SnapshotError {
    #[error("Snapshot not found")]
    NotFound,
    #[error("Invalid snapshot index")]
    InvalidIndex,
    #[error("Browser API call failed: {0}")]
    Host(String),
    #[error("Failed to serialize snapshots: {0}")]
    Serialization(String),
    #[error("Invalid snapshot file: {0}")]
    InvalidImport(String),
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Serialization(e.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for SnapshotError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        SnapshotError::Serialization(e.to_string())
    }
}
