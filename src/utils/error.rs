// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 500 Internal Server Error

    #[error("Request refused by upstream (403 Forbidden): {0}")]
    Forbidden(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Expected absence: the container, column or input region is missing.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// The payload is present but is not the JSON the page used to carry.
    #[error("Malformed embedded payload in '{container}': {source}")]
    MalformedPayload {
        container: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ExtractError {
    /// Absence errors leave the category empty; everything else aborts the run.
    pub fn is_absence(&self) -> bool {
        matches!(self, ExtractError::SectionNotFound(_))
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Fetching the page failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_classification() {
        let absent = ExtractError::SectionNotFound("no container".to_string());
        assert!(absent.is_absence());

        let source = serde_json::from_str::<serde_json::Value>("[{").unwrap_err();
        let malformed = ExtractError::MalformedPayload { container: "x".to_string(), source };
        assert!(!malformed.is_absence());
        assert!(malformed.to_string().contains("'x'"));
    }

    #[test]
    fn test_app_error_wraps_extraction() {
        let err: AppError = ExtractError::SectionNotFound("gone".to_string()).into();
        assert_eq!(err.to_string(), "Extraction failed: Section not found: gone");
    }
}
