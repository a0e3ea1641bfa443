//! Error types for the DataLens library.

use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a failure, used by callers to pick a response
/// without matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied something unusable (missing file, wrong
    /// extension, unparseable or empty data).
    InvalidInput,
    /// The external narrative generator could not produce text.
    NarrativeUnavailable,
    /// Anything else that went wrong while profiling.
    Internal,
}

/// Failure reported by a narrative generator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NarrativeError {
    /// The service could not be reached or the request timed out.
    #[error("network error: {0}")]
    Network(String),

    /// The credential was missing or rejected.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The service refused the request because of rate or quota limits.
    #[error("quota exceeded: {0}")]
    Quota(String),

    /// Any other non-success response.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The service answered but the body held no usable text.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The generator could not be set up.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Main error type for DataLens operations.
#[derive(Debug, Error)]
pub enum DatalensError {
    /// Error reading a file from disk.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No file was supplied.
    #[error("No file uploaded")]
    MissingFile,

    /// A file was supplied without a name.
    #[error("No file selected")]
    EmptyFilename,

    /// The file name does not carry an accepted extension.
    #[error("Only CSV files are allowed")]
    UnsupportedFormat(String),

    /// Zero bytes, or no data rows after parsing.
    #[error("Uploaded CSV file is empty")]
    EmptyData,

    /// A row could not be mapped onto the header.
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The bytes could not be decoded with the configured encoding.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Narrative generation failed.
    #[error("Narrative generation failed: {0}")]
    Narrative(#[from] NarrativeError),

    /// The analysis worker stopped before producing a result, for example
    /// a blocking task in the server that panicked or was cancelled.
    #[error("{0}")]
    Internal(String),
}

impl DatalensError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatalensError::Io { .. }
            | DatalensError::MissingFile
            | DatalensError::EmptyFilename
            | DatalensError::UnsupportedFormat(_)
            | DatalensError::EmptyData
            | DatalensError::Parse { .. }
            | DatalensError::Csv(_)
            | DatalensError::Encoding(_) => ErrorKind::InvalidInput,
            DatalensError::Narrative(_) => ErrorKind::NarrativeUnavailable,
            DatalensError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Returns true if the caller is at fault.
    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}

/// Result type alias for DataLens operations.
pub type Result<T> = std::result::Result<T, DatalensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_upload_contract() {
        assert_eq!(DatalensError::MissingFile.to_string(), "No file uploaded");
        assert_eq!(DatalensError::EmptyFilename.to_string(), "No file selected");
        assert_eq!(
            DatalensError::UnsupportedFormat("txt".into()).to_string(),
            "Only CSV files are allowed"
        );
        assert_eq!(DatalensError::EmptyData.to_string(), "Uploaded CSV file is empty");
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(DatalensError::EmptyData.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            DatalensError::Parse { row: 2, message: "bad".into() }.kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            DatalensError::from(NarrativeError::Auth("denied".into())).kind(),
            ErrorKind::NarrativeUnavailable
        );
        assert_eq!(DatalensError::Internal("boom".into()).kind(), ErrorKind::Internal);
    }
}
