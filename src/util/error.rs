//! Error types for the Anima exporter.

use thiserror::Error;

/// Main error type for export operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No exportable object in the current selection
    #[error("No valid object selected")]
    NoSelection,

    /// Object not found by name
    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    /// Transform provider returned nothing for a requested frame
    #[error("No transform for object '{object}' at frame {frame}")]
    MissingTransform { object: String, frame: i32 },

    /// Transform provider returned a matrix that cannot be decomposed
    #[error("Invalid transform for object '{object}' at frame {frame}")]
    InvalidTransform { object: String, frame: i32 },

    /// Compression was asked to work on zero frames
    #[error("Cannot compress an empty sequence")]
    EmptySequence,

    /// Sample or record count does not match the frame range
    #[error("Sequence holds {actual} frames, range needs {expected}")]
    SequenceLength { expected: usize, actual: usize },

    /// Sequence covers other frames than the export settings
    #[error("Sequence covers frames {actual_start}..{actual_end}, settings ask for {expected_start}..{expected_end}")]
    RangeMismatch {
        expected_start: i32,
        expected_end: i32,
        actual_start: i32,
        actual_end: i32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene or config document could not be parsed
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a missing transform error.
    pub fn missing(object: impl Into<String>, frame: i32) -> Self {
        Self::MissingTransform { object: object.into(), frame }
    }

    /// True for errors that mean a collaborator broke its contract,
    /// as opposed to user-facing validation failures.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MissingTransform { .. }
                | Self::InvalidTransform { .. }
                | Self::EmptySequence
                | Self::SequenceLength { .. }
                | Self::RangeMismatch { .. }
        )
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;
