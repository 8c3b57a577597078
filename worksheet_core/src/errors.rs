//! # Error Types
//!
//! Structured error types for worksheet_core. Every failure in generation or
//! rendering surfaces as one of these variants; there is no partial-success
//! mode, so a page either renders completely or the whole request fails.
//!
//! ## Example
//!
//! ```rust
//! use worksheet_core::errors::{SheetError, SheetResult};
//!
//! fn check_columns(columns: u32) -> SheetResult<()> {
//!     if !(1..=3).contains(&columns) {
//!         return Err(SheetError::invalid_input(
//!             "list_columns",
//!             columns.to_string(),
//!             "Must be between 1 and 3",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for worksheet_core operations
pub type SheetResult<T> = Result<T, SheetError>;

/// Structured error type for generation and rendering.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SheetError {
    /// A request value is out of range
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A difficulty configuration failed validation for its operator
    #[error("Invalid difficulty for {operator}: {reason}")]
    InvalidConfig { operator: String, reason: String },

    /// Operator name not in the recognized set
    #[error("Unsupported operation: '{name}' (expected addition, subtraction, multiplication or division)")]
    UnsupportedOperator { name: String },

    /// A malformed problem record reached the layout engine
    #[error("Render contract violated at slot {slot}: {reason}")]
    RenderContract { slot: usize, reason: String },

    /// Typst compilation or PDF export failed
    #[error("Rendering failed during {stage}: {reason}")]
    RenderFailed { stage: String, reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Request file schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SheetError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SheetError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(operator: impl Into<String>, reason: impl Into<String>) -> Self {
        SheetError::InvalidConfig {
            operator: operator.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedOperator error
    pub fn unsupported_operator(name: impl Into<String>) -> Self {
        SheetError::UnsupportedOperator { name: name.into() }
    }

    /// Create a RenderContract error
    pub fn render_contract(slot: usize, reason: impl Into<String>) -> Self {
        SheetError::RenderContract {
            slot,
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        SheetError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SheetError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a VersionMismatch error
    pub fn version_mismatch(file_version: impl Into<String>, expected_version: impl Into<String>) -> Self {
        SheetError::VersionMismatch {
            file_version: file_version.into(),
            expected_version: expected_version.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        SheetError::Internal { message: message.into() }
    }

    /// True for errors caused by the caller's input rather than the engine
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SheetError::InvalidInput { .. }
                | SheetError::InvalidConfig { .. }
                | SheetError::UnsupportedOperator { .. }
                | SheetError::VersionMismatch { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SheetError::InvalidInput { .. } => "INVALID_INPUT",
            SheetError::InvalidConfig { .. } => "INVALID_CONFIG",
            SheetError::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
            SheetError::RenderContract { .. } => "RENDER_CONTRACT",
            SheetError::RenderFailed { .. } => "RENDER_FAILED",
            SheetError::FileError { .. } => "FILE_ERROR",
            SheetError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SheetError::VersionMismatch { .. } => "VERSION_MISMATCH",
            SheetError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
