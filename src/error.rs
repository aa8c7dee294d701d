//! Error types for infohash.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (3=record, 4=fingerprint, 5=schema, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! A comparison that finds changed fields is not an error. Only
//! [`crate::verify`] turns a change into [`Error::FieldChanged`].

use thiserror::Error;

/// Result type alias for infohash operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Record (exit 3)
    InvalidRecordShape,

    // Fingerprint (exit 4)
    MalformedFingerprint,
    InvalidHex,

    // Schema (exit 5)
    SchemaMismatch,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Change detected (exit 10)
    FieldChanged,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::InvalidRecordShape => "INVALID_RECORD_SHAPE",
            Self::MalformedFingerprint => "MALFORMED_FINGERPRINT",
            Self::InvalidHex => "INVALID_HEX",
            Self::SchemaMismatch => "SCHEMA_MISMATCH",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::FieldChanged => "FIELD_CHANGED",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidRecordShape => 3,
            Self::MalformedFingerprint | Self::InvalidHex => 4,
            Self::SchemaMismatch => 5,
            Self::IoError | Self::JsonError => 8,
            Self::FieldChanged => 10,
        }
    }

    /// Whether a caller should retry with corrected input.
    ///
    /// Everything here is deterministic, so only input errors qualify.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecordShape | Self::MalformedFingerprint | Self::InvalidHex
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur while hashing or comparing records.
#[derive(Error, Debug)]
pub enum Error {
    /// The field list violates the extractor contract.
    #[error("Invalid record shape: {0}")]
    InvalidRecordShape(String),

    #[error("Malformed fingerprint: {len} bytes is not 8 + 4k")]
    MalformedFingerprint { len: usize },

    #[error("Invalid fingerprint hex: {0}")]
    InvalidHex(String),

    #[error("Schema mismatch: expected {expected}, got {actual}")]
    SchemaMismatch { expected: String, actual: String },

    /// `None` when more than one field changed.
    #[error("{}", field_changed_message(field.as_deref()))]
    FieldChanged { field: Option<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn field_changed_message(field: Option<&str>) -> String {
    match field {
        Some(name) => format!("The field {name:?}'s value changed"),
        None => "A field value changed".to_string(),
    }
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidRecordShape(_) => ErrorCode::InvalidRecordShape,
            Self::MalformedFingerprint { .. } => ErrorCode::MalformedFingerprint,
            Self::InvalidHex(_) => ErrorCode::InvalidHex,
            Self::SchemaMismatch { .. } => ErrorCode::SchemaMismatch,
            Self::FieldChanged { .. } => ErrorCode::FieldChanged,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::InvalidRecordShape(msg) if msg.contains("more than once") => Some(
                "Every field identifier must be unique within a record.".to_string(),
            ),
            Self::InvalidRecordShape(msg) if msg.contains("object") => Some(
                "Records are JSON objects; each top-level key is one field.".to_string(),
            ),
            Self::MalformedFingerprint { .. } | Self::InvalidHex(_) => Some(
                "Pass the fingerprint exactly as printed by `infohash hash`.".to_string(),
            ),
            Self::SchemaMismatch { .. } => Some(
                "The field list changed. Fingerprints stored under the old schema \
                 cannot localize changes and must be recomputed."
                    .to_string(),
            ),
            Self::InvalidRecordShape(_)
            | Self::FieldChanged { .. }
            | Self::Io(_)
            | Self::Json(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Self::FieldChanged { field } = self {
            obj["error"]["field"] = serde_json::json!(field);
        }
        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_changed_messages() {
        let named = Error::FieldChanged {
            field: Some("Field4".into()),
        };
        assert_eq!(named.to_string(), "The field \"Field4\"'s value changed");

        let unknown = Error::FieldChanged { field: None };
        assert_eq!(unknown.to_string(), "A field value changed");
    }

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::InvalidRecordShape("x".into()).exit_code(), 3);
        assert_eq!(Error::MalformedFingerprint { len: 3 }.exit_code(), 4);
        assert_eq!(Error::FieldChanged { field: None }.exit_code(), 10);
    }

    #[test]
    fn test_structured_json() {
        let err = Error::FieldChanged {
            field: Some("name".into()),
        };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "FIELD_CHANGED");
        assert_eq!(json["error"]["field"], "name");
        assert_eq!(json["error"]["retryable"], false);

        let err = Error::MalformedFingerprint { len: 9 };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["exit_code"], 4);
        assert!(json["error"]["hint"].is_string());
    }
}
