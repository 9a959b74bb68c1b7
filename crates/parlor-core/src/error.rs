//! Error types for the Parlor application.

use thiserror::Error;

/// A shared error type for the entire Parlor application.
///
/// Variants map onto the three outcomes a caller has to tell apart:
/// client errors (`Validation`, `NotFound`), upstream failures (`Upstream`)
/// and everything else, which a request boundary reports as a server error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParlorError {
    /// Rejected input (empty or oversized message, missing identifier, ...)
    #[error("{0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The external chat API failed or answered with a non-success status
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ParlorError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Upstream error for a non-success HTTP status.
    pub fn upstream_status(status: u16, body: impl AsRef<str>) -> Self {
        Self::Upstream {
            status: Some(status),
            message: format!("API responded with status {}: {}", status, body.as_ref()),
        }
    }

    /// Creates an Upstream error for a transport-level failure.
    pub fn upstream_transport(message: impl Into<String>) -> Self {
        Self::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an Upstream error
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Whether a request boundary should report this as a client error (4xx).
    ///
    /// Everything that is not a validation or lookup failure is a server
    /// error, including upstream failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }

    /// HTTP-style status code a request boundary would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            _ => 500,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ParlorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ParlorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ParlorError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ParlorError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ParlorError>`.
pub type Result<T> = std::result::Result<T, ParlorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_message_folds_body() {
        let err = ParlorError::upstream_status(502, "bad gateway");
        assert_eq!(err.to_string(), "API responded with status 502: bad gateway");
        assert!(err.is_upstream());
        assert!(!err.is_client_error());
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ParlorError::validation("nope").is_client_error());
        assert!(ParlorError::not_found("conversation", "c1").is_client_error());
        assert_eq!(ParlorError::not_found("project", "p1").status_code(), 404);
        assert!(!ParlorError::io("disk full").is_client_error());
    }

    #[test]
    fn test_not_found_display() {
        let err = ParlorError::not_found("memory", "m-1");
        assert_eq!(err.to_string(), "Entity not found: memory 'm-1'");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ParlorError = parse_err.into();
        assert!(err.is_serialization());
    }
}
