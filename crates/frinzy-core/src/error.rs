//! Error types for the Frinzy core.

use thiserror::Error;

/// A shared error type for the entire Frinzy pipeline.
///
/// Variants map onto how the caller is expected to react:
/// - `Validation`: the user must correct their input, never fatal
/// - `NotFound`: the referenced profile/match does not exist
/// - `TransientStore`: the record store failed, input is preserved for resubmission
/// - `OracleUnavailable`: only ever seen inside the suggestion layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrinzyError {
    /// Input rejected before touching any store
    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Record store failure (network, lock, unavailable backend)
    #[error("Transient store error: {0}")]
    TransientStore(String),

    /// Suggestion oracle absent or failing
    #[error("Suggestion oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// An identity tried to act on something it does not own
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FrinzyError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error for a field that is absent.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: "required field is missing".to_string(),
        }
    }

    /// Creates a Validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a TransientStore error
    pub fn transient(message: impl Into<String>) -> Self {
        Self::TransientStore(message.into())
    }

    /// Creates a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an OracleUnavailable error
    pub fn oracle_unavailable(message: impl Into<String>) -> Self {
        Self::OracleUnavailable(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a TransientStore error
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::TransientStore(_))
    }

    /// Check if this is a Forbidden error
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Whether the operation may succeed if submitted again unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientStore(_) | Self::Io { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FrinzyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FrinzyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FrinzyError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for FrinzyError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, FrinzyError>`.
pub type Result<T> = std::result::Result<T, FrinzyError>;
