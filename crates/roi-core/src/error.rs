//! Error types for the ROI First workspace.

use thiserror::Error;

/// A shared error type for every ROI First crate.
///
/// Every variant is recoverable: a failed action leaves previously committed
/// conversation state untouched and may simply be attempted again.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoiError {
    /// Required session context is absent; the caller must go back to selection.
    #[error("Session data missing: {field}")]
    PreconditionMissing { field: &'static str },

    /// Transport, HTTP or parse failure on the agent turn endpoint.
    #[error("Agent call failed{}: {message}", status_suffix(.status_code))]
    AgentCallFailed {
        status_code: Option<u16>,
        message: String,
    },

    /// Missing collected data, transport failure, or remote-reported failure.
    #[error("Calculation failed: {0}")]
    CalculationFailed(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// User-supplied value rejected by validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session store failure
    #[error("Session store error: {0}")]
    Store(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RoiError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a PreconditionMissing error for the named session field
    pub fn precondition_missing(field: &'static str) -> Self {
        Self::PreconditionMissing { field }
    }

    /// Creates an AgentCallFailed error
    pub fn agent_call_failed(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::AgentCallFailed {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a CalculationFailed error
    pub fn calculation_failed(message: impl Into<String>) -> Self {
        Self::CalculationFailed(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a PreconditionMissing error
    pub fn is_precondition_missing(&self) -> bool {
        matches!(self, Self::PreconditionMissing { .. })
    }

    /// Check if this is an AgentCallFailed error
    pub fn is_agent_call_failed(&self) -> bool {
        matches!(self, Self::AgentCallFailed { .. })
    }

    /// Check if this is a CalculationFailed error
    pub fn is_calculation_failed(&self) -> bool {
        matches!(self, Self::CalculationFailed(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for RoiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for RoiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RoiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

fn status_suffix(status_code: &Option<u16>) -> String {
    status_code
        .map(|code| format!(" (HTTP {code})"))
        .unwrap_or_default()
}

/// A type alias for `Result<T, RoiError>`.
pub type Result<T> = std::result::Result<T, RoiError>;
