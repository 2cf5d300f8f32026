//! Error types for the vault agent MCP server.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the vault file-access layer.
///
/// Display strings are intentionally path-free: tool responses travel to
/// remote clients and must not leak absolute filesystem locations.
#[derive(thiserror::Error, Debug)]
pub enum VaultError {
    /// Path does not exist inside the vault
    #[error("path not found")]
    NotFound,

    /// Listing target is a file
    #[error("path is not a directory")]
    NotADirectory,

    /// Read/write target is a directory
    #[error("path is a directory")]
    IsADirectory,

    /// Absolute paths never resolve inside the vault
    #[error("absolute paths are not allowed")]
    AbsolutePath,

    /// `..` components would escape the vault root
    #[error("path traversal is not allowed")]
    PathTraversal,

    /// Components starting with the hidden-file marker are off limits
    #[error("hidden paths are not allowed")]
    HiddenPath,

    /// Read/write is restricted to the note format
    #[error("only .md files are allowed")]
    NotMarkdown,

    /// Glob pattern failed to parse
    #[error("invalid glob pattern: {0}")]
    InvalidPattern(String),

    /// Any other I/O failure, with the underlying cause kept off the wire
    #[error("vault I/O failed")]
    Io(#[source] std::io::Error),
}

impl VaultError {
    /// Map an I/O error to the matching vault error.
    #[must_use]
    pub fn from_io(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound,
            std::io::ErrorKind::NotADirectory => Self::NotADirectory,
            std::io::ErrorKind::IsADirectory => Self::IsADirectory,
            _ => Self::Io(err),
        }
    }
}

/// Errors from MCP tool execution.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Error from the vault layer
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Input validation failed
    #[error("Invalid input for '{field}': {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal tool logic error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Convert to a user-facing message for the MCP response.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        match self {
            Self::Vault(e) => e.to_string(),
            Self::Serialization(e) => format!("Invalid tool input: {e}"),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
