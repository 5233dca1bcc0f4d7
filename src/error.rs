//! Error handling for the system presence crate.

/// A specialized `Result` type for system presence operations.
pub type Result<T> = std::result::Result<T, SystemError>;

/// The main error type for sampling and presence operations.
#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// System information parsing failed
    #[error("Failed to parse system information: {0}")]
    ParseError(String),

    /// Presence service operation failed (connect, update or close)
    #[error("Presence error: {0}")]
    Presence(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The current platform does not expose the requested information
    #[error("Unsupported on this platform: {0}")]
    Unsupported(String),

    /// Generic system error
    #[error("System error: {0}")]
    System(String),
}

impl SystemError {
    /// Create a new parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a new presence error
    pub fn presence_error(msg: impl Into<String>) -> Self {
        Self::Presence(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new unsupported-platform error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create a new generic system error
    #[allow(clippy::self_named_constructors)]
    pub fn system_error(msg: impl Into<String>) -> Self {
        Self::System(msg.into())
    }

    /// Whether this error only signals that a facet is not available here.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
