use thiserror::Error;

/// Errors that can occur when driving a treadmill
#[derive(Error, Debug)]
pub enum TreadmillError {
    /// Command name does not match any known command
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command exists but has no behaviour behind it
    #[error("Command not implemented: {0}")]
    NotImplemented(&'static str),

    /// A required positional argument was not supplied
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    /// An argument could not be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue {
        /// Argument name
        name: &'static str,
        /// Raw value as supplied
        value: String,
    },

    /// No connector knows how to open this endpoint
    #[error("Unsupported endpoint: {0}")]
    UnsupportedEndpoint(String),

    /// Opening the device failed
    #[error("Failed to connect to device: {0}")]
    ConnectionFailed(String),

    /// The device layer reported a failure
    #[error("Device error: {0}")]
    Device(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for treadmill operations
pub type Result<T> = std::result::Result<T, TreadmillError>;

impl TreadmillError {
    /// Check if this error was caused by how the program was invoked
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand(_) | Self::MissingArgument(_) | Self::InvalidValue { .. }
        )
    }

    /// Check if this error came from opening or talking to the device
    #[must_use]
    pub const fn is_device_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEndpoint(_) | Self::ConnectionFailed(_) | Self::Device(_)
        )
    }
}
