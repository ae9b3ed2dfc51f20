use std::fmt;

// === SettingsError ===

/// Errors related to settings persistence.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing the settings file.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === MessageError ===

/// Errors produced while dispatching an inbound message.
#[derive(Debug)]
pub enum MessageError {
    /// The message carried no recognizable action.
    UnknownAction(String),
    /// The message payload did not have the expected shape.
    InvalidPayload(String),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageError::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            MessageError::InvalidPayload(msg) => write!(f, "Invalid message payload: {}", msg),
        }
    }
}

impl std::error::Error for MessageError {}
