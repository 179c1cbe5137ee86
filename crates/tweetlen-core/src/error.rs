//! Error types for tweetlen-core.

use thiserror::Error;

/// Errors from loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A source could not be parsed or a value has the wrong type.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reasons a message cannot be submitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// The message is empty or only whitespace.
    #[error("message cannot be empty")]
    Empty,

    /// The message is over the weighted length cap.
    #[error("message is {length} characters, over the {max}-character limit")]
    TooLong {
        /// Weighted length of the message.
        length: usize,
        /// The cap it exceeded.
        max: usize,
    },
}

/// Result type alias using [`MessageError`].
pub type MessageResult<T> = Result<T, MessageError>;
