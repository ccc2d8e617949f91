//! Shared error types for the Ariadne system.

use thiserror::Error;

/// Protocol-level error type shared by the codec, threading and decorator layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AriadneError {
    /// The payload could not be parsed into any known message shape.
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// The discriminator is not present in the type registry.
    #[error("Unsupported message type: {0}")]
    UnsupportedMessageType(String),

    /// The message already carries a thread decorator.
    #[error("Message {0} is already threaded")]
    AlreadyThreaded(String),

    /// The thread decorator already names a parent thread.
    #[error("Message {message_id} already has parent thread {parent_thread_id}")]
    ParentAlreadySet {
        /// The message being re-parented.
        message_id: String,
        /// The parent thread already recorded.
        parent_thread_id: String,
    },

    /// A decorator with this name is already attached.
    #[error("Decorator already attached: {0}")]
    DuplicateDecorator(String),

    /// No decorator with this name is attached.
    #[error("Decorator not found: {0}")]
    DecoratorNotFound(String),

    /// The decorator exists but has a different shape than requested.
    #[error("Decorator '{name}' is a {found} decorator, not {expected}")]
    DecoratorTypeMismatch {
        /// Decorator name.
        name: String,
        /// Shape the caller asked for.
        expected: &'static str,
        /// Shape actually registered under the name.
        found: &'static str,
    },

    /// The decorator name is outside the closed decorator set.
    #[error("Unknown decorator: {0}")]
    UnknownDecorator(String),

    /// A decoded message was read as the wrong concrete shape.
    #[error("Message of type '{actual}' cannot be read as '{requested}'")]
    UnexpectedShape {
        /// Discriminator of the shape the caller asked for.
        requested: &'static str,
        /// Discriminator of the decoded message.
        actual: String,
    },

    /// A discriminator was registered twice in the type registry.
    #[error("Message type registered twice: {0}")]
    DuplicateMessageType(String),

    /// A message could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Alias for Result with AriadneError.
pub type AriadneResult<T> = Result<T, AriadneError>;
