//! Kernel-specific error types.

use ariadne_types::error::AriadneError;
use std::fmt;
use thiserror::Error;

/// Error returned by a message handler. Opaque to the kernel.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Kernel error type wrapping AriadneError with kernel-specific context.
#[derive(Error, Debug)]
pub enum KernelError {
    /// A wrapped protocol error.
    #[error(transparent)]
    Ariadne(#[from] AriadneError),

    /// Two handlers claimed the same message type.
    #[error("Message type '{message_type}' is already handled by '{existing}', rejected '{rejected}'")]
    DuplicateHandler {
        message_type: String,
        existing: String,
        rejected: String,
    },

    /// A handler failed while processing a message.
    #[error("Handler '{handler}' failed on '{message_type}': {source}")]
    Handler {
        handler: String,
        message_type: String,
        #[source]
        source: HandlerError,
    },

    /// The execution context could not be obtained.
    #[error("Context unavailable: {0}")]
    ContextUnavailable(String),
}

/// Alias for kernel results.
pub type KernelResult<T> = Result<T, KernelError>;

/// Progress of a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStage {
    /// Raw bytes accepted from the transport.
    Received,
    /// Bytes decoded into a typed message.
    Decoded,
    /// A handler was found for the message type.
    Routed,
    /// The handler returned.
    Handled,
    /// Reply (if any) encoded.
    Completed,
}

impl fmt::Display for DispatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Decoded => "decoded",
            Self::Routed => "routed",
            Self::Handled => "handled",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// A failed dispatch: the last stage reached and the cause.
#[derive(Error, Debug)]
#[error("Dispatch failed after stage '{stage}': {source}")]
pub struct DispatchError {
    pub stage: DispatchStage,
    #[source]
    pub source: KernelError,
}

impl DispatchError {
    pub fn new(stage: DispatchStage, source: impl Into<KernelError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    /// The protocol error behind this failure, if it was one.
    pub fn protocol_error(&self) -> Option<&AriadneError> {
        match &self.source {
            KernelError::Ariadne(e) => Some(e),
            _ => None,
        }
    }

    /// Whether the inbound message itself was at fault (undecodable or unroutable).
    pub fn is_rejected_message(&self) -> bool {
        matches!(
            self.protocol_error(),
            Some(AriadneError::MalformedMessage(_) | AriadneError::UnsupportedMessageType(_))
        )
    }
}
