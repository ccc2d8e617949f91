//! Event types published by handlers on the kernel event bus.
//!
//! Events are side-channel notifications: they never influence the reply a
//! handler returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Create a new random EventId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The payload of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EventPayload {
    /// A handler finished processing a message.
    MessageProcessed {
        /// The `@type` that was processed.
        message_type: String,
        /// Thread id carried by the message's thread decorator, if any.
        thread_id: Option<String>,
    },
    /// A routing envelope arrived for another agent.
    ForwardReceived {
        /// DID, alias or verification key the payload is addressed to.
        target: String,
        /// Whether `target` is a verification key (`forward_to_key`).
        by_key: bool,
    },
    /// Kernel lifecycle.
    System(SystemEvent),
}

/// Kernel lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemEvent {
    KernelStarted,
    ShuttingDown,
}

/// A single bus event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub timestamp: DateTime<Utc>,
    pub payload: EventPayload,
}

impl Event {
    /// Stamp a payload with a fresh id and the current time.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: EventId::new(),
            timestamp: Utc::now(),
            payload,
        }
    }

    /// The message type this event concerns, if any.
    pub fn message_type(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::MessageProcessed { message_type, .. } => Some(message_type.as_str()),
            EventPayload::ForwardReceived { by_key: false, .. } => {
                Some(crate::messages::message_types::FORWARD)
            }
            EventPayload::ForwardReceived { by_key: true, .. } => {
                Some(crate::messages::message_types::FORWARD_TO_KEY)
            }
            EventPayload::System(_) => None,
        }
    }
}
