//! Trust ping: liveness check over an established connection.

use super::message_types;
use crate::message::MessageHeader;
use serde::{Deserialize, Serialize};

/// Ping sent to check that the other side is reachable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustPingMessage {
    #[serde(flatten)]
    header: MessageHeader,
    /// Whether the receiver should answer with a [`TrustPingResponseMessage`].
    #[serde(default)]
    pub response_requested: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl TrustPingMessage {
    pub fn new(response_requested: bool) -> Self {
        Self {
            response_requested,
            ..Self::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl_message_shape!(TrustPingMessage, message_types::TRUST_PING);

/// Answer to a [`TrustPingMessage`] with `response_requested` set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrustPingResponseMessage {
    #[serde(flatten)]
    header: MessageHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl_message_shape!(TrustPingResponseMessage, message_types::TRUST_PING_RESPONSE);
