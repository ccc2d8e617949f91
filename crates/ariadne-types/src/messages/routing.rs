//! Routing envelopes. The inner `msg` is opaque to this engine.

use super::message_types;
use crate::message::MessageHeader;
use serde::{Deserialize, Serialize};

/// Forward an inner message to the agent identified by `to`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardMessage {
    #[serde(flatten)]
    header: MessageHeader,
    /// Routing target (a DID or connection alias).
    pub to: String,
    /// The wrapped payload, forwarded verbatim.
    #[serde(default)]
    pub msg: serde_json::Value,
}

impl ForwardMessage {
    pub fn new(to: impl Into<String>, msg: serde_json::Value) -> Self {
        Self {
            to: to.into(),
            msg,
            ..Self::default()
        }
    }
}

impl_message_shape!(ForwardMessage, message_types::FORWARD);

/// Forward an inner message to whoever holds the verification key `key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForwardToKeyMessage {
    #[serde(flatten)]
    header: MessageHeader,
    pub key: String,
    #[serde(default)]
    pub msg: serde_json::Value,
}

impl ForwardToKeyMessage {
    pub fn new(key: impl Into<String>, msg: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            msg,
            ..Self::default()
        }
    }
}

impl_message_shape!(ForwardToKeyMessage, message_types::FORWARD_TO_KEY);
