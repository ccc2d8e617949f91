//! Wire codec — polymorphic decoding keyed by the `@type` discriminator.
//!
//! Messages travel as JSON objects. The [`TypeRegistry`] reads the reserved
//! `@type` field, looks up the decode function registered for it and
//! deserializes the whole object into that shape. The registry is filled once
//! at startup and only read afterwards.

use ariadne_types::error::{AriadneError, AriadneResult};
use ariadne_types::message::{AgentMessage, MessageShape, TYPE_FIELD};
use ariadne_types::messages::{
    CredentialIssueMessage, CredentialOfferMessage, CredentialRejectMessage,
    CredentialRequestMessage, ForwardMessage, ForwardToKeyMessage, ProofMessage,
    ProofRequestMessage, TrustPingMessage, TrustPingResponseMessage,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Decodes a JSON object into one concrete shape.
type DecodeFn = fn(Value) -> Result<Box<dyn AgentMessage>, serde_json::Error>;

fn decode_shape<T: MessageShape>(value: Value) -> Result<Box<dyn AgentMessage>, serde_json::Error> {
    Ok(Box::new(serde_json::from_value::<T>(value)?))
}

/// Closed registry of message shapes, keyed by discriminator.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    decoders: HashMap<&'static str, DecodeFn>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in message shape.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();
        registry.insert::<TrustPingMessage>();
        registry.insert::<TrustPingResponseMessage>();
        registry.insert::<ForwardMessage>();
        registry.insert::<ForwardToKeyMessage>();
        registry.insert::<CredentialOfferMessage>();
        registry.insert::<CredentialRequestMessage>();
        registry.insert::<CredentialIssueMessage>();
        registry.insert::<CredentialRejectMessage>();
        registry.insert::<ProofRequestMessage>();
        registry.insert::<ProofMessage>();
        registry
    }

    /// Register an additional shape. Each discriminator may be registered once.
    pub fn register<T: MessageShape>(&mut self) -> AriadneResult<()> {
        if self.supports(T::MESSAGE_TYPE) {
            return Err(AriadneError::DuplicateMessageType(
                T::MESSAGE_TYPE.to_string(),
            ));
        }
        self.insert::<T>();
        Ok(())
    }

    fn insert<T: MessageShape>(&mut self) {
        self.decoders.insert(T::MESSAGE_TYPE, decode_shape::<T>);
    }

    /// Whether `message_type` has a registered shape.
    pub fn supports(&self, message_type: &str) -> bool {
        self.decoders.contains_key(message_type)
    }

    /// All registered discriminators, sorted.
    pub fn message_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.decoders.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Decode raw wire bytes into a typed message.
    pub fn decode(&self, bytes: &[u8]) -> AriadneResult<Box<dyn AgentMessage>> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| AriadneError::MalformedMessage(format!("invalid JSON: {e}")))?;
        self.decode_value(value)
    }

    /// Decode an already-parsed JSON value into a typed message.
    pub fn decode_value(&self, value: Value) -> AriadneResult<Box<dyn AgentMessage>> {
        let message_type = match value.as_object().map(|fields| fields.get(TYPE_FIELD)) {
            None => {
                return Err(AriadneError::MalformedMessage(
                    "expected a JSON object".to_string(),
                ))
            }
            Some(None) => {
                return Err(AriadneError::MalformedMessage(format!(
                    "missing {TYPE_FIELD} discriminator"
                )))
            }
            Some(Some(Value::String(message_type))) => message_type.clone(),
            Some(Some(_)) => {
                return Err(AriadneError::MalformedMessage(format!(
                    "{TYPE_FIELD} must be a string"
                )))
            }
        };

        let decode = self
            .decoders
            .get(message_type.as_str())
            .ok_or_else(|| AriadneError::UnsupportedMessageType(message_type.clone()))?;

        let message = decode(value).map_err(|e| {
            AriadneError::MalformedMessage(format!("invalid {message_type} payload: {e}"))
        })?;
        debug!(message_id = %message.id(), message_type = %message_type, "Decoded message");
        Ok(message)
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("message_types", &self.message_types())
            .finish()
    }
}

/// Encode a message in its concrete wire shape.
pub fn encode_message<M: AgentMessage + ?Sized>(message: &M) -> AriadneResult<Vec<u8>> {
    let value = message.to_value()?;
    serde_json::to_vec(&value).map_err(|e| AriadneError::Serialization(e.to_string()))
}
