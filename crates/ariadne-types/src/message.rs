//! The agent message model.
//!
//! Every concrete message shape embeds a [`MessageHeader`] (id + decorator
//! bag) and declares its discriminator through [`MessageShape`]. The
//! object-safe [`AgentMessage`] trait is what the codec produces and what
//! handlers receive; it is implemented for every shape automatically.

use crate::decorator::Decorators;
use crate::error::{AriadneError, AriadneResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use uuid::Uuid;

/// Wire field carrying the message id.
pub const ID_FIELD: &str = "@id";

/// Wire field carrying the type discriminator. Reserved in every shape.
pub const TYPE_FIELD: &str = "@type";

/// Identity and decorators shared by every message shape.
///
/// The id is fixed at construction (or taken from the wire when decoding)
/// and cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    #[serde(rename = "@id")]
    id: String,
    #[serde(flatten)]
    decorators: Decorators,
}

impl MessageHeader {
    /// A header with a fresh random id and no decorators.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            decorators: Decorators::default(),
        }
    }

    /// The message id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Default for MessageHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// A concrete, serializable message shape with a fixed discriminator.
pub trait MessageShape:
    Serialize + DeserializeOwned + Default + Clone + fmt::Debug + Send + Sync + 'static
{
    /// Canonical `@type` of this shape.
    const MESSAGE_TYPE: &'static str;

    fn header(&self) -> &MessageHeader;

    fn header_mut(&mut self) -> &mut MessageHeader;
}

/// A decoded message of any registered shape.
pub trait AgentMessage: Any + Send + Sync + fmt::Debug + 'static {
    /// Globally unique message id.
    fn id(&self) -> &str;

    /// The `@type` discriminator.
    fn message_type(&self) -> &str;

    /// The decorator bag.
    fn decorators(&self) -> &Decorators;

    /// Mutable access to the decorator bag (only `add`/`set` mutate it).
    fn decorators_mut(&mut self) -> &mut Decorators;

    /// Wire form of the message, including `@type`.
    fn to_value(&self) -> AriadneResult<serde_json::Value>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: MessageShape> AgentMessage for T {
    fn id(&self) -> &str {
        self.header().id()
    }

    fn message_type(&self) -> &str {
        T::MESSAGE_TYPE
    }

    fn decorators(&self) -> &Decorators {
        &self.header().decorators
    }

    fn decorators_mut(&mut self) -> &mut Decorators {
        &mut self.header_mut().decorators
    }

    fn to_value(&self) -> AriadneResult<serde_json::Value> {
        let mut value =
            serde_json::to_value(self).map_err(|e| AriadneError::Serialization(e.to_string()))?;
        let fields = value.as_object_mut().ok_or_else(|| {
            AriadneError::Serialization(format!("{} did not serialize to an object", T::MESSAGE_TYPE))
        })?;
        fields.insert(
            TYPE_FIELD.to_string(),
            serde_json::Value::String(T::MESSAGE_TYPE.to_string()),
        );
        Ok(value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn AgentMessage {
    /// Borrow the message as a concrete shape.
    pub fn downcast_ref<T: MessageShape>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Borrow the message as a concrete shape, failing with the actual type.
    pub fn shape<T: MessageShape>(&self) -> AriadneResult<&T> {
        self.downcast_ref::<T>()
            .ok_or_else(|| AriadneError::UnexpectedShape {
                requested: T::MESSAGE_TYPE,
                actual: self.message_type().to_string(),
            })
    }
}

/// Message identity is the id.
impl PartialEq for dyn AgentMessage {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
