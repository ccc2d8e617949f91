//! Message handlers and the routing table that owns them.

use crate::context::{AgentContext, ServiceRegistry};
use crate::error::{HandlerError, KernelError, KernelResult};
use ariadne_types::error::AriadneResult;
use ariadne_types::message::{AgentMessage, MessageShape};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// What a handler returns: an optional reply message.
pub type HandlerOutcome = Result<Option<Box<dyn AgentMessage>>, HandlerError>;

/// A decoded inbound message as seen by a handler.
#[derive(Debug)]
pub struct MessageContext {
    message: Box<dyn AgentMessage>,
}

impl MessageContext {
    pub fn new(message: Box<dyn AgentMessage>) -> Self {
        Self { message }
    }

    pub fn message_type(&self) -> &str {
        self.message.message_type()
    }

    pub fn message_id(&self) -> &str {
        self.message.id()
    }

    /// The message as a trait object.
    pub fn message(&self) -> &dyn AgentMessage {
        &*self.message
    }

    /// The message as its concrete shape. Fails with `UnexpectedShape` on mismatch.
    pub fn get_message<T: MessageShape>(&self) -> AriadneResult<&T> {
        self.message.shape::<T>()
    }

    pub fn into_message(self) -> Box<dyn AgentMessage> {
        self.message
    }
}

/// Processes one or more message types.
#[async_trait]
pub trait MessageHandler: Send + Sync + 'static {
    /// Name used in logs and registration errors.
    fn name(&self) -> &str;

    /// The `@type` values this handler accepts.
    fn supported_message_types(&self) -> &[&'static str];

    fn supports(&self, message_type: &str) -> bool {
        self.supported_message_types().contains(&message_type)
    }

    /// Handle a message, optionally producing a reply.
    async fn process(
        &self,
        context: &AgentContext,
        message: MessageContext,
        services: &ServiceRegistry,
    ) -> HandlerOutcome;
}

/// Maps each message type to exactly one handler.
#[derive(Default)]
pub struct HandlerRegistry {
    routes: HashMap<&'static str, Arc<dyn MessageHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for all of its supported types.
    ///
    /// Registration is all-or-nothing: if any type is already claimed, the
    /// registry is left unchanged.
    pub fn register(&mut self, handler: Arc<dyn MessageHandler>) -> KernelResult<()> {
        for message_type in handler.supported_message_types() {
            if let Some(existing) = self.routes.get(message_type) {
                return Err(KernelError::DuplicateHandler {
                    message_type: message_type.to_string(),
                    existing: existing.name().to_string(),
                    rejected: handler.name().to_string(),
                });
            }
        }
        for message_type in handler.supported_message_types() {
            self.routes.insert(*message_type, Arc::clone(&handler));
        }
        info!(
            handler = handler.name(),
            message_types = ?handler.supported_message_types(),
            "Registered message handler"
        );
        Ok(())
    }

    /// The handler for a message type.
    pub fn resolve(&self, message_type: &str) -> Option<&Arc<dyn MessageHandler>> {
        self.routes.get(message_type)
    }

    /// Every routed type, sorted.
    pub fn message_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.routes.keys().copied().collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("message_types", &self.message_types())
            .finish()
    }
}
