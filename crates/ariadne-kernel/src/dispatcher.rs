//! Inbound message dispatch: decode, route, handle, encode.
//!
//! The dispatcher holds no per-message state, so one instance serves any
//! number of concurrent requests. Each dispatch runs inside a `dispatch`
//! tracing span carrying the message id and type.

use crate::context::{AgentContext, ServiceRegistry};
use crate::error::{DispatchError, DispatchStage, KernelError, KernelResult};
use crate::handler::{HandlerRegistry, MessageContext};
use ariadne_types::error::AriadneError;
use ariadne_types::message::AgentMessage;
use ariadne_wire::{encode_message, TypeRegistry};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

/// Routes decoded messages to their handler.
#[derive(Clone)]
pub struct Dispatcher {
    codec: Arc<TypeRegistry>,
    handlers: Arc<HandlerRegistry>,
    services: Arc<ServiceRegistry>,
}

impl Dispatcher {
    /// Build a dispatcher. Every routed type must be decodable by `codec`.
    pub fn new(
        codec: TypeRegistry,
        handlers: HandlerRegistry,
        services: ServiceRegistry,
    ) -> KernelResult<Self> {
        if let Some(unknown) = handlers
            .message_types()
            .into_iter()
            .find(|message_type| !codec.supports(message_type))
        {
            return Err(AriadneError::UnsupportedMessageType(unknown.to_string()).into());
        }
        Ok(Self {
            codec: Arc::new(codec),
            handlers: Arc::new(handlers),
            services: Arc::new(services),
        })
    }

    pub fn codec(&self) -> &TypeRegistry {
        &self.codec
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    /// Dispatch raw wire bytes, returning the encoded reply if the handler produced one.
    pub async fn dispatch(
        &self,
        raw: &[u8],
        context: &AgentContext,
    ) -> Result<Option<Vec<u8>>, DispatchError> {
        let message = self.codec.decode(raw).map_err(|e| {
            warn!(error = %e, bytes = raw.len(), "Rejected undecodable message");
            DispatchError::new(DispatchStage::Received, e)
        })?;

        match self.dispatch_message(message, context).await? {
            Some(reply) => self.encode_reply(reply.as_ref()).map(Some),
            None => Ok(None),
        }
    }

    /// Dispatch an already decoded message.
    pub async fn dispatch_message(
        &self,
        message: Box<dyn AgentMessage>,
        context: &AgentContext,
    ) -> Result<Option<Box<dyn AgentMessage>>, DispatchError> {
        let span = info_span!(
            "dispatch",
            message_id = %message.id(),
            message_type = %message.message_type()
        );
        self.route(message, context).instrument(span).await
    }

    /// Encode a reply for the transport.
    pub fn encode_reply(&self, reply: &dyn AgentMessage) -> Result<Vec<u8>, DispatchError> {
        encode_message(reply).map_err(|e| DispatchError::new(DispatchStage::Handled, e))
    }

    async fn route(
        &self,
        message: Box<dyn AgentMessage>,
        context: &AgentContext,
    ) -> Result<Option<Box<dyn AgentMessage>>, DispatchError> {
        let message_type = message.message_type().to_string();
        let handler = match self.handlers.resolve(&message_type) {
            Some(handler) => Arc::clone(handler),
            None => {
                warn!("No handler for message type");
                return Err(DispatchError::new(
                    DispatchStage::Decoded,
                    AriadneError::UnsupportedMessageType(message_type),
                ));
            }
        };
        debug!(handler = handler.name(), "Routed message");

        let started = Instant::now();
        let reply = handler
            .process(context, MessageContext::new(message), &self.services)
            .await
            .map_err(|source| {
                warn!(handler = handler.name(), error = %source, "Handler failed");
                DispatchError::new(
                    DispatchStage::Routed,
                    KernelError::Handler {
                        handler: handler.name().to_string(),
                        message_type: message_type.clone(),
                        source,
                    },
                )
            })?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &reply {
            Some(reply) => info!(
                handler = handler.name(),
                reply_type = reply.message_type(),
                elapsed_ms,
                "Message handled with reply"
            ),
            None => info!(handler = handler.name(), elapsed_ms, "Message handled"),
        }
        Ok(reply)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("codec", &self.codec)
            .field("handlers", &self.handlers)
            .finish()
    }
}
