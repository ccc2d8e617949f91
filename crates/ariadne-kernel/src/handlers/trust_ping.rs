//! Trust ping: liveness check between two agents.

use crate::context::{AgentContext, ServiceRegistry};
use crate::event_bus::EventBus;
use crate::handler::{HandlerOutcome, MessageContext, MessageHandler};
use ariadne_types::decorator::ThreadDecorator;
use ariadne_types::error::AriadneError;
use ariadne_types::event::{Event, EventPayload};
use ariadne_types::messages::{message_types, TrustPingMessage, TrustPingResponseMessage};
use ariadne_wire::{ThreadExt, THREAD_DECORATOR};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Answers pings that request a response and records every ping seen.
pub struct TrustPingHandler {
    events: Arc<EventBus>,
}

impl TrustPingHandler {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self { events }
    }

    async fn publish_processed(&self, message: &MessageContext) {
        let thread_id = message
            .message()
            .decorators()
            .find::<ThreadDecorator>(THREAD_DECORATOR)
            .map(|thread| thread.thread_id.clone());
        self.events
            .publish(Event::new(EventPayload::MessageProcessed {
                message_type: message.message_type().to_string(),
                thread_id,
            }))
            .await;
    }
}

#[async_trait]
impl MessageHandler for TrustPingHandler {
    fn name(&self) -> &str {
        "trust_ping"
    }

    fn supported_message_types(&self) -> &[&'static str] {
        &[message_types::TRUST_PING, message_types::TRUST_PING_RESPONSE]
    }

    async fn process(
        &self,
        _context: &AgentContext,
        message: MessageContext,
        _services: &ServiceRegistry,
    ) -> HandlerOutcome {
        match message.message_type() {
            message_types::TRUST_PING => {
                let ping = message.get_message::<TrustPingMessage>()?;
                self.publish_processed(&message).await;
                if !ping.response_requested {
                    debug!(thread_id = ping.thread_id(), "Ping needs no response");
                    return Ok(None);
                }
                let mut response: TrustPingResponseMessage = ping.create_threaded_reply()?;
                response.comment = ping.comment.clone();
                Ok(Some(Box::new(response)))
            }
            message_types::TRUST_PING_RESPONSE => {
                let response = message.get_message::<TrustPingResponseMessage>()?;
                debug!(thread_id = response.thread_id(), "Ping answered");
                self.publish_processed(&message).await;
                Ok(None)
            }
            other => Err(AriadneError::UnsupportedMessageType(other.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_types::message::AgentMessage;
    use ariadne_wire::thread_from_parent;

    fn handler() -> (TrustPingHandler, Arc<EventBus>) {
        let events = Arc::new(EventBus::default());
        (TrustPingHandler::new(Arc::clone(&events)), events)
    }

    async fn run(handler: &TrustPingHandler, message: Box<dyn AgentMessage>) -> HandlerOutcome {
        handler
            .process(
                &AgentContext::default(),
                MessageContext::new(message),
                &ServiceRegistry::new(),
            )
            .await
    }

    #[tokio::test]
    async fn test_ping_with_response() {
        let (handler, events) = handler();
        let ping = TrustPingMessage::new(true).with_comment("are you there?");
        let reply = run(&handler, Box::new(ping.clone())).await.unwrap().unwrap();

        let response = reply.shape::<TrustPingResponseMessage>().unwrap();
        assert_eq!(response.thread_id(), ping.id());
        assert_eq!(response.comment.as_deref(), Some("are you there?"));
        assert_ne!(response.id(), ping.id());

        let history = events.history(10).await;
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0].payload,
            EventPayload::MessageProcessed {
                message_type: "trust_ping".to_string(),
                thread_id: None,
            }
        );
    }

    #[tokio::test]
    async fn test_ping_without_response() {
        let (handler, events) = handler();
        let reply = run(&handler, Box::new(TrustPingMessage::new(false)))
            .await
            .unwrap();
        assert!(reply.is_none());
        assert_eq!(events.history(10).await.len(), 1);
    }

    #[tokio::test]
    async fn test_event_carries_thread() {
        let (handler, events) = handler();
        let mut ping = TrustPingMessage::new(false);
        thread_from_parent(&mut ping, "connection-1").unwrap();
        let ping_id = ping.id().to_string();
        run(&handler, Box::new(ping)).await.unwrap();

        let history = events.history(1).await;
        assert_eq!(
            history[0].payload,
            EventPayload::MessageProcessed {
                message_type: "trust_ping".to_string(),
                thread_id: Some(ping_id),
            }
        );
    }

    #[tokio::test]
    async fn test_response_is_recorded() {
        let (handler, events) = handler();
        let ping = TrustPingMessage::new(true);
        let response: TrustPingResponseMessage = ping.create_threaded_reply().unwrap();
        let reply = run(&handler, Box::new(response)).await.unwrap();
        assert!(reply.is_none());

        let history = events.history(1).await;
        assert_eq!(
            history[0].payload,
            EventPayload::MessageProcessed {
                message_type: "trust_ping_response".to_string(),
                thread_id: Some(ping.id().to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_foreign_type_rejected() {
        let (handler, _events) = handler();
        let err = run(&handler, Box::new(ariadne_types::messages::ForwardMessage::default()))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported message type: forward");
    }
}
