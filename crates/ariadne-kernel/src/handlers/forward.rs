//! Routing envelopes addressed to another agent.

use crate::context::{AgentContext, ServiceRegistry};
use crate::event_bus::EventBus;
use crate::handler::{HandlerOutcome, MessageContext, MessageHandler};
use ariadne_types::error::AriadneError;
use ariadne_types::event::{Event, EventPayload};
use ariadne_types::messages::{message_types, ForwardMessage, ForwardToKeyMessage};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Accepts `forward` and `forward_to_key` envelopes and announces them on the
/// event bus. Delivery to the target is left to a subscriber.
pub struct ForwardHandler {
    events: Arc<EventBus>,
}

impl ForwardHandler {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl MessageHandler for ForwardHandler {
    fn name(&self) -> &str {
        "forward"
    }

    fn supported_message_types(&self) -> &[&'static str] {
        &[message_types::FORWARD, message_types::FORWARD_TO_KEY]
    }

    async fn process(
        &self,
        _context: &AgentContext,
        message: MessageContext,
        _services: &ServiceRegistry,
    ) -> HandlerOutcome {
        let (target, by_key) = match message.message_type() {
            message_types::FORWARD => (message.get_message::<ForwardMessage>()?.to.clone(), false),
            message_types::FORWARD_TO_KEY => (
                message.get_message::<ForwardToKeyMessage>()?.key.clone(),
                true,
            ),
            other => return Err(AriadneError::UnsupportedMessageType(other.to_string()).into()),
        };
        if target.is_empty() {
            return Err(format!("{} envelope has no target", message.message_type()).into());
        }

        info!(target = %target, by_key, "Forward envelope received");
        self.events
            .publish(Event::new(EventPayload::ForwardReceived { target, by_key }))
            .await;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn run(handler: &ForwardHandler, message: MessageContext) -> HandlerOutcome {
        handler
            .process(&AgentContext::default(), message, &ServiceRegistry::new())
            .await
    }

    #[tokio::test]
    async fn test_forward_announced() {
        let events = Arc::new(EventBus::default());
        let mut forwards = events.subscribe_type("forward");
        let handler = ForwardHandler::new(Arc::clone(&events));

        let forward = ForwardMessage::new("did:example:bob", json!({"ciphertext": "abc"}));
        let reply = run(&handler, MessageContext::new(Box::new(forward)))
            .await
            .unwrap();
        assert!(reply.is_none());

        let event = forwards.recv().await.unwrap();
        assert_eq!(
            event.payload,
            EventPayload::ForwardReceived {
                target: "did:example:bob".to_string(),
                by_key: false,
            }
        );
    }

    #[tokio::test]
    async fn test_forward_to_key_announced() {
        let events = Arc::new(EventBus::default());
        let handler = ForwardHandler::new(Arc::clone(&events));

        let forward = ForwardToKeyMessage::new("8HH5gYEeNc3z7PYXmd54d4x6qAfCNrqQqEB3nS7Zfu7K", json!({}));
        run(&handler, MessageContext::new(Box::new(forward)))
            .await
            .unwrap();

        let history = events.history(1).await;
        assert_eq!(history[0].message_type(), Some("forward_to_key"));
    }

    #[tokio::test]
    async fn test_missing_target_rejected() {
        let events = Arc::new(EventBus::default());
        let handler = ForwardHandler::new(Arc::clone(&events));

        let err = run(&handler, MessageContext::new(Box::new(ForwardMessage::default())))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "forward envelope has no target");
        assert!(events.history(1).await.is_empty());
    }
}
