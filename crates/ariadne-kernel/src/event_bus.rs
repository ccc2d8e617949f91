//! Event bus — pub/sub keyed by message type with a history ring buffer.

use ariadne_types::event::Event;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

/// Default number of events retained in the history ring buffer.
pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Side-channel notifications published by handlers.
pub struct EventBus {
    /// Broadcast channel for all events.
    sender: broadcast::Sender<Event>,
    /// Per-message-type event channels.
    type_channels: DashMap<String, broadcast::Sender<Event>>,
    /// Event history ring buffer.
    history: Arc<RwLock<VecDeque<Event>>>,
    history_size: usize,
}

impl EventBus {
    /// Create a bus retaining up to `history_size` events.
    pub fn new(history_size: usize) -> Self {
        let (sender, _) = broadcast::channel(1024);
        Self {
            sender,
            type_channels: DashMap::new(),
            history: Arc::new(RwLock::new(VecDeque::with_capacity(history_size))),
            history_size,
        }
    }

    /// Publish an event. Never blocks on slow subscribers.
    pub async fn publish(&self, event: Event) {
        debug!(
            event_id = %event.id,
            message_type = event.message_type().unwrap_or("-"),
            "Publishing event"
        );

        if self.history_size > 0 {
            let mut history = self.history.write().await;
            while history.len() >= self.history_size {
                history.pop_front();
            }
            history.push_back(event.clone());
        }

        if let Some(message_type) = event.message_type() {
            if let Some(sender) = self.type_channels.get(message_type) {
                let _ = sender.send(event.clone());
            }
        }
        let _ = self.sender.send(event);
    }

    /// Subscribe to events concerning one message type.
    pub fn subscribe_type(&self, message_type: &str) -> broadcast::Receiver<Event> {
        let entry = self
            .type_channels
            .entry(message_type.to_string())
            .or_insert_with(|| {
                let (tx, _) = broadcast::channel(256);
                tx
            });
        entry.subscribe()
    }

    /// Subscribe to every event.
    pub fn subscribe_all(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Most recent events, newest first.
    pub async fn history(&self, limit: usize) -> Vec<Event> {
        let history = self.history.read().await;
        history.iter().rev().take(limit).cloned().collect()
    }

    /// Drop the channel for a message type.
    pub fn unsubscribe_type(&self, message_type: &str) {
        self.type_channels.remove(message_type);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}
