//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ActionEvent, UiEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Completed actions, applied or rejected
    Actions,
    /// Requests for the windowing layer
    Ui,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Action(ActionEvent),
    Ui(UiEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Action(_) => Topic::Actions,
            Event::Ui(_) => Topic::Ui,
        }
    }
}

/// Topic-based event bus
///
/// Each topic is its own broadcast channel, so a subscriber only sees the
/// events it asked for. Publishing never blocks the simulation worker.
#[derive(Clone)]
pub struct EventBus {
    actions: broadcast::Sender<Event>,
    ui: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            actions: broadcast::channel(capacity).0,
            ui: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Actions => &self.actions,
            Topic::Ui => &self.ui,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use park_core::Money;

    use super::*;

    #[tokio::test]
    async fn events_only_reach_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut actions = bus.subscribe(Topic::Actions);
        let mut ui = bus.subscribe(Topic::Ui);

        bus.publish(Event::Ui(UiEvent::MoneyEffect {
            cost: Money::new(5, 0),
            position: None,
        }));

        assert!(matches!(ui.recv().await.unwrap(), Event::Ui(_)));
        assert!(actions.try_recv().is_err());
    }

    #[test]
    fn subscribe_multiple_returns_one_receiver_per_topic() {
        let bus = EventBus::new();
        let receivers = bus.subscribe_multiple(&[Topic::Actions, Topic::Ui]);
        assert_eq!(receivers.len(), 2);
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::new();
        bus.publish(Event::Ui(UiEvent::MoneyEffect {
            cost: Money::ZERO,
            position: None,
        }));
    }
}
