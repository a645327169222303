//! Event Bus implementation.
//!
//! Provides the EventBus struct shared between the editor and the
//! surrounding UI.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{EditorEvent, EventCategory};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0.simple())
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(EditorEvent) + Send + Sync>;

/// Event bus settings
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Capacity of the broadcast channel behind [`EventBus::receiver`].
    pub channel_capacity: usize,
    /// Keep the most recent events for [`EventBus::recent_events`].
    pub enable_history: bool,
    pub max_history_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            enable_history: false,
            max_history_size: 200,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EventBusError {
    /// Neither handlers nor async receivers are attached.
    #[error("No active subscribers")]
    NoSubscribers,
}

/// Publish/subscribe hub for editor notifications
///
/// Handlers registered with [`EventBus::subscribe`] run synchronously on the
/// publishing thread. Async consumers can poll a [`EventBus::receiver`].
pub struct EventBus {
    sender: broadcast::Sender<EditorEvent>,
    handlers: Arc<RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>>,
    history: Arc<RwLock<VecDeque<(u64, EditorEvent)>>>,
    published: AtomicU64,
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            history: Arc::new(RwLock::new(VecDeque::new())),
            published: AtomicU64::new(0),
            config,
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of async receivers that will receive the event,
    /// or [`EventBusError::NoSubscribers`] if nobody is listening at all.
    pub fn publish(&self, event: EditorEvent) -> Result<usize, EventBusError> {
        let seq = self.published.fetch_add(1, Ordering::Relaxed);
        if self.config.enable_history {
            self.remember(seq, &event);
        }

        tracing::trace!("Publishing #{} {}", seq, event.description());

        let handlers = self.handlers.read();
        for (filter, handler) in handlers.values() {
            if filter.matches(&event) {
                handler(event.clone());
            }
        }

        match self.sender.send(event) {
            Ok(count) => Ok(count),
            Err(_) => {
                if handlers.is_empty() {
                    Err(EventBusError::NoSubscribers)
                } else {
                    Ok(0)
                }
            }
        }
    }

    /// Subscribe to events with a synchronous handler
    ///
    /// The handler is called on the publishing thread and must not publish
    /// or subscribe on the same bus.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(EditorEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Get a receiver for polling events from a tokio task
    pub fn receiver(&self) -> broadcast::Receiver<EditorEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active handler subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Total number of events published on this bus.
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Retained events, oldest first, with their publish sequence numbers.
    ///
    /// With `after` set, only events published after that sequence number
    /// are returned. Always empty unless history is enabled.
    pub fn recent_events(&self, after: Option<u64>) -> Vec<(u64, EditorEvent)> {
        self.history
            .read()
            .iter()
            .filter(|(seq, _)| after.is_none_or(|after| *seq > after))
            .cloned()
            .collect()
    }

    pub fn clear_history(&self) {
        self.history.write().clear();
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn remember(&self, seq: u64, event: &EditorEvent) {
        let mut history = self.history.write();
        history.push_back((seq, event.clone()));
        while history.len() > self.config.max_history_size {
            history.pop_front();
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}
