//! # Whiteboard Core
//!
//! Shared building blocks for the whiteboard editor crates: the unified
//! error types, editor event notifications and policy constants.

pub mod constants;
pub mod error;
pub mod event_bus;

pub use error::{Error, Result, StoreError};

pub use event_bus::{
    DocumentEvent, EditorEvent, EventBus, EventBusConfig, EventBusError, EventCategory,
    EventFilter, HistoryEvent, InteractionEvent, SelectionEvent, StorageEvent, SubscriptionId,
    ViewEvent,
};
