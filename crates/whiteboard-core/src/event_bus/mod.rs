//! # Event Bus Module
//!
//! Decoupled notifications from the editing engine to the surrounding UI.
//!
//! ## Overview
//!
//! - The editor publishes typed events after every committed change
//! - Subscribers filter by category and receive events synchronously
//! - Async consumers can poll a broadcast receiver instead
//!
//! ## Usage
//!
//! ```rust,ignore
//! use whiteboard_core::event_bus::{EditorEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::Document]),
//!     |event| println!("{}", event.description()),
//! );
//!
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
