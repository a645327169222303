//! # Whiteboard
//!
//! An interactive diagram editing engine. Shapes are placed on an infinite
//! canvas, joined with routed connectors, and manipulated through pointer
//! gestures (tap, drag, resize, pan, pinch zoom) with full undo/redo.
//!
//! ## Architecture
//!
//! The workspace is organized as a set of crates:
//!
//! 1. **whiteboard-core** - Error types, editor event bus, engine constants
//! 2. **whiteboard-settings** - Editor configuration, load/save, validation
//! 3. **whiteboard-designer** - Geometry, view transform, connector routing,
//!    gesture state machine, document mutator, undo/redo and diagram stores
//! 4. **whiteboard** - This crate, re-exporting the above plus logging setup
//!
//! Rendering is left to the embedding application: it reads the
//! [`Diagram`], the [`Viewport`] and the routed connector paths, and forwards
//! pointer input to [`EditorState::handle_pointer`].

pub use whiteboard_designer as designer;
pub use whiteboard_settings as settings;

pub use whiteboard_core::{
    DocumentEvent, EditorEvent, Error, EventBus, EventBusConfig, EventCategory, EventFilter,
    HistoryEvent, InteractionEvent, Result, SelectionEvent, StorageEvent, StoreError,
    SubscriptionId, ViewEvent,
};

pub use whiteboard_designer::{
    AnchorPoint, ArrowHead, CanvasState, Color, Connector, ConnectorId, ConnectorRouter,
    ConnectorStyle, Diagram, DiagramFile, DiagramId, DiagramStore, Document, EditAction,
    EditMode, EditorState, Endpoint, GestureController, GestureFeedback, Grid, JsonFileStore,
    MemoryStore, Point, PointerEvent, PointerPhase, Rect, ResizeHandle, RoutedConnector,
    Selection, Shape, ShapeId, ShapeKind, UndoRedoManager, Viewport,
};

pub use whiteboard_settings::{default_config_path, EditorConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Installs a `tracing` subscriber writing to stdout. The level comes from
/// `RUST_LOG` and defaults to INFO. Fails if a global subscriber is
/// already set.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::debug!("Logging initialized (whiteboard {VERSION})");
    Ok(())
}
