//! Whiteboard Settings Crate
//!
//! Handles editor configuration: view limits, grid, gesture thresholds,
//! history depth, routing geometry and the default style of new items.

pub mod config;
pub mod error;

pub use config::{
    default_config_path, ConnectorDefaults, EditorConfig, GridSettings, HistorySettings,
    InteractionSettings, RoutingSettings, ShapeDefaults, ViewSettings,
};
pub use error::{SettingsError, SettingsResult};
