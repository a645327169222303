//! Editor configuration.
//!
//! Every section falls back to its defaults when missing from a file, so a
//! partial configuration such as `[grid]\nsize = 10.0` is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use whiteboard_core::constants;

use crate::error::{SettingsError, SettingsResult};

const CONFIG_DIR_NAME: &str = "whiteboard";
const CONFIG_FILE_NAME: &str = "editor.toml";

/// View transform limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Smallest scale the view can zoom out to
    pub min_scale: f64,
    /// Largest scale the view can zoom in to
    pub max_scale: f64,
    /// Factor applied by a single zoom-in step
    pub zoom_in_factor: f64,
    /// Factor applied by a single zoom-out step
    pub zoom_out_factor: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            min_scale: constants::MIN_SCALE,
            max_scale: constants::MAX_SCALE,
            zoom_in_factor: constants::ZOOM_IN_FACTOR,
            zoom_out_factor: constants::ZOOM_OUT_FACTOR,
        }
    }
}

/// Grid display and snapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Grid spacing in canvas units
    pub size: f64,
    /// Snap positions and sizes to the grid
    pub snap_enabled: bool,
    /// Draw the grid
    pub show_grid: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: constants::DEFAULT_GRID_SIZE,
            snap_enabled: true,
            show_grid: true,
        }
    }
}

/// Gesture thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Screen distance a pointer must travel before a tap becomes a drag
    pub tap_threshold: f64,
    /// Screen distance around a resize handle that still grabs it
    pub handle_tolerance: f64,
    /// Screen distance within which a tap selects a connector
    pub connector_hit_threshold: f64,
    /// Minimum shape width and height in canvas units
    pub min_shape_size: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            tap_threshold: constants::TAP_THRESHOLD_SCREEN,
            handle_tolerance: constants::HANDLE_TOLERANCE_SCREEN,
            connector_hit_threshold: constants::CONNECTOR_HIT_THRESHOLD_SCREEN,
            min_shape_size: constants::MIN_SHAPE_SIZE,
        }
    }
}

/// Undo history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo entries
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_depth: constants::MAX_HISTORY_DEPTH,
        }
    }
}

/// Connector routing geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
    /// Minimum orthogonal run away from an anchor before turning
    pub min_standoff: f64,
    /// Arrowhead length as a multiple of stroke width
    pub arrow_size_factor: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            min_standoff: constants::CONNECTOR_STANDOFF,
            arrow_size_factor: constants::ARROW_SIZE_FACTOR,
        }
    }
}

/// Style applied to newly created shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    pub width: f64,
    pub height: f64,
    /// ARGB fill colour
    pub fill_color: u32,
    /// ARGB outline colour
    pub stroke_color: u32,
    /// ARGB label colour
    pub text_color: u32,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            width: constants::DEFAULT_SHAPE_WIDTH,
            height: constants::DEFAULT_SHAPE_HEIGHT,
            fill_color: 0xFF4F_C3F7,
            stroke_color: 0xFF02_88D1,
            text_color: 0xFF00_0000,
            stroke_width: 2.0,
            corner_radius: 12.0,
        }
    }
}

/// Style applied to newly created connectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorDefaults {
    /// ARGB line colour
    pub color: u32,
    pub stroke_width: f64,
}

impl Default for ConnectorDefaults {
    fn default() -> Self {
        Self {
            color: 0xFF42_4242,
            stroke_width: 2.0,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub view: ViewSettings,
    pub grid: GridSettings,
    pub interaction: InteractionSettings,
    pub history: HistorySettings,
    pub routing: RoutingSettings,
    pub shape_defaults: ShapeDefaults,
    pub connector_defaults: ConnectorDefaults,
}

impl EditorConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML, chosen by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML, chosen by extension)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved editor config to {}", path.display());
        Ok(())
    }

    /// Load the config from the platform config directory, falling back to
    /// defaults when the file does not exist yet
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let view = &self.view;
        if !(view.min_scale > 0.0) {
            return Err(SettingsError::invalid("view.min_scale", "must be > 0"));
        }
        if !(view.max_scale > view.min_scale) {
            return Err(SettingsError::invalid(
                "view.max_scale",
                "must be greater than view.min_scale",
            ));
        }
        if !(view.zoom_in_factor > 1.0) {
            return Err(SettingsError::invalid("view.zoom_in_factor", "must be > 1"));
        }
        if !(view.zoom_out_factor > 0.0 && view.zoom_out_factor < 1.0) {
            return Err(SettingsError::invalid(
                "view.zoom_out_factor",
                "must be between 0 and 1",
            ));
        }

        if !(self.grid.size >= 0.0) {
            return Err(SettingsError::invalid("grid.size", "must be >= 0"));
        }

        let interaction = &self.interaction;
        if !(interaction.tap_threshold >= 0.0) {
            return Err(SettingsError::invalid(
                "interaction.tap_threshold",
                "must be >= 0",
            ));
        }
        if !(interaction.handle_tolerance > 0.0) {
            return Err(SettingsError::invalid(
                "interaction.handle_tolerance",
                "must be > 0",
            ));
        }
        if !(interaction.connector_hit_threshold > 0.0) {
            return Err(SettingsError::invalid(
                "interaction.connector_hit_threshold",
                "must be > 0",
            ));
        }
        if !(interaction.min_shape_size > 0.0) {
            return Err(SettingsError::invalid(
                "interaction.min_shape_size",
                "must be > 0",
            ));
        }

        if self.history.max_depth == 0 {
            return Err(SettingsError::invalid("history.max_depth", "must be > 0"));
        }

        if !(self.routing.min_standoff >= 0.0) {
            return Err(SettingsError::invalid("routing.min_standoff", "must be >= 0"));
        }
        if !(self.routing.arrow_size_factor > 0.0) {
            return Err(SettingsError::invalid(
                "routing.arrow_size_factor",
                "must be > 0",
            ));
        }

        let shape = &self.shape_defaults;
        if !(shape.width >= interaction.min_shape_size && shape.height >= interaction.min_shape_size)
        {
            return Err(SettingsError::invalid(
                "shape_defaults",
                "default size must not be below interaction.min_shape_size",
            ));
        }
        if !(shape.stroke_width >= 0.0) || !(self.connector_defaults.stroke_width > 0.0) {
            return Err(SettingsError::invalid("stroke_width", "must be positive"));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Location of the editor config file in the platform config directory
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            SettingsError::ConfigDirectory("no platform config directory available".to_string())
        })
}
