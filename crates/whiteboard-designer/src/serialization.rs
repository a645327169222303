//! Serialization and deserialization for diagram files.
//!
//! A diagram is stored as pretty-printed JSON wrapped in a small envelope
//! carrying the format version, so files written by a newer build are
//! rejected instead of half-read.

use serde::{Deserialize, Serialize};
use std::path::Path;
use whiteboard_core::{Result, StoreError};

use crate::model::Diagram;

/// Diagram file format version
pub const FILE_FORMAT_VERSION: u32 = 1;

/// File extension used for stored diagrams
pub const FILE_EXTENSION: &str = "json";

/// Versioned diagram file envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramFile {
    pub version: u32,
    pub diagram: Diagram,
}

impl DiagramFile {
    pub fn new(diagram: Diagram) -> Self {
        Self {
            version: FILE_FORMAT_VERSION,
            diagram,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(StoreError::from)?)
    }

    /// Parses a file and checks its format version.
    pub fn from_json(content: &str) -> Result<Self> {
        let file: DiagramFile = serde_json::from_str(content).map_err(StoreError::from)?;
        if file.version != FILE_FORMAT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                version: file.version,
                expected: FILE_FORMAT_VERSION,
            }
            .into());
        }
        Ok(file)
    }

    /// Save diagram to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load diagram from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }
}
