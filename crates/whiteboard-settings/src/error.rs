//! Settings errors

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// A value failed [`crate::EditorConfig::validate`].
    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: String, reason: String },

    /// The file extension is neither `.json` nor `.toml`.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("no config directory: {0}")]
    ConfigDirectory(String),

    #[error("config I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML config: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("could not write TOML config: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl SettingsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending setting for validation failures.
    pub fn key(&self) -> Option<&str> {
        match self {
            SettingsError::Invalid { key, .. } => Some(key),
            _ => None,
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;
