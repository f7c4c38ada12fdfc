//! UserConf Settings
//!
//! Key-value settings persisted as one JSON document.
//!
//! ## Behaviour
//!
//! - The document is read once, when the store is opened. A missing file is
//!   an empty document, a file that is not a JSON object is an error.
//! - Every mutation rewrites the whole file, pretty-printed with 4 spaces.
//! - The parent directory is created on the first write, never before.
//! - Key order is insertion order, and overwriting a key keeps its position.
//!
//! ## Usage
//!
//! ```no_run
//! use userconf_settings::SettingsStore;
//!
//! let mut store = SettingsStore::open("/home/me/.my_app/settings.json")?;
//! store.set("theme", "dark")?;
//! assert_eq!(store.get_all(), vec!["theme".to_string()]);
//! store.delete("theme")?;
//! # Ok::<(), userconf_settings::SettingsError>(())
//! ```

mod finite;
mod store;

pub use store::SettingsStore;
pub use userconf_core::{Document, KeyValidationError, Value, SETTINGS_FILE_NAME};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error(transparent)]
    InvalidKey(#[from] KeyValidationError),

    #[error("Failed to serialize setting value: {0}")]
    SerializationError(#[source] serde_json::Error),

    #[error("Corrupt settings file {path:?}: {source}")]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Corrupt settings file {path:?}: expected a JSON object, found {found}")]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("Setting {0:?} does not exist")]
    KeyNotFound(String),

    #[error("Failed to read settings: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("Failed to write settings: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("Failed to create settings directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    #[error("Failed to remove settings: {0}")]
    RemoveError(#[source] std::io::Error),
}

impl SettingsError {
    /// Whether the file on disk exists but could not be used as a document
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData { .. } | Self::NotAnObject { .. })
    }

    /// The underlying filesystem error, if this is one
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::ReadError(e) | Self::WriteError(e) | Self::CreateDirError(e) | Self::RemoveError(e) => {
                Some(e)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
