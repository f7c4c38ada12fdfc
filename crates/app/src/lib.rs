//! UserConf
//!
//! Per-user settings and files for one application, stored under
//! `~/.<app_id>`.
//!
//! ## Layout
//!
//! ```text
//! <home>/.<app_id>/settings.json   key-value settings, pretty JSON
//! <home>/.<app_id>/files/          application-owned files
//! ```
//!
//! Nothing is created on disk until a setting is written or a file path is
//! requested.
//!
//! ## Usage
//!
//! ```no_run
//! use userconf::UserConf;
//!
//! let mut conf = UserConf::new("my_app")?;
//!
//! conf.settings_mut().set("theme", "dark")?;
//! let theme = conf.settings().get("theme")?;
//!
//! let db = conf.files().get_path("cache.db")?;
//! # Ok::<(), userconf::UserConfError>(())
//! ```

mod builder;

pub use builder::UserConfBuilder;
pub use userconf_core::{is_valid_key, validate_key, AppId, Document, KeyValidationError, Value};
pub use userconf_files::{FilesError, FilesManager};
pub use userconf_logging::LogLevel;
pub use userconf_settings::{SettingsError, SettingsStore};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum UserConfError {
    #[error(transparent)]
    InvalidAppId(#[from] KeyValidationError),

    #[error("Missing application ID")]
    MissingAppId,

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Files error: {0}")]
    Files(#[from] FilesError),
}

pub type Result<T> = std::result::Result<T, UserConfError>;

/// Settings and files of one application
#[derive(Debug)]
pub struct UserConf {
    home: PathBuf,
    app_id: AppId,
    data_path: PathBuf,
    settings: SettingsStore,
    files: FilesManager,
}

impl UserConf {
    /// Bind to `app_id` under the current user's home directory
    pub fn new(app_id: &str) -> Result<Self> {
        Self::builder().app_id(app_id).build()
    }

    pub fn builder() -> UserConfBuilder {
        UserConfBuilder::new()
    }

    pub(crate) fn bind(home: PathBuf, app_id: AppId) -> Result<Self> {
        let data_path = userconf_files::data_dir(&home, &app_id);
        let settings = SettingsStore::open(userconf_files::settings_file(&data_path))?;
        let files = FilesManager::new(userconf_files::files_dir(&data_path))?;

        info!("Using application {} at {:?}", app_id, data_path);
        Ok(Self {
            home,
            app_id,
            data_path,
            settings,
            files,
        })
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    /// Rebind to another application.
    ///
    /// Both managers are rebuilt from scratch. If the new ID is invalid or
    /// its settings cannot be loaded, the current binding is kept.
    pub fn set_app_id(&mut self, app_id: &str) -> Result<()> {
        let app_id = AppId::new(app_id)?;
        *self = Self::bind(self.home.clone(), app_id)?;
        Ok(())
    }

    /// Home directory the data directory lives in
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Absolute path of the data directory, `<home>/.<app_id>`
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    pub fn files(&self) -> &FilesManager {
        &self.files
    }
}
