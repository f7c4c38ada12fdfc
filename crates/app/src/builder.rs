//! Builder for binding an application ID

use std::path::PathBuf;

use userconf_core::AppId;
use userconf_files::FilesError;
use userconf_logging::LogLevel;

use crate::{Result, UserConf, UserConfError};

/// Builder for [`UserConf`]
#[derive(Debug, Default)]
pub struct UserConfBuilder {
    app_id: Option<String>,
    home: Option<PathBuf>,
    log_level: Option<LogLevel>,
}

impl UserConfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the application ID (required)
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Use `home` instead of the current user's home directory
    pub fn home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Install a logging subscriber at this level when building.
    ///
    /// Leave unset in libraries; an already installed subscriber is kept.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Validate the ID, resolve paths and load the settings
    pub fn build(self) -> Result<UserConf> {
        if let Some(level) = self.log_level {
            // Ignore if already initialized
            let _ = userconf_logging::try_init(level);
        }

        let app_id = AppId::new(self.app_id.ok_or(UserConfError::MissingAppId)?)?;

        let home = match self.home {
            Some(home) => home,
            None => userconf_files::home_dir()?,
        };
        let home = std::path::absolute(&home).map_err(FilesError::ResolveError)?;

        UserConf::bind(home, app_id)
    }
}
