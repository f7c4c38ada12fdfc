//! Path resolution for application data directories

use std::path::{Path, PathBuf};

use userconf_core::AppId;

use crate::{FilesError, Result};

/// Name of the managed files directory inside an application data directory
pub const FILES_DIR_NAME: &str = "files";

/// The current user's home directory
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(FilesError::HomeNotFound)
}

/// `<home>/.<app_id>`
pub fn data_dir(home: &Path, app_id: &AppId) -> PathBuf {
    home.join(app_id.dir_name())
}

/// Data directory of `app_id` under the current user's home
pub fn default_data_dir(app_id: &AppId) -> Result<PathBuf> {
    Ok(data_dir(&home_dir()?, app_id))
}

/// `<data_dir>/settings.json`
pub fn settings_file(data_dir: &Path) -> PathBuf {
    data_dir.join(userconf_core::SETTINGS_FILE_NAME)
}

/// `<data_dir>/files`
pub fn files_dir(data_dir: &Path) -> PathBuf {
    data_dir.join(FILES_DIR_NAME)
}
