//! UserConf Files
//!
//! Per-application directory layout and the managed files area.
//!
//! ```text
//! <home>/.<app_id>/settings.json
//! <home>/.<app_id>/files/<name>
//! ```

mod manager;
mod paths;

pub use manager::FilesManager;
pub use paths::{data_dir, default_data_dir, files_dir, home_dir, settings_file, FILES_DIR_NAME};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilesError {
    #[error("Could not determine the user home directory")]
    HomeNotFound,

    #[error("Invalid file name {0:?}: it must be a non-empty relative path inside the files directory")]
    InvalidName(PathBuf),

    #[error("Failed to resolve path: {0}")]
    ResolveError(#[source] std::io::Error),

    #[error("Failed to create files directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    #[error("Failed to read files directory: {0}")]
    ReadDirError(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilesError>;
