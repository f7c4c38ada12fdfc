//! Managed files area

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::{FilesError, Result};

/// Hands out paths for application-owned files and directories.
///
/// The root directory is created, with its parents, the first time a path is
/// requested. What happens at the returned path is up to the caller.
#[derive(Debug, Clone)]
pub struct FilesManager {
    root_path: PathBuf,
}

impl FilesManager {
    /// Create a manager for `root_path`. A relative path is made absolute.
    pub fn new(root_path: impl AsRef<Path>) -> Result<Self> {
        let root_path = std::path::absolute(root_path.as_ref()).map_err(FilesError::ResolveError)?;
        Ok(Self { root_path })
    }

    /// Absolute path of the root directory
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Absolute path of a managed file or directory, creating the root first
    pub fn get_path(&self, name: impl AsRef<Path>) -> Result<PathBuf> {
        let name = checked_name(name.as_ref())?;
        self.ensure_root()?;
        Ok(self.root_path.join(name))
    }

    /// Whether a managed file or directory exists. Creates nothing.
    pub fn exists(&self, name: impl AsRef<Path>) -> Result<bool> {
        let name = checked_name(name.as_ref())?;
        Ok(self.root_path.join(name).exists())
    }

    /// Sorted names of the entries in the root directory.
    ///
    /// Entries whose names are not valid UTF-8 are skipped.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FilesError::ReadDirError(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(FilesError::ReadDirError)?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => debug!("Skipping non UTF-8 entry {:?}", name),
            }
        }
        names.sort();
        Ok(names)
    }

    fn ensure_root(&self) -> Result<()> {
        if !self.root_path.exists() {
            fs::create_dir_all(&self.root_path).map_err(FilesError::CreateDirError)?;
            info!("Created files directory {:?}", self.root_path);
        }
        Ok(())
    }
}

fn checked_name(name: &Path) -> Result<&Path> {
    let mut has_normal = false;
    for component in name.components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(FilesError::InvalidName(name.to_path_buf()));
            }
        }
    }

    if has_normal {
        Ok(name)
    } else {
        Err(FilesError::InvalidName(name.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".app").join("files");
        let files = FilesManager::new(&root).unwrap();

        assert_eq!(files.root_path(), root.as_path());
        assert!(!root.exists());
    }

    #[test]
    fn test_get_path_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".app").join("files");
        let files = FilesManager::new(&root).unwrap();

        let path = files.get_path("test").unwrap();
        assert_eq!(path, root.join("test"));
        assert!(root.is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn test_get_path_nested_name() {
        let dir = tempfile::tempdir().unwrap();
        let files = FilesManager::new(dir.path().join("files")).unwrap();

        let path = files.get_path("cache/data.bin").unwrap();
        assert_eq!(path, dir.path().join("files").join("cache/data.bin"));
        assert!(!dir.path().join("files").join("cache").exists());
    }

    #[test]
    fn test_invalid_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("files");
        let files = FilesManager::new(&root).unwrap();

        for name in ["", ".", "..", "../escape", "a/../../b", "/etc/passwd"] {
            assert!(
                matches!(files.get_path(name), Err(FilesError::InvalidName(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(!root.exists());
    }

    #[test]
    fn test_exists_and_list() {
        let dir = tempfile::tempdir().unwrap();
        let files = FilesManager::new(dir.path().join("files")).unwrap();

        assert!(files.list().unwrap().is_empty());
        assert!(!files.exists("b.txt").unwrap());

        fs::write(files.get_path("b.txt").unwrap(), "b").unwrap();
        fs::create_dir(files.get_path("a").unwrap()).unwrap();

        assert!(files.exists("b.txt").unwrap());
        assert_eq!(files.list().unwrap(), vec!["a", "b.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let files = FilesManager::new(dir.path().join("files")).unwrap();

        fs::write(files.get_path("plain.txt").unwrap(), "ok").unwrap();
        let raw = files.root_path().join(OsStr::from_bytes(b"bad\xff\xfename"));
        if fs::write(&raw, "raw").is_err() {
            // Some filesystems refuse non UTF-8 names
            return;
        }

        assert_eq!(files.list().unwrap(), vec!["plain.txt"]);
    }

    #[test]
    fn test_relative_root_made_absolute() {
        let files = FilesManager::new("some/relative/files").unwrap();
        assert!(files.root_path().is_absolute());
    }
}
