//! Settings store backed by a single JSON file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};
use userconf_core::{validate_key, Document, Value};

use crate::finite::check_finite;
use crate::{Result, SettingsError};

const INDENT: &[u8] = b"    ";

/// One settings file and its in-memory document.
///
/// The in-memory document is the source of truth for the lifetime of the
/// store. Concurrent stores on the same file are not coordinated: the last
/// writer wins.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    data: Document,
}

impl SettingsStore {
    /// Open the settings file at `path`.
    ///
    /// A relative path is made absolute against the current directory.
    /// Nothing is created on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = std::path::absolute(path.as_ref()).map_err(SettingsError::ReadError)?;
        let data = load_document(&path)?;
        Ok(Self { path, data })
    }

    /// Absolute path of the settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All setting keys, in document order
    pub fn get_all(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read-only view of the whole document
    pub fn document(&self) -> &Document {
        &self.data
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.data.contains_key(key))
    }

    pub fn get(&self, key: &str) -> Result<Option<&Value>> {
        validate_key(key)?;
        Ok(self.data.get(key))
    }

    /// Value of `key`, or `default` as given when the key is absent
    pub fn get_or(&self, key: &str, default: Value) -> Result<Value> {
        Ok(self.get(key)?.cloned().unwrap_or(default))
    }

    /// Value of `key` converted to `T`
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(SettingsError::SerializationError),
            None => Ok(None),
        }
    }

    /// Insert or overwrite a setting and write the document.
    ///
    /// An existing key keeps its position; a new key is appended. NaN and
    /// infinite floats are rejected since JSON cannot hold them.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        validate_key(key)?;
        check_finite(value).map_err(SettingsError::SerializationError)?;
        let value = serde_json::to_value(value).map_err(SettingsError::SerializationError)?;

        let mut next = self.data.clone();
        next.insert(key.to_string(), value);
        self.commit(next)
    }

    /// Remove a setting if present.
    ///
    /// Returns whether a setting was removed. The file is only rewritten
    /// when something was removed.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        if !self.data.contains_key(key) {
            return Ok(false);
        }

        let mut next = self.data.clone();
        next.shift_remove(key);
        self.commit(next)?;
        Ok(true)
    }

    /// Remove a setting, failing if it does not exist
    pub fn delete_existing(&mut self, key: &str) -> Result<()> {
        if self.delete(key)? {
            Ok(())
        } else {
            Err(SettingsError::KeyNotFound(key.to_string()))
        }
    }

    /// Remove every setting.
    ///
    /// The settings file is deleted, then its directory if that left it
    /// empty. A directory that still holds other content is kept.
    ///
    /// If removing the directory fails, the error is returned but the file is
    /// already gone and the in-memory document already cleared.
    pub fn delete_all(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => info!("Removed settings file {:?}", self.path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(SettingsError::RemoveError(e)),
        }
        self.data.clear();

        if let Some(parent) = self.path.parent() {
            remove_dir_if_empty(parent)?;
        }
        Ok(())
    }

    /// Re-read the file, replacing the in-memory document.
    ///
    /// On error the current document is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.data = load_document(&self.path)?;
        Ok(())
    }

    fn commit(&mut self, next: Document) -> Result<()> {
        save_document(&self.path, &next)?;
        self.data = next;
        Ok(())
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No settings file at {:?}, starting empty", path);
            return Ok(Document::new());
        }
        Err(e) => return Err(SettingsError::ReadError(e)),
    };

    let value: Value = serde_json::from_slice(&bytes).map_err(|source| SettingsError::CorruptData {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(data) => {
            debug!("Loaded {} settings from {:?}", data.len(), path);
            Ok(data)
        }
        other => Err(SettingsError::NotAnObject {
            path: path.to_path_buf(),
            found: json_type_name(&other),
        }),
    }
}

fn save_document(path: &Path, data: &Document) -> Result<()> {
    let content = to_pretty_json(data)?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(SettingsError::CreateDirError)?;
            info!("Created settings directory {:?}", parent);
        }
    }

    fs::write(path, content).map_err(SettingsError::WriteError)?;
    debug!("Saved {} settings to {:?}", data.len(), path);
    Ok(())
}

fn to_pretty_json(data: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    data.serialize(&mut ser).map_err(SettingsError::SerializationError)?;
    Ok(buf)
}

fn remove_dir_if_empty(dir: &Path) -> Result<()> {
    let mut entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(SettingsError::RemoveError(e)),
    };

    if entries.next().is_none() {
        fs::remove_dir(dir).map_err(SettingsError::RemoveError)?;
        info!("Removed empty settings directory {:?}", dir);
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
