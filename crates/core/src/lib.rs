//! UserConf Core
//!
//! Shared types for the UserConf crates.
//!
//! ## Contents
//!
//! - Key grammar shared by application IDs and setting keys
//! - `AppId` newtype that can only hold a valid ID
//! - `Value` / `Document` aliases over `serde_json` with insertion order kept

mod app_id;
mod error;
mod validation;

pub use app_id::AppId;
pub use error::KeyValidationError;
pub use validation::{is_valid_key, validate_key};

/// Name of the settings file inside an application data directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// A setting value: null, bool, number, string, array or object
pub type Value = serde_json::Value;

/// The full settings document. Keys keep their insertion order.
pub type Document = serde_json::Map<String, Value>;
