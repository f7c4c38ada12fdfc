//! Validated application ID

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{validate_key, KeyValidationError};

/// An application ID that already passed the key grammar.
///
/// The data directory of an application is `~/.<app_id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    /// Validate and wrap an ID
    pub fn new(id: impl Into<String>) -> Result<Self, KeyValidationError> {
        let id = id.into();
        validate_key(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the data directory: a period followed by the ID
    pub fn dir_name(&self) -> String {
        format!(".{}", self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for AppId {
    type Err = KeyValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for AppId {
    type Error = KeyValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for AppId {
    type Error = KeyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for AppId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        AppId::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_id_valid() {
        let id = AppId::new("userconf_test_app").unwrap();
        assert_eq!(id.as_str(), "userconf_test_app");
        assert_eq!(id.to_string(), "userconf_test_app");
        assert_eq!(id.dir_name(), ".userconf_test_app");
    }

    #[test]
    fn test_app_id_invalid() {
        assert!(AppId::new("userconf#test#app").is_err());
        assert!(AppId::new("").is_err());
        assert!("has space".parse::<AppId>().is_err());
    }

    #[test]
    fn test_app_id_conversions() {
        let a: AppId = "my-app".parse().unwrap();
        let b = AppId::try_from("my-app").unwrap();
        let c = AppId::try_from(String::from("my-app")).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(c.into_string(), "my-app");
    }

    #[test]
    fn test_app_id_serde() {
        let id = AppId::new("my_app").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"my_app\"");

        let parsed: AppId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<AppId>("\"my app\"").is_err());
    }
}
