//! UserConf Logging
//!
//! Subscriber setup for binaries. Library crates only emit `tracing` events
//! and never install a subscriber themselves.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::{fmt as fmt_layer, prelude::*, EnvFilter};

/// Default verbosity when `RUST_LOG` is not set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Warnings from dependencies, this level for the userconf crates
    fn directive(&self) -> String {
        format!("warn,userconf={level},userconf_settings={level},userconf_files={level}", level = self.as_str())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown log level: {0}")]
pub struct ParseLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[derive(Error, Debug)]
#[error("Failed to initialize logging: {0}")]
pub struct InitError(#[from] tracing_subscriber::util::TryInitError);

fn filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()))
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn try_init(level: LogLevel) -> Result<(), InitError> {
    tracing_subscriber::registry()
        .with(fmt_layer::layer().with_writer(std::io::stderr))
        .with(filter(level))
        .try_init()?;
    Ok(())
}

/// Like [`try_init`], ignoring an already installed subscriber
pub fn init(level: LogLevel) {
    let _ = try_init(level);
}
