//! UserConf CLI
//!
//! Inspect and edit the settings of an application from the command line.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use userconf::{AppId, LogLevel, UserConf};

/// UserConf - per-user application settings
#[derive(Parser)]
#[command(name = "userconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Application ID (letters, numbers, hyphens, underscores)
    #[arg(short, long)]
    app: AppId,

    /// Use this directory instead of the user home directory
    #[arg(long)]
    home: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List setting keys in document order
    List,

    /// Print the value of a setting
    Get {
        key: String,

        /// Printed when the setting does not exist (JSON or plain text)
        #[arg(short, long)]
        default: Option<String>,
    },

    /// Set a setting. The value is parsed as JSON, or stored as a string
    Set { key: String, value: String },

    /// Delete a setting
    Delete {
        key: String,

        /// Fail if the setting does not exist
        #[arg(long)]
        strict: bool,
    },

    /// Delete all settings
    Clear,

    /// Print the data directory, or the path of a managed file
    Path { name: Option<String> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let mut builder = UserConf::builder().app_id(cli.app.as_str()).log_level(level);
    if let Some(home) = cli.home {
        builder = builder.home(home);
    }
    let mut conf = builder.build().context("Failed to open user configuration")?;
    debug!("Settings file: {:?}", conf.settings().path());

    let stdout = io::stdout();
    run(cli.command, &mut conf, &mut stdout.lock())
}

fn run(command: Commands, conf: &mut UserConf, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::List => {
            for key in conf.settings().get_all() {
                writeln!(out, "{}", key)?;
            }
        }
        Commands::Get { key, default } => {
            let default = default.map(|raw| parse_value(&raw)).unwrap_or(Value::Null);
            let value = conf.settings().get_or(&key, default)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        Commands::Set { key, value } => {
            conf.settings_mut()
                .set(&key, &parse_value(&value))
                .with_context(|| format!("Failed to set {key:?}"))?;
        }
        Commands::Delete { key, strict } => {
            let settings = conf.settings_mut();
            if strict {
                settings.delete_existing(&key)?;
            } else if !settings.delete(&key)? {
                debug!("Setting {:?} did not exist", key);
            }
        }
        Commands::Clear => {
            conf.settings_mut().delete_all().context("Failed to delete settings")?;
        }
        Commands::Path { name } => {
            let path = match name {
                Some(name) => conf.files().get_path(&name)?,
                None => conf.data_path().to_path_buf(),
            };
            writeln!(out, "{}", path.display())?;
        }
    }

    Ok(())
}

/// JSON if it parses, otherwise the raw text as a string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use userconf::SettingsError;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("[1, 2]"), json!([1, 2]));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("dark"), json!("dark"));
        assert_eq!(parse_value("{broken"), json!("{broken"));
    }

    #[test]
    fn test_invalid_app_rejected_by_parser() {
        let result = Cli::try_parse_from(["userconf", "--app", "bad id", "list"]);
        assert!(result.is_err());
    }

    fn conf_in(home: &std::path::Path) -> UserConf {
        UserConf::builder().app_id("cli_app").home(home).build().unwrap()
    }

    fn run_args(conf: &mut UserConf, args: &[&str]) -> Result<String> {
        let mut argv = vec!["userconf", "--app", "cli_app"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;

        let mut out = Vec::new();
        run(cli.command, conf, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_run_set_then_get() {
        let home = tempfile::tempdir().unwrap();
        let mut conf = conf_in(home.path());

        run_args(&mut conf, &["set", "theme", "dark"]).unwrap();
        run_args(&mut conf, &["set", "size", "12"]).unwrap();

        assert_eq!(run_args(&mut conf, &["get", "theme"]).unwrap(), "\"dark\"\n");
        assert_eq!(run_args(&mut conf, &["get", "size"]).unwrap(), "12\n");
        assert_eq!(run_args(&mut conf, &["list"]).unwrap(), "theme\nsize\n");
        assert!(home.path().join(".cli_app").join("settings.json").exists());
    }

    #[test]
    fn test_run_get_default() {
        let home = tempfile::tempdir().unwrap();
        let mut conf = conf_in(home.path());

        assert_eq!(run_args(&mut conf, &["get", "missing"]).unwrap(), "null\n");
        assert_eq!(
            run_args(&mut conf, &["get", "missing", "--default", "light"]).unwrap(),
            "\"light\"\n"
        );
        assert!(!home.path().join(".cli_app").exists());
    }

    #[test]
    fn test_run_delete() {
        let home = tempfile::tempdir().unwrap();
        let mut conf = conf_in(home.path());
        run_args(&mut conf, &["set", "theme", "dark"]).unwrap();

        run_args(&mut conf, &["delete", "theme"]).unwrap();
        run_args(&mut conf, &["delete", "theme"]).unwrap();

        let err = run_args(&mut conf, &["delete", "theme", "--strict"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SettingsError>(),
            Some(SettingsError::KeyNotFound(key)) if key == "theme"
        ));
    }

    #[test]
    fn test_run_clear() {
        let home = tempfile::tempdir().unwrap();
        let mut conf = conf_in(home.path());
        run_args(&mut conf, &["set", "a", "1"]).unwrap();
        run_args(&mut conf, &["set", "b", "2"]).unwrap();

        run_args(&mut conf, &["clear"]).unwrap();
        assert_eq!(run_args(&mut conf, &["list"]).unwrap(), "");
        assert!(!home.path().join(".cli_app").exists());
    }

    #[test]
    fn test_run_path() {
        let home = tempfile::tempdir().unwrap();
        let mut conf = conf_in(home.path());
        let data = home.path().join(".cli_app");

        assert_eq!(run_args(&mut conf, &["path"]).unwrap(), format!("{}\n", data.display()));
        assert_eq!(
            run_args(&mut conf, &["path", "cache.db"]).unwrap(),
            format!("{}\n", data.join("files").join("cache.db").display())
        );
    }

    #[test]
    fn test_parse_set() {
        let cli = Cli::try_parse_from(["userconf", "-a", "my_app", "set", "theme", "dark"]).unwrap();
        assert_eq!(cli.app.as_str(), "my_app");
        match cli.command {
            Commands::Set { key, value } => {
                assert_eq!(key, "theme");
                assert_eq!(value, "dark");
            }
            _ => panic!("expected set"),
        }
    }
}
