//! Configuration file handling for finsight.
//!
//! The configuration file is stored at `$FINSIGHT_HOME/config.json`. It holds the user's settings
//! and, optionally, the locations of the ledger files and the user whose records are read by
//! default.

use crate::settings::Settings;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "finsight";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const TRANSACTIONS_CSV: &str = "transactions.csv";
const DEBTS_CSV: &str = "debts.csv";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FINSIGHT_HOME` and from there it loads `$FINSIGHT_HOME/config.json`. It provides
/// the paths of the ledger files, which are either configured or expected in the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and an initial `config.json` holding `settings`.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or if any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, settings: Settings) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the finsight home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile {
            settings,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;
        debug!("Created {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Validates that `finsight_home` and its config file exist, then loads the config file.
    pub async fn load(finsight_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = finsight_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The finsight home directory is missing, run 'finsight init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> &Settings {
        &self.config_file.settings
    }

    /// The user whose records are read when no user is given on the command line.
    pub fn default_user(&self) -> Option<&str> {
        self.config_file.default_user.as_deref()
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.resolve(self.config_file.transactions_path())
    }

    pub fn debts_path(&self) -> PathBuf {
        self.resolve(self.config_file.debts_path())
    }

    /// Replaces the settings in `config.json`, leaving the rest of the file as it is.
    pub async fn save_settings(&self, settings: Settings) -> Result<()> {
        let config_file = ConfigFile {
            settings,
            ..self.config_file.clone()
        };
        config_file.save(&self.config_path).await
    }

    /// Checks if `p` is relative, and if so, resolves it against the home directory.
    fn resolve(&self, p: PathBuf) -> PathBuf {
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "finsight",
///   "config_version": 1,
///   "settings": {
///     "display_name": "Sam",
///     "currency": "USD",
///     "locale": "en-US",
///     "timezone": "America/Chicago",
///     "theme": "system"
///   },
///   "default_user": "sam",
///   "transactions_path": "ledger/transactions.csv"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "finsight"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    #[serde(default)]
    settings: Settings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_user: Option<String>,

    /// Path to the transactions ledger (relative to the home directory or absolute).
    /// Defaults to $FINSIGHT_HOME/transactions.csv
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transactions_path: Option<PathBuf>,

    /// Path to the debts ledger (relative to the home directory or absolute).
    /// Defaults to $FINSIGHT_HOME/debts.csv
    #[serde(default, skip_serializing_if = "Option::is_none")]
    debts_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            settings: Settings::default(),
            default_user: None,
            transactions_path: None,
            debts_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config file version {} is newer than this program supports ({})",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn transactions_path(&self) -> PathBuf {
        self.transactions_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(TRANSACTIONS_CSV))
    }

    fn debts_path(&self) -> PathBuf {
        self.debts_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEBTS_CSV))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Currency, Theme};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("finsight_home");
        let settings = Settings {
            display_name: "Sam".to_string(),
            currency: Currency::Eur,
            ..Settings::default()
        };

        let created = Config::create(&home, settings.clone()).await.unwrap();
        assert!(created.config_path().is_file());
        assert_eq!(created.transactions_path(), created.root().join(TRANSACTIONS_CSV));
        assert_eq!(created.debts_path(), created.root().join(DEBTS_CSV));

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.settings(), &settings);
        assert_eq!(loaded.default_user(), None);
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), Settings::default()).await.unwrap();
        let err = Config::create(dir.path(), Settings::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path().join("nope")).await.is_err());
        // home exists but has no config.json
        let err = Config::load(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("config file is missing"));
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        let json = r#"{
            "app_name": "finsight",
            "config_version": 1,
            "default_user": "sam",
            "debts_path": "/var/data/debts.csv"
        }"#;
        utils::write(&path, json).await.unwrap();

        let config = Config::load(dir.path()).await.unwrap();
        assert_eq!(config.settings(), &Settings::default());
        assert_eq!(config.default_user(), Some("sam"));
        assert_eq!(config.debts_path(), PathBuf::from("/var/data/debts.csv"));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(&path, r#"{"app_name": "pennywise", "config_version": 1}"#)
            .await
            .unwrap();
        let err = ConfigFile::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_save_settings_keeps_other_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_JSON);
        utils::write(
            &path,
            r#"{"app_name": "finsight", "config_version": 1, "default_user": "kim"}"#,
        )
        .await
        .unwrap();

        let config = Config::load(dir.path()).await.unwrap();
        let settings = Settings {
            theme: Theme::Dark,
            ..Settings::default()
        };
        config.save_settings(settings).await.unwrap();

        let reloaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(reloaded.settings().theme, Theme::Dark);
        assert_eq!(reloaded.default_user(), Some("kim"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("default_user"));
        assert!(!json.contains("transactions_path"));
        assert!(json.contains("\"settings\""));
    }
}
