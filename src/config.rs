//! Configuration file handling.
//!
//! The configuration file is stored at `$FLOW_HOME/config.json` and records which storage
//! backend holds the transactions. The storage itself lives next to it, either as JSON files in
//! `$FLOW_HOME/data/` or as the SQLite database `$FLOW_HOME/flow.sqlite`.

use crate::store::{FileBackend, SqliteBackend, Store};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "finance-flow";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA_DIR: &str = "data";
const FLOW_SQLITE: &str = "flow.sqlite";

/// Where transactions are persisted.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per storage key under `$FLOW_HOME/data/`.
    #[default]
    File,
    /// A key-value table in `$FLOW_HOME/flow.sqlite`.
    Sqlite,
}

serde_plain::derive_display_from_serialize!(BackendKind);
serde_plain::derive_fromstr_from_deserialize!(BackendKind);

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FLOW_HOME` and from there it loads `$FLOW_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, writes an initial `config.json` selecting `backend` and
    /// prepares the backend's storage.
    ///
    /// # Errors
    /// - Returns an error if the directory has already been initialized.
    /// - Returns an error if any file or database operation fails.
    pub fn create(dir: impl Into<PathBuf>, backend: BackendKind) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the flow home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "The flow home directory is already initialized, found '{}'",
                config_path.display()
            );
        }

        let config_file = ConfigFile {
            backend,
            ..ConfigFile::default()
        };
        config_file.save(&config_path)?;

        let config = Self {
            root,
            config_path,
            config_file,
        };

        // Opening the backend once creates its directory or database file.
        let _ = config.store().context("Unable to initialize storage")?;
        Ok(config)
    }

    /// This will
    /// - validate that `flow_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub fn load(flow_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = flow_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The flow home directory '{}' is missing, run 'flow init' first",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'flow init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;
        debug!("Loaded config from {}", config_path.display());

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

    pub fn backend(&self) -> BackendKind {
        self.config_file.backend
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR)
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.root.join(FLOW_SQLITE)
    }

    /// Opens the configured backend and wraps it in a `Store`.
    pub fn store(&self) -> Result<Store> {
        let store = match self.backend() {
            BackendKind::File => Store::new(FileBackend::open(self.data_dir())?),
            BackendKind::Sqlite => Store::new(SqliteBackend::open(self.sqlite_path())?),
        };
        Ok(store)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "finance-flow",
///   "config_version": 1,
///   "backend": "sqlite"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "finance-flow"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Which storage backend holds the transactions
    #[serde(default)]
    backend: BackendKind,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backend: BackendKind::default(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or was not written by this app
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config file version {} is unsupported. Is a newer version of flow available?",
            config.config_version
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }
}
