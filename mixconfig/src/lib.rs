//! # MonthlyMix Configuration Module
//!
//! This module provides configuration management for MonthlyMix, including:
//! - Merging an optional `config.yaml` with the embedded default configuration
//! - Environment variable overrides
//! - Spotify credentials read from the `SPOTIPY_*` variables
//! - Typed extraction of whole sections
//!
//! Unlike a process-wide singleton, a [`Config`] is a plain value: it is
//! loaded once by the binary and handed to every collaborator that needs it.
//!
//! ## Usage
//!
//! ```no_run
//! use mixconfig::Config;
//!
//! let config = Config::load(None)?;
//! let credentials = config.credentials()?;
//! let batch_size = config.get_insert_batch_size();
//! # Ok::<(), mixconfig::ConfigError>(())
//! ```

pub mod error;

pub use error::{ConfigError, Result};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

// Configuration par défaut intégrée
const DEFAULT_CONFIG: &str = include_str!("monthlymix.yaml");

const ENV_CONFIG_DIR: &str = "MONTHLYMIX_CONFIG";
const ENV_PREFIX: &str = "MONTHLYMIX_CONFIG__";
const CONFIG_DIR_NAME: &str = ".monthlymix";
const CONFIG_FILE_NAME: &str = "config.yaml";

// Default values for configuration
const DEFAULT_INSERT_BATCH_SIZE: usize = 100;
const DEFAULT_LOG_MIN_LEVEL: &str = "info";

/// Variables d'environnement des identifiants Spotify, et la clé associée
/// dans la section `spotify`
const CREDENTIAL_VARS: [(&str, &str); 4] = [
    ("SPOTIPY_CLIENT_ID", "client_id"),
    ("SPOTIPY_CLIENT_SECRET", "client_secret"),
    ("SPOTIPY_REDIRECT_URI", "redirect_uri"),
    ("SPOTIPY_REFRESH_TOKEN", "refresh_token"),
];

/// Macro to generate a getter for usize values with default
macro_rules! impl_usize_config {
    ($getter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> usize {
            match self.get_value($path) {
                Ok(Value::Number(n)) => n.as_u64().map(|v| v as usize).unwrap_or($default),
                Ok(Value::String(s)) => s.trim().parse().unwrap_or($default),
                _ => $default,
            }
        }
    };
}

/// Identifiants OAuth de l'application Spotify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Jeton de rafraîchissement, absent tant que l'autorisation n'a pas été faite
    pub refresh_token: Option<String>,
}

/// Configuration immuable de MonthlyMix
///
/// # Examples
///
/// ```
/// use mixconfig::Config;
///
/// let config = Config::from_sources(Some("spotify:\n  insert_batch_size: 50\n"), Vec::new())?;
/// assert_eq!(config.get_insert_batch_size(), 50);
/// # Ok::<(), mixconfig::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    source: Option<PathBuf>,
    data: Value,
}

impl Config {
    /// Finds a config directory by trying different locations in order
    fn find_config_dir(directory: Option<&Path>, vars: &[(String, String)]) -> PathBuf {
        // 1. Try provided directory
        if let Some(dir) = directory {
            return dir.to_path_buf();
        }

        // 2. Try environment variable
        if let Some((_, env_path)) = vars.iter().find(|(k, _)| k == ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %env_path, "Trying to load config from env");
            return PathBuf::from(env_path);
        }

        // 3. Try current directory
        if Path::new(CONFIG_DIR_NAME).exists() {
            return PathBuf::from(CONFIG_DIR_NAME);
        }

        // 4. Try home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(CONFIG_DIR_NAME);
            if home_config.exists() {
                return home_config;
            }
        }

        PathBuf::from(CONFIG_DIR_NAME)
    }

    /// Loads the configuration using the process environment
    ///
    /// The directory is searched in the following order:
    /// 1. The provided `directory`
    /// 2. The `MONTHLYMIX_CONFIG` environment variable
    /// 3. `.monthlymix` in the current directory
    /// 4. `.monthlymix` in the user's home directory
    ///
    /// A missing `config.yaml` is not an error: the embedded defaults are used.
    pub fn load(directory: Option<&Path>) -> Result<Self> {
        Self::load_with_vars(directory, env::vars())
    }

    /// Same as [`Config::load`] with an explicit list of environment variables
    pub fn load_with_vars<I>(directory: Option<&Path>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();
        let config_dir = Self::find_config_dir(directory, &vars);
        info!(config_dir = %config_dir.display(), "Using config directory");

        let config_file = config_dir.join(CONFIG_FILE_NAME);
        let external = if config_file.is_file() {
            let text = fs::read_to_string(&config_file).map_err(|source| ConfigError::Io {
                path: config_file.display().to_string(),
                source,
            })?;
            info!(config_file = %config_file.display(), "Loaded config file");
            Some(text)
        } else {
            info!(config_file = %config_file.display(), "Config file not found, using default embedded config");
            None
        };

        let mut config = Self::from_sources(external.as_deref(), vars)?;
        if external.is_some() {
            config.source = Some(config_file);
        }
        Ok(config)
    }

    /// Builds a configuration from an optional YAML document and a list of
    /// environment variables, without touching the filesystem
    pub fn from_sources<I>(external: Option<&str>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut value: Value = serde_yaml::from_str(DEFAULT_CONFIG)?;

        if let Some(text) = external {
            let external_value: Value = serde_yaml::from_str(text)?;
            // Un fichier vide se lit comme `null`
            if !external_value.is_null() {
                merge_yaml(&mut value, &lower_keys_value(external_value));
            }
        }

        let mut value = lower_keys_value(value);
        apply_env_overrides(&mut value, vars);

        Ok(Config {
            source: None,
            data: value,
        })
    }

    /// Path of the `config.yaml` file that was merged, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Gets a configuration value at the specified path
    ///
    /// # Arguments
    ///
    /// * `path` - Array of keys representing the path (e.g., `&["feed", "limit"]`)
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let mut current = &self.data;
        for (i, key) in path.iter().enumerate() {
            match current {
                Value::Mapping(map) => match map.get(Value::String(key.to_lowercase())) {
                    Some(next) => current = next,
                    None => return Err(ConfigError::PathNotFound(path[..=i].join("."))),
                },
                _ => return Err(ConfigError::PathNotFound(path[..=i].join("."))),
            }
        }
        Ok(current.clone())
    }

    /// Deserializes a whole section into a typed settings structure
    ///
    /// ```
    /// use mixconfig::Config;
    /// use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct Logger {
    ///     min_level: String,
    /// }
    ///
    /// let config = Config::from_sources(None, Vec::new())?;
    /// let logger: Logger = config.section(&["logger"])?;
    /// assert_eq!(logger.min_level, "info");
    /// # Ok::<(), mixconfig::ConfigError>(())
    /// ```
    pub fn section<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T> {
        let value = self.get_value(path)?;
        serde_yaml::from_value(value).map_err(|e| ConfigError::InvalidSection {
            path: path.join("."),
            message: e.to_string(),
        })
    }

    /// Returns the Spotify credentials
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingCredentials`] lists the variables among client
    /// id, client secret and redirect URI that are absent or empty. The
    /// refresh token is optional at this stage.
    pub fn credentials(&self) -> Result<SpotifyCredentials> {
        let read = |key: &str| {
            self.get_value(&["spotify", key])
                .ok()
                .and_then(|v| scalar_to_string(&v))
                .filter(|s| !s.trim().is_empty())
        };

        let client_id = read("client_id");
        let client_secret = read("client_secret");
        let redirect_uri = read("redirect_uri");

        let missing: Vec<String> = CREDENTIAL_VARS[..3]
            .iter()
            .zip([&client_id, &client_secret, &redirect_uri])
            .filter(|(_, value)| value.is_none())
            .map(|((var, _), _)| var.to_string())
            .collect();

        match (client_id, client_secret, redirect_uri) {
            (Some(client_id), Some(client_secret), Some(redirect_uri)) => Ok(SpotifyCredentials {
                client_id,
                client_secret,
                redirect_uri,
                refresh_token: read("refresh_token"),
            }),
            _ => Err(ConfigError::MissingCredentials(missing)),
        }
    }

    impl_usize_config!(
        get_insert_batch_size,
        &["spotify", "insert_batch_size"],
        DEFAULT_INSERT_BATCH_SIZE
    );

    /// Récupère le niveau de log minimum depuis la configuration
    pub fn get_log_min_level(&self) -> String {
        match self.get_value(&["logger", "min_level"]) {
            Ok(Value::String(s)) if !s.trim().is_empty() => s,
            _ => DEFAULT_LOG_MIN_LEVEL.to_string(),
        }
    }
}

/// Applies `MONTHLYMIX_CONFIG__A__B=value` overrides and copies the
/// `SPOTIPY_*` credentials into the `spotify` section
fn apply_env_overrides<I>(config: &mut Value, vars: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for (key, value) in vars {
        if let Some(rest) = key.strip_prefix(ENV_PREFIX) {
            let key_path = rest.split("__").collect::<Vec<_>>();
            debug!(key = %key, "Applying config override from env");
            set_value_internal(config, &key_path, convert_env_value(&value));
        } else if let Some((_, field)) = CREDENTIAL_VARS.iter().find(|(var, _)| *var == key) {
            // Jamais interprété en YAML : un identifiant numérique reste une chaîne
            set_value_internal(config, &["spotify", field], Value::String(value));
        }
    }
}

fn set_value_internal(data: &mut Value, path: &[&str], value: Value) {
    if path.is_empty() {
        *data = value;
        return;
    }
    if !data.is_mapping() {
        *data = Value::Mapping(Mapping::new());
    }
    if let Value::Mapping(map) = data {
        let key = Value::String(path[0].to_lowercase());
        if path.len() == 1 {
            map.insert(key, value);
        } else {
            let entry = map.entry(key).or_insert(Value::Mapping(Mapping::new()));
            set_value_internal(entry, &path[1..], value);
        }
    }
}

fn convert_env_value(value: &str) -> Value {
    match serde_yaml::from_str::<Value>(value) {
        Ok(parsed) if !parsed.is_mapping() && !parsed.is_sequence() && !parsed.is_null() => {
            parsed
        }
        _ => Value::String(value.to_string()),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lower_keys_value(value: Value) -> Value {
    match value {
        Value::Mapping(map) => {
            let mut new_map = Mapping::new();
            for (k, v) in map {
                let k = match k {
                    Value::String(s) => Value::String(s.to_lowercase()),
                    other => other,
                };
                new_map.insert(k, lower_keys_value(v));
            }
            Value::Mapping(new_map)
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(lower_keys_value).collect()),
        _ => value,
    }
}

/// Merges external YAML configuration into default configuration
///
/// Mappings are merged key by key; scalars and sequences from `external`
/// replace the default ones.
fn merge_yaml(default: &mut Value, external: &Value) {
    match (default, external) {
        (Value::Mapping(dmap), Value::Mapping(emap)) => {
            for (k, v) in emap {
                match dmap.get_mut(k) {
                    Some(dv) => merge_yaml(dv, v),
                    None => {
                        dmap.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        (d, e) => *d = e.clone(),
    }
}
