use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Default address of the redis server.
pub const DEFAULT_URI: &str = "127.0.0.1:6379";

/// Default key prefix prepended to every asynq key.
pub const DEFAULT_PREFIX: &str = "test:";

/// File names searched for in the home directory when no `--config` is given.
pub const DEFAULT_CONFIG_NAMES: [&str; 2] = [".asynq.yaml", ".asynq.yml"];

/// Connection settings for the redis instance backing asynq.
///
/// Every field is optional in the YAML file; missing keys keep their default.
///
/// # YAML format
///
/// ```yaml
/// uri: 10.0.0.4:6379
/// db: 2
/// password: hunter2
/// prefix: "prod:"
/// ```
///
/// # Examples
///
/// ```
/// use asynq_inspector::config::Config;
///
/// let config = Config::parse_from_str("uri: 10.0.0.4:6380\ndb: 3\n").unwrap();
/// assert_eq!(config.uri, "10.0.0.4:6380");
/// assert_eq!(config.db, 3);
/// assert_eq!(config.prefix, "test:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redis server address, either `host:port` or a `redis://` URL.
    pub uri: String,
    /// Redis database number.
    pub db: i64,
    /// Password used when connecting; empty means no authentication.
    pub password: String,
    /// Prefix prepended to asynq keys.
    pub prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            db: 0,
            password: String::new(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Values given explicitly on the command line.
///
/// These win over the config file and the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub uri: Option<String>,
    pub db: Option<i64>,
    pub password: Option<String>,
    pub prefix: Option<String>,
}

impl Config {
    /// Loads a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The file cannot be read
    /// * The file contents are not valid YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigParse(format!("Failed to read config file: {}", e)))?;

        Self::parse_from_str(&content)
    }

    /// Parses a configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn parse_from_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigParse(format!("Failed to parse YAML config: {}", e)))
    }

    /// Builds the effective configuration from every source, using the
    /// process environment and the current user's home directory.
    ///
    /// Returns the configuration together with the path of the file that was
    /// read, if any.
    #[tracing::instrument(skip_all, fields(explicit_path = ?explicit))]
    pub fn load(
        explicit: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>)> {
        Self::from_sources(explicit, dirs::home_dir().as_deref(), overrides, |key| {
            std::env::var(key).ok()
        })
    }

    /// Layers defaults, config file, environment and command line overrides,
    /// in that order.
    ///
    /// An explicitly named file must exist. Without one, the first of
    /// [`DEFAULT_CONFIG_NAMES`] found in `home` is used; finding none is fine.
    pub fn from_sources<F>(
        explicit: Option<&Path>,
        home: Option<&Path>,
        overrides: &ConfigOverrides,
        env: F,
    ) -> Result<(Self, Option<PathBuf>)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => home.and_then(|dir| {
                DEFAULT_CONFIG_NAMES
                    .iter()
                    .map(|name| dir.join(name))
                    .find(|candidate| candidate.is_file())
            }),
        };

        let mut config = match &file {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using config file");
                Self::from_file(path)?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(env)?;
        config.apply_overrides(overrides);
        Ok((config, file))
    }

    /// Applies `URI`, `DB`, `PASSWORD` and `PREFIX` from the given lookup.
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = env("URI") {
            self.uri = uri;
        }
        if let Some(db) = env("DB") {
            self.db = db.trim().parse().map_err(|_| {
                Error::ConfigParse(format!("DB must be an integer, got '{}'", db))
            })?;
        }
        if let Some(password) = env("PASSWORD") {
            self.password = password;
        }
        if let Some(prefix) = env("PREFIX") {
            self.prefix = prefix;
        }
        Ok(())
    }

    /// Applies values passed on the command line.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(uri) = &overrides.uri {
            self.uri = uri.clone();
        }
        if let Some(db) = overrides.db {
            self.db = db;
        }
        if let Some(password) = &overrides.password {
            self.password = password.clone();
        }
        if let Some(prefix) = &overrides.prefix {
            self.prefix = prefix.clone();
        }
    }

    /// Connection URL for the redis client.
    ///
    /// A bare `host:port` gets the `redis://` scheme. The database number
    /// becomes the URL path and a non-empty password is embedded as the
    /// userinfo password.
    ///
    /// ```
    /// use asynq_inspector::config::Config;
    ///
    /// let config = Config { db: 2, ..Config::default() };
    /// assert_eq!(config.redis_url().unwrap().as_str(), "redis://127.0.0.1:6379/2");
    /// ```
    pub fn redis_url(&self) -> Result<Url> {
        let raw = if self.uri.contains("://") {
            self.uri.clone()
        } else {
            format!("redis://{}", self.uri)
        };
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::ConfigInvalid(format!("Invalid redis URI '{}': {}", self.uri, e)))?;

        if url.host_str().is_none_or(str::is_empty) {
            return Err(Error::ConfigInvalid(format!(
                "Redis URI '{}' has no host",
                self.uri
            )));
        }

        url.set_path(&format!("/{}", self.db));
        if !self.password.is_empty() {
            url.set_password(Some(&self.password)).map_err(|_| {
                Error::ConfigInvalid(format!("Cannot set password on URI '{}'", self.uri))
            })?;
        }
        Ok(url)
    }
}
