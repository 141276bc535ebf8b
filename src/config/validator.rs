use crate::config::Config;
use crate::error::{Error, Result};

/// Validates the redis connection settings
pub fn validate_connection(config: &Config) -> Result<()> {
    if config.uri.trim().is_empty() {
        return Err(Error::ConfigInvalid("Redis URI is empty".to_string()));
    }

    if config.db < 0 {
        return Err(Error::ConfigInvalid(format!(
            "Redis database number must not be negative, got {}",
            config.db
        )));
    }

    // Host and scheme problems surface while building the URL
    config.redis_url()?;

    Ok(())
}

/// Full configuration validation
pub fn validate_config(config: &Config) -> Result<()> {
    validate_connection(config)?;

    // An empty prefix is legal; it addresses keys without namespace
    Ok(())
}
