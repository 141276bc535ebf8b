/// Error handling module for the asynq inspector.
///
/// This module defines the error types used throughout the library.
/// Only a handful of things can go wrong while inspecting servers: the
/// backend can be unreachable, the configuration can be malformed, or
/// writing the table can fail.
///
/// # Example
///
/// ```
/// use asynq_inspector::error::{Error, Result};
///
/// fn handle_error(result: Result<()>) {
///     match result {
///         Ok(_) => println!("Operation succeeded"),
///         Err(Error::BackendUnavailable(msg)) => println!("Cannot reach backend: {}", msg),
///         Err(Error::ConfigInvalid(msg)) => println!("Bad configuration: {}", msg),
///         Err(e) => println!("Other error: {}", e),
///     }
/// }
/// ```
use thiserror::Error;

/// Errors that can occur in the asynq-inspector library.
///
/// Each variant carries a human readable message. The `Display` output is
/// exactly what the command line tool prints before exiting with status 1.
#[derive(Error, Debug)]
pub enum Error {
    /// The server snapshot could not be retrieved from the backend.
    ///
    /// This error occurs when:
    /// - The connection to Redis cannot be established
    /// - Authentication or database selection fails
    /// - A command returns an error reply
    #[error("{0}")]
    BackendUnavailable(String),

    /// Failed to read or parse configuration.
    ///
    /// This error occurs when:
    /// - An explicitly named config file cannot be read
    /// - The config file is not valid YAML
    /// - An environment override has the wrong type
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// Configuration parsed fine but contains unusable values.
    ///
    /// This error occurs when:
    /// - The redis URI is empty or has no host
    /// - The database index is negative
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// A backend record could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writing the rendered output failed.
    ///
    /// This error occurs when:
    /// - Standard output is closed
    /// - A table row does not have one value per column
    #[error("Output error: {0}")]
    Output(String),
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::BackendUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Output(err.to_string())
    }
}

/// Result type for asynq-inspector operations.
///
/// This is a convenience type alias for `std::result::Result` with the `Error` type
/// from this module.
pub type Result<T> = std::result::Result<T, Error>;
