//! Configuration module for the asynq inspector.
//!
//! This module handles loading and validating the settings needed to reach
//! the redis instance that backs asynq. Settings are layered the same way on
//! every invocation: built-in defaults, then a YAML config file, then the
//! `URI`/`DB`/`PASSWORD`/`PREFIX` environment variables, then flags given on
//! the command line.
//!
//! # Examples
//!
//! Loading a configuration from a file:
//!
//! ```no_run
//! use asynq_inspector::config::Config;
//!
//! let config = Config::from_file("/home/ops/.asynq.yaml").unwrap();
//! println!("Connecting to {}", config.uri);
//! ```
//!
//! Creating a configuration programmatically:
//!
//! ```
//! use asynq_inspector::config::{validate_config, Config};
//!
//! let config = Config {
//!     uri: "redis.internal:6379".to_string(),
//!     db: 1,
//!     password: String::new(),
//!     prefix: "prod:".to_string(),
//! };
//! validate_config(&config).unwrap();
//! ```
mod parser;
pub mod validator;

pub use parser::{Config, ConfigOverrides, DEFAULT_CONFIG_NAMES, DEFAULT_PREFIX, DEFAULT_URI};
pub use validator::validate_config;
