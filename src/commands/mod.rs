//! Command line surface of the `asynq` tool.
//!
//! Global flags mirror the keys of the YAML config file; values passed here
//! win over the file and the environment.
use crate::config::{Config, ConfigOverrides, validate_config};
use crate::error::Result;
use crate::inspector::RedisInspector;
use chrono::Utc;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

pub mod servers;

pub use servers::{NO_SERVERS, SERVER_COLUMNS, ServersCommand};

/// Version string printed by `--version` and `version`.
pub fn version_output() -> String {
    format!("asynq version {}\n", env!("CARGO_PKG_VERSION"))
}

/// A monitoring tool for asynq queues
#[derive(Parser, Debug)]
#[command(
    name = "asynq",
    about = "A monitoring tool for asynq queues",
    long_about = "Asynq is a monitoring CLI to inspect tasks and queues managed by asynq.",
    disable_version_flag = true
)]
pub struct Cli {
    /// Config file to set flag default values (default is $HOME/.asynq.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Redis server URI [default: 127.0.0.1:6379]
    #[arg(short, long, global = true, value_name = "URI")]
    pub uri: Option<String>,

    /// Redis database number [default: 0]
    #[arg(short = 'n', long, global = true, value_name = "DB")]
    pub db: Option<i64>,

    /// Password to use when connecting to redis server
    #[arg(short, long, global = true, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Redis key prefix [default: test:]
    #[arg(long, global = true, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Print version information
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Servers(ServersCommand),

    #[command(hide = true)]
    Version,
}

/// Exit status for a command line that failed to parse.
///
/// Help requests exit 0, every usage error exits 1.
pub fn parse_error_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

impl Cli {
    /// Flags that were given explicitly.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            uri: self.uri.clone(),
            db: self.db,
            password: self.password.clone(),
            prefix: self.prefix.clone(),
        }
    }

    /// Runs the selected command, writing its output to `out`.
    #[tracing::instrument(skip_all, fields(command = ?self.command))]
    pub async fn execute<W>(self, out: &mut W) -> Result<()>
    where
        W: Write + ?Sized,
    {
        if self.version {
            out.write_all(version_output().as_bytes())?;
            return Ok(());
        }

        match &self.command {
            Some(Commands::Servers(_)) => {
                let (config, _) = Config::load(self.config.as_deref(), &self.overrides())?;
                validate_config(&config)?;
                let inspector = RedisInspector::from_config(&config)?;
                servers::servers(&inspector, out, Utc::now()).await
            }
            Some(Commands::Version) => {
                out.write_all(version_output().as_bytes())?;
                Ok(())
            }
            None => {
                let help = Cli::command().render_help();
                writeln!(out, "{}", help)?;
                Ok(())
            }
        }
    }
}
