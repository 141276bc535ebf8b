/*!
 # Asynq Inspector

 A Rust library and command line tool for inspecting the worker servers
 registered with an [asynq](https://github.com/hibiken/asynq) task queue.

 ## Overview

 Asynq Inspector provides functionality to:
 - Load redis connection settings from defaults, a YAML file, the environment and flags
 - Fetch the servers currently registered in redis
 - Order them by host and pid
 - Print them as an aligned table with their state, worker usage, queues and uptime

 ## Basic Usage

 ```no_run
 use asynq_inspector::{Config, RedisInspector, Result};
 use asynq_inspector::commands::servers::servers;

 #[tokio::main(flavor = "current_thread")]
 async fn main() -> Result<()> {
     // Connection settings, e.g. from $HOME/.asynq.yaml
     let config = Config::from_file("asynq.yaml")?;

     // Reader for the server registry
     let inspector = RedisInspector::from_config(&config)?;

     // Print the table to stdout
     servers(&inspector, &mut std::io::stdout(), chrono::Utc::now()).await
 }
 ```

 Output looks like:

 ```text
 Host      PID   State    Active Workers  Queues                      Started
 ----      ---   -----    --------------  ------                      -------
 worker-1  4242  running  3/10            critical:6 default:3 low:1  2h3m0s ago
 worker-2  17    quiet    0/10            default:1                   45s ago
 ```

 ## Features

 - **Backend abstraction**: the `Inspector` trait hides redis so tests can use fakes
 - **Layered configuration**: YAML file, environment variables and flags
 - **Error Handling**: one error type with operator friendly messages
 - **Tracing**: structured logs on stderr, filtered with `RUST_LOG`

 ## License

 This project is licensed under the terms in the LICENSE file.
*/

pub mod commands;
pub mod config;
pub mod error;
pub mod inspector;
pub mod logging;
pub mod output;

pub use config::Config;
pub use error::{Error, Result};
pub use inspector::{Inspector, RedisInspector, ServerInfo, ServerStatus};
