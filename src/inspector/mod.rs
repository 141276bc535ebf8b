/// Backend access for the asynq inspector.
///
/// This module defines the records worker servers publish about themselves
/// and the [`Inspector`] trait used to fetch them. The command pipeline only
/// ever sees `&dyn Inspector`, so tests can swap the redis backed
/// implementation for an in-memory one.
///
/// # Components
///
/// * `types` - `ServerInfo`, `ServerStatus` and the server ordering
/// * `redis` - `RedisInspector`, reading the asynq registry out of redis
pub mod redis;
mod types;

pub use self::redis::RedisInspector;
pub use types::{ServerInfo, ServerStatus, sort_servers};

use crate::error::Result;
use async_trait::async_trait;

/// Read-only view of the servers registered with the task queue.
#[async_trait]
pub trait Inspector: Send + Sync {
    /// Returns every live server in no particular order.
    ///
    /// An empty vector means no servers are registered; failures to reach the
    /// backend are reported as [`Error::BackendUnavailable`](crate::Error::BackendUnavailable).
    async fn list_servers(&self) -> Result<Vec<ServerInfo>>;
}
