use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// State a worker server reports about itself.
///
/// Values other than `running` and `quiet` are kept verbatim so they can
/// still be shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServerStatus {
    /// Server is pulling tasks from its queues
    Running,
    /// Server stopped pulling new tasks and is draining in-flight ones
    Quiet,
    /// Status string this version does not know about
    Unknown(String),
}

impl ServerStatus {
    /// The status as stored by the backend.
    pub fn as_str(&self) -> &str {
        match self {
            ServerStatus::Running => "running",
            ServerStatus::Quiet => "quiet",
            ServerStatus::Unknown(s) => s,
        }
    }
}

impl From<String> for ServerStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "running" => ServerStatus::Running,
            "quiet" => ServerStatus::Quiet,
            _ => ServerStatus::Unknown(s),
        }
    }
}

impl From<ServerStatus> for String {
    fn from(status: ServerStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One worker server process as last reported to the backend.
///
/// Field names on the wire follow the worker's JSON encoding
/// (`Host`, `PID`, `ServerID`, ...).
///
/// # Examples
///
/// ```
/// use asynq_inspector::inspector::{ServerInfo, ServerStatus};
///
/// let info: ServerInfo = serde_json::from_str(r#"{
///     "Host": "worker-1",
///     "PID": 4242,
///     "ServerID": "0b1f",
///     "Concurrency": 10,
///     "Queues": {"default": 1, "critical": 6},
///     "StrictPriority": false,
///     "Status": "running",
///     "Started": "2020-02-01T10:00:00Z",
///     "ActiveWorkerCount": 3
/// }"#).unwrap();
///
/// assert_eq!(info.pid, 4242);
/// assert_eq!(info.status, ServerStatus::Running);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServerInfo {
    /// Hostname of the machine running the server
    pub host: String,
    /// Process id on that host
    #[serde(rename = "PID")]
    pub pid: i64,
    /// Identifier the server assigned itself at startup
    #[serde(rename = "ServerID", default)]
    pub server_id: String,
    /// Size of the worker pool
    pub concurrency: usize,
    /// Queue name to priority
    #[serde(default, deserialize_with = "null_as_empty")]
    pub queues: HashMap<String, i64>,
    /// Whether queues are served in strict priority order
    #[serde(default)]
    pub strict_priority: bool,
    pub status: ServerStatus,
    /// When the process started
    pub started: DateTime<Utc>,
    /// Workers currently processing a task
    #[serde(default)]
    pub active_worker_count: usize,
}

/// Workers with no queues configured encode the map as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<HashMap<String, i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<HashMap<String, i64>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Orders servers by host name, then by pid.
///
/// The sort is stable, so equal `(host, pid)` pairs keep their fetch order.
pub fn sort_servers(servers: &mut [ServerInfo]) {
    servers.sort_by(|x, y| x.host.cmp(&y.host).then(x.pid.cmp(&y.pid)));
}
