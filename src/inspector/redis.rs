use super::Inspector;
use super::types::ServerInfo;
use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

/// Key of the sorted set listing every registered server.
const ALL_SERVERS: &str = "asynq:servers";

/// Reads the servers asynq workers register in redis.
///
/// Each worker writes its [`ServerInfo`] as JSON under its own key and adds
/// that key to the `asynq:servers` sorted set, scored by the time the entry
/// expires. Entries whose score is in the past belong to dead servers.
///
/// # Example
///
/// ```no_run
/// use asynq_inspector::config::Config;
/// use asynq_inspector::inspector::{Inspector, RedisInspector};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> asynq_inspector::Result<()> {
///     let inspector = RedisInspector::from_config(&Config::default())?;
///     for server in inspector.list_servers().await? {
///         println!("{}:{}", server.host, server.pid);
///     }
///     Ok(())
/// }
/// ```
pub struct RedisInspector {
    client: redis::Client,
    prefix: String,
}

impl RedisInspector {
    /// Creates an inspector for the redis instance named by `config`.
    ///
    /// No connection is made until the first query.
    #[tracing::instrument(skip(config), fields(uri = %config.uri, db = config.db))]
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config.redis_url()?;
        let client = redis::Client::open(url.as_str())?;
        tracing::debug!("Created redis client");
        Ok(Self {
            client,
            prefix: config.prefix.clone(),
        })
    }

    /// Full key of the server registry set.
    pub fn servers_key(&self) -> String {
        servers_key(&self.prefix)
    }

    async fn connect(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to connect to redis");
                Error::from(e)
            })
    }

    /// Lists servers whose registration has not expired at `now`.
    #[tracing::instrument(skip(self))]
    pub async fn list_servers_at(&self, now: DateTime<Utc>) -> Result<Vec<ServerInfo>> {
        let mut conn = self.connect().await?;

        let keys: Vec<String> = conn
            .zrangebyscore(self.servers_key(), now.timestamp(), "+inf")
            .await?;
        tracing::debug!(count = keys.len(), "Fetched server keys");

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            // A failed GET only loses that entry
            let data: Option<String> = match conn.get(&key).await {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Failed to read server entry");
                    None
                }
            };
            entries.push((key, data));
        }

        let servers = collect_servers(entries);
        tracing::info!(count = servers.len(), "Listed servers");
        Ok(servers)
    }
}

#[async_trait]
impl Inspector for RedisInspector {
    async fn list_servers(&self) -> Result<Vec<ServerInfo>> {
        self.list_servers_at(Utc::now()).await
    }
}

/// Key of the server registry set under `prefix`.
pub fn servers_key(prefix: &str) -> String {
    format!("{}{}", prefix, ALL_SERVERS)
}

/// Decodes registry entries, skipping ones that are missing or undecodable.
///
/// Each entry pairs a key with the value read for it, `None` when the key
/// was gone or could not be read.
pub fn collect_servers<I>(entries: I) -> Vec<ServerInfo>
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    entries
        .into_iter()
        .filter_map(|(key, data)| match data.as_deref().map(decode_server_info) {
            Some(Ok(info)) => Some(info),
            Some(Err(e)) => {
                tracing::warn!(key = %key, error = %e, "Skipping undecodable server entry");
                None
            }
            None => {
                tracing::warn!(key = %key, "Skipping missing server entry");
                None
            }
        })
        .collect()
}

/// Decodes one server entry as written by an asynq worker.
pub fn decode_server_info(data: &str) -> Result<ServerInfo> {
    Ok(serde_json::from_str(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servers_key_uses_prefix() {
        assert_eq!(servers_key(""), "asynq:servers");
        assert_eq!(servers_key("test:"), "test:asynq:servers");
    }

    #[test]
    fn test_from_config_keeps_prefix() {
        let config = Config {
            prefix: "staging:".to_string(),
            ..Config::default()
        };
        let inspector = RedisInspector::from_config(&config).unwrap();

        assert_eq!(inspector.servers_key(), "staging:asynq:servers");
    }

    #[test]
    fn test_from_config_rejects_bad_uri() {
        let config = Config {
            uri: "redis://".to_string(),
            ..Config::default()
        };

        assert!(RedisInspector::from_config(&config).is_err());
    }

    #[test]
    fn test_decode_garbage_is_serialization_error() {
        let err = decode_server_info("not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_collect_servers_skips_missing_and_garbage() {
        let valid = r#"{"Host":"worker-1","PID":42,"Concurrency":4,"Queues":{"default":1},"Status":"running","Started":"2020-02-01T10:00:00Z","ActiveWorkerCount":1}"#;
        let entries = vec![
            ("test:asynq:servers:{gone}".to_string(), None),
            ("test:asynq:servers:{bad}".to_string(), Some("{not json".to_string())),
            ("test:asynq:servers:{ok}".to_string(), Some(valid.to_string())),
        ];

        let servers = collect_servers(entries);

        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].host, "worker-1");
        assert_eq!(servers[0].pid, 42);
    }

    #[test]
    fn test_collect_servers_keeps_entry_with_null_queues() {
        let entry = r#"{"Host":"h","PID":1,"Concurrency":4,"Queues":null,"Status":"quiet","Started":"2020-02-01T10:00:00Z","ActiveWorkerCount":0}"#;

        let servers = collect_servers([("k".to_string(), Some(entry.to_string()))]);

        assert_eq!(servers.len(), 1);
        assert!(servers[0].queues.is_empty());
    }

    #[test]
    fn test_collect_servers_empty() {
        assert!(collect_servers(Vec::new()).is_empty());
    }
}
