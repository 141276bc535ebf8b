use async_trait::async_trait;
use asynq_inspector::commands::servers::{NO_SERVERS, servers};
use asynq_inspector::error::{Error, Result};
use asynq_inspector::inspector::{Inspector, ServerInfo, ServerStatus};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use mockall::mock;
use std::collections::HashMap;

// Define a mock for the Inspector trait
mock! {
    pub InspectorMock {}

    #[async_trait]
    impl Inspector for InspectorMock {
        async fn list_servers(&self) -> Result<Vec<ServerInfo>>;
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 4, 10, 12, 0, 0).unwrap()
}

fn server(host: &str, pid: i64) -> ServerInfo {
    ServerInfo {
        host: host.to_string(),
        pid,
        server_id: format!("{}:{}", host, pid),
        concurrency: 10,
        queues: HashMap::from([("default".to_string(), 1)]),
        strict_priority: false,
        status: ServerStatus::Running,
        started: now() - TimeDelta::seconds(5),
        active_worker_count: 0,
    }
}

fn mock_returning(snapshot: Vec<ServerInfo>) -> MockInspectorMock {
    let mut mock = MockInspectorMock::new();
    mock.expect_list_servers()
        .times(1)
        .returning(move || Ok(snapshot.clone()));
    mock
}

async fn render(inspector: &MockInspectorMock) -> Result<String> {
    let mut out = Vec::new();
    servers(inspector, &mut out, now()).await?;
    Ok(String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_empty_snapshot_prints_message_only() -> Result<()> {
    let inspector = mock_returning(Vec::new());

    let output = render(&inspector).await?;

    assert_eq!(output, format!("{}\n", NO_SERVERS));
    assert_eq!(output, "No running servers\n");
    Ok(())
}

#[tokio::test]
async fn test_table_layout() -> Result<()> {
    let mut busy = server("worker-1", 4242);
    busy.active_worker_count = 3;
    busy.queues = HashMap::from([
        ("default".to_string(), 3),
        ("critical".to_string(), 6),
        ("low".to_string(), 1),
    ]);
    busy.started = now() - TimeDelta::seconds(2 * 3600 + 3 * 60);

    let mut quiet = server("worker-2", 17);
    quiet.status = ServerStatus::Quiet;
    quiet.started = now() - TimeDelta::seconds(45);

    let inspector = mock_returning(vec![quiet, busy]);
    let output = render(&inspector).await?;

    let expected = [
        "Host      PID   State    Active Workers  Queues                      Started     ",
        "----      ---   -----    --------------  ------                      -------     ",
        "worker-1  4242  running  3/10            critical:6 default:3 low:1  2h3m0s ago  ",
        "worker-2  17    quiet    0/10            default:1                   45s ago     ",
    ];
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
    Ok(())
}

#[tokio::test]
async fn test_rows_sorted_by_host_regardless_of_fetch_order() -> Result<()> {
    let inspector = mock_returning(vec![server("b", 100), server("a", 100)]);

    let output = render(&inspector).await?;
    let rows: Vec<&str> = output.lines().skip(2).collect();

    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("a "));
    assert!(rows[1].starts_with("b "));
    Ok(())
}

#[tokio::test]
async fn test_same_host_sorted_by_pid() -> Result<()> {
    let inspector = mock_returning(vec![
        server("host", 30),
        server("host", 4),
        server("host", 200),
    ]);

    let output = render(&inspector).await?;
    let pids: Vec<&str> = output
        .lines()
        .skip(2)
        .map(|line| line.split_whitespace().nth(1).unwrap())
        .collect();

    assert_eq!(pids, vec!["4", "30", "200"]);
    Ok(())
}

#[tokio::test]
async fn test_started_column_shows_uptime() -> Result<()> {
    let inspector = mock_returning(vec![server("h", 1)]);

    let output = render(&inspector).await?;
    let row = output.lines().nth(2).unwrap();

    assert!(row.trim_end().ends_with("5s ago"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_status_rendered_verbatim() -> Result<()> {
    let mut odd = server("", 1);
    odd.status = ServerStatus::Unknown("stopped".to_string());
    let inspector = mock_returning(vec![odd]);

    let output = render(&inspector).await?;

    assert!(output.lines().nth(2).unwrap().contains("stopped"));
    Ok(())
}

#[tokio::test]
async fn test_backend_failure_writes_nothing() {
    let mut inspector = MockInspectorMock::new();
    inspector
        .expect_list_servers()
        .times(1)
        .returning(|| Err(Error::BackendUnavailable("connection refused".to_string())));

    let mut out = Vec::new();
    let err = servers(&inspector, &mut out, now()).await.unwrap_err();

    assert!(matches!(err, Error::BackendUnavailable(_)));
    assert_eq!(err.to_string(), "connection refused");
    assert!(out.is_empty());
}
