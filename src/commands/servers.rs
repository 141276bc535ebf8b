use crate::error::Result;
use crate::inspector::{Inspector, sort_servers};
use crate::output::{TableRenderer, format_queues, time_ago};
use chrono::{DateTime, Utc};
use clap::Args;
use std::io::Write;

/// Column headers of the servers table, in display order.
pub const SERVER_COLUMNS: [&str; 6] = ["Host", "PID", "State", "Active Workers", "Queues", "Started"];

/// Printed instead of a table when no server is registered.
pub const NO_SERVERS: &str = "No running servers";

/// 🖥️ Servers Command
///
/// Shows all running worker servers pulling tasks from the configured redis
/// instance.
#[derive(Args, Debug, Clone, Default)]
#[command(
    about = "Shows all running worker servers",
    long_about = "Servers (asynq servers) will show all running worker servers
pulling tasks from the specified redis instance.

The command shows the following for each server:
* Host and PID of the process in which the server is running
* Number of active workers out of worker pool
* Queue configuration
* State of the worker server (\"running\" | \"quiet\")
* Time the server was started

A \"running\" server is pulling tasks from queues and processing them.
A \"quiet\" server is no longer pulling new tasks from queues"
)]
pub struct ServersCommand {}

/// Fetches the current servers and prints them as a table sorted by host
/// and pid.
///
/// The snapshot is fetched before anything is written, so a backend failure
/// leaves `out` untouched.
#[tracing::instrument(skip_all, fields(now = %now))]
pub async fn servers<W>(inspector: &dyn Inspector, out: &mut W, now: DateTime<Utc>) -> Result<()>
where
    W: Write + ?Sized,
{
    let mut servers = inspector.list_servers().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list servers");
        e
    })?;

    if servers.is_empty() {
        writeln!(out, "{}", NO_SERVERS)?;
        return Ok(());
    }

    sort_servers(&mut servers);
    tracing::debug!(count = servers.len(), "Rendering servers");

    TableRenderer::new(SERVER_COLUMNS).render(&mut *out, |rows| {
        for info in &servers {
            let workers = format!("{}/{}", info.active_worker_count, info.concurrency);
            let queues = format_queues(&info.queues);
            let started = time_ago(info.started, now);
            rows.write_row(&[
                &info.host,
                &info.pid,
                &info.status,
                &workers,
                &queues,
                &started,
            ])?;
        }
        Ok(())
    })
}
