use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;

/// Renders a queue-priority map as `name:priority` pairs, highest priority
/// first and names in lexicographic order among equal priorities.
///
/// ```
/// use asynq_inspector::output::format_queues;
/// use std::collections::HashMap;
///
/// let queues = HashMap::from([
///     ("default".to_string(), 1),
///     ("critical".to_string(), 6),
///     ("low".to_string(), 1),
/// ]);
/// assert_eq!(format_queues(&queues), "critical:6 default:1 low:1");
/// ```
pub fn format_queues(queues: &HashMap<String, i64>) -> String {
    let mut pairs: Vec<(&str, i64)> = queues
        .iter()
        .map(|(name, priority)| (name.as_str(), *priority))
        .collect();
    pairs.sort_by(|x, y| y.1.cmp(&x.1).then_with(|| x.0.cmp(y.0)));

    pairs
        .iter()
        .map(|(name, priority)| format!("{}:{}", name, priority))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders how long ago `started` was, e.g. `"3h12m5s ago"`.
///
/// A `started` after `now` gives a negative duration such as `"-5s ago"`.
pub fn time_ago(started: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{} ago", format_duration(round_to_seconds(now - started)))
}

/// Rounds to the nearest whole second, halves away from zero.
pub fn round_to_seconds(delta: TimeDelta) -> i64 {
    let secs = delta.num_seconds();
    // subsec_nanos carries the sign of the delta
    match delta.subsec_nanos() {
        n if n >= 500_000_000 => secs + 1,
        n if n <= -500_000_000 => secs - 1,
        _ => secs,
    }
}

/// Compact duration form: `0s`, `42s`, `1m0s`, `26h3m9s`.
///
/// Hours are never folded into days.
pub fn format_duration(secs: i64) -> String {
    if secs == 0 {
        return "0s".to_string();
    }
    let sign = if secs < 0 { "-" } else { "" };
    let total = secs.unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}
