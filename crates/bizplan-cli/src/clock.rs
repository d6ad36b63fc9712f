use anyhow::Context;
use chrono::{DateTime, Utc};

/// `--at` override or the wall clock.
pub fn now_or(at: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    match at {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .with_context(|| format!("invalid --at timestamp '{s}' (expected RFC 3339)")),
    }
}
