use crate::error::Result;
use crate::storage::{LocalStore, BANNER_DISMISSED_KEY};
use chrono::{DateTime, Duration, Utc};

/// Hide the promotion banner for `hours` starting at `now`. Returns the
/// instant it reappears.
pub fn dismiss(store: &LocalStore, now: DateTime<Utc>, hours: u32) -> Result<DateTime<Utc>> {
    let until = now + Duration::hours(i64::from(hours));
    store.set(BANNER_DISMISSED_KEY, &until)?;
    Ok(until)
}

pub fn dismissed_until(store: &LocalStore) -> Result<Option<DateTime<Utc>>> {
    store.get(BANNER_DISMISSED_KEY)
}

pub fn is_dismissed(store: &LocalStore, now: DateTime<Utc>) -> Result<bool> {
    Ok(dismissed_until(store)?.is_some_and(|until| now < until))
}

pub fn restore(store: &LocalStore) -> Result<()> {
    store.remove(BANNER_DISMISSED_KEY)?;
    Ok(())
}
