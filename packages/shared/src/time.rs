//! Time utilities with clock abstraction for testability.
//!
//! Message timestamps travel on the wire as `YYYY-MM-DD HH:MM:SS` (UTC,
//! second resolution). The format is fixed width, so lexicographic order and
//! chronological order coincide and incremental fetch can compare the raw
//! strings.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Wire format for message timestamps. Fixed width and sortable.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current Unix timestamp (seconds, UTC)
    fn now_epoch_secs(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_secs(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually advanced clock for tests. Starts at a fixed instant and only
/// moves when `advance` is called.
#[derive(Debug)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    /// Create a new fixed clock at the given Unix timestamp (seconds)
    pub fn new(epoch_secs: i64) -> Self {
        Self {
            now: AtomicI64::new(epoch_secs),
        }
    }

    /// Advance the clock by the given number of seconds
    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_epoch_secs(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Format a Unix timestamp (seconds) as the sortable wire encoding
pub fn format_timestamp(epoch_secs: i64) -> String {
    let dt: DateTime<Utc> = Utc
        .timestamp_opt(epoch_secs, 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap());
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a wire timestamp back to a Unix timestamp (seconds).
///
/// Returns `None` when the string is not in the wire format.
pub fn parse_timestamp(text: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc().timestamp())
}
