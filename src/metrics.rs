//! Prometheus metrics for the message cache
//!
//! A reload that fails at runtime is not returned to the caller, so these
//! counters (together with the `warn` log event) are where it shows up.

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_gauge, register_int_counter, CounterVec, Encoder, Gauge,
    IntCounter, TextEncoder,
};

lazy_static! {
    /// Counter: cache operations (hit/reload)
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec!(
        "dbmessages_cache_operations_total",
        "Message cache operations by type",
        &["operation"]
    )
    .expect("Failed to create cache_operations metric");

    /// Counter: reloads that failed and left the previous snapshot in place
    pub static ref RELOAD_FAILURES: IntCounter = register_int_counter!(
        "dbmessages_reload_failures_total",
        "Total failed message reloads"
    )
    .expect("Failed to create reload_failures metric");

    /// Gauge: entries in the current snapshot
    pub static ref ENTRIES: Gauge = register_gauge!(
        "dbmessages_entries",
        "Number of messages in the current snapshot"
    )
    .expect("Failed to create entries metric");

    /// Gauge: timestamp of the last successful load (ms since epoch)
    pub static ref LAST_REFRESH: Gauge = register_gauge!(
        "dbmessages_last_refresh_timestamp_ms",
        "Time of the last successful message load"
    )
    .expect("Failed to create last_refresh metric");
}

/// Record a lookup served from the cached snapshot
pub fn record_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

/// Record a successful full reload
pub fn record_reload(entries: usize, timestamp_ms: i64) {
    CACHE_OPERATIONS.with_label_values(&["reload"]).inc();
    ENTRIES.set(entries as f64);
    LAST_REFRESH.set(timestamp_ms as f64);
}

/// Record a failed reload
pub fn record_reload_failure() {
    RELOAD_FAILURES.inc();
}

/// Render all registered metrics in the Prometheus text format
pub fn render() -> crate::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| crate::MessageError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_render() {
        record_hit();
        record_reload(2, 1_000);
        record_reload_failure();

        let output = render().unwrap();
        assert!(output.contains("dbmessages_cache_operations_total"));
        assert!(output.contains("dbmessages_reload_failures_total"));
        assert!(output.contains("dbmessages_entries"));
    }

    #[test]
    fn test_failure_counter_increments() {
        let before = RELOAD_FAILURES.get();
        record_reload_failure();
        assert!(RELOAD_FAILURES.get() > before);
    }
}
