//! Message store: the load-once, serve-many, refresh-on-timeout cache
//!
//! The store holds the complete message table in memory. Once the cache
//! duration has elapsed since the last load, the next access reloads the whole
//! table from the [`Loader`]. There is no change detection: a reload always
//! replaces every entry, whether or not the source changed.
//!
//! One lock guards the snapshot and its timestamp, and it stays held across
//! the loader call. Refreshes are therefore serialized, and callers that
//! arrive during a reload wait for it instead of starting another one.

use crate::clock::Clock;
use crate::error::LoadError;
use crate::loader::{Loader, Messages};
use crate::metrics;
use crate::Result;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Cache continuously, never reload after the first load
pub const CACHE_FOREVER: i64 = -1;

/// Snapshot plus the instant it was loaded
struct State {
    entries: Arc<Messages>,
    last_refresh: i64,
}

/// Point-in-time consistent view of an externally sourced message table
pub struct MessageStore {
    loader: Box<dyn Loader>,
    clock: Box<dyn Clock>,
    /// Negative: forever. Zero: reload on every access.
    cache_millis: i64,
    state: Mutex<State>,
}

impl MessageStore {
    /// Create a store and load the table once
    ///
    /// `cache_seconds` follows the usual convention: `-1` caches forever, `0`
    /// reloads on every access (not for production use), positive values are
    /// the refresh interval.
    ///
    /// # Errors
    /// Returns `MessageError::Load` if the first load fails. No store is
    /// produced in that case.
    pub fn new(
        loader: impl Loader + 'static,
        clock: impl Clock + 'static,
        cache_seconds: i64,
    ) -> Result<Self> {
        Self::with_cache_millis(loader, clock, seconds_to_millis(cache_seconds))
    }

    /// Same as [`MessageStore::new`] with the duration given in milliseconds
    pub fn with_cache_millis(
        loader: impl Loader + 'static,
        clock: impl Clock + 'static,
        cache_millis: i64,
    ) -> Result<Self> {
        let loader: Box<dyn Loader> = Box::new(loader);
        let clock: Box<dyn Clock> = Box::new(clock);

        let entries = loader.load()?;
        let last_refresh = clock.now_millis();
        metrics::record_reload(entries.len(), last_refresh);

        tracing::info!(
            entries = entries.len(),
            cache_millis,
            "Message store constructed"
        );

        Ok(Self {
            loader,
            clock,
            cache_millis,
            state: Mutex::new(State {
                entries: Arc::new(entries),
                last_refresh,
            }),
        })
    }

    /// Current snapshot, reloading first if it has gone stale
    ///
    /// A failing reload is logged and counted, and the last good snapshot is
    /// returned. Its timestamp is left alone so the next call tries again.
    pub fn snapshot(&self) -> Arc<Messages> {
        let mut state = self.state.lock();

        if self.is_fresh(state.last_refresh) {
            metrics::record_hit();
            return Arc::clone(&state.entries);
        }

        if let Err(e) = self.reload(&mut state) {
            metrics::record_reload_failure();
            tracing::warn!(
                error = %e,
                entries = state.entries.len(),
                "Reloading messages failed, serving previous snapshot"
            );
        }

        Arc::clone(&state.entries)
    }

    /// Reload now, regardless of freshness
    ///
    /// # Errors
    /// Returns `MessageError::Load` if the loader fails. The previous snapshot
    /// stays in place.
    pub fn refresh(&self) -> Result<Arc<Messages>> {
        let mut state = self.state.lock();
        if let Err(e) = self.reload(&mut state) {
            metrics::record_reload_failure();
            tracing::warn!(error = %e, "Forced message reload failed");
            return Err(e.into());
        }
        Ok(Arc::clone(&state.entries))
    }

    /// Look up a single code in the current snapshot
    pub fn get(&self, code: &str) -> Option<String> {
        self.snapshot().get(code).cloned()
    }

    /// Refresh interval in milliseconds (negative: forever)
    pub fn cache_millis(&self) -> i64 {
        self.cache_millis
    }

    /// Statistics about the current snapshot. Never triggers a reload.
    pub fn stats(&self) -> StoreStats {
        let state = self.state.lock();
        let now = self.clock.now_millis();
        StoreStats {
            entries: state.entries.len(),
            last_refresh_ms: state.last_refresh,
            age_ms: now - state.last_refresh,
            cache_millis: self.cache_millis,
            is_stale: !self.is_fresh(state.last_refresh),
        }
    }

    /// The window is `[last_refresh, last_refresh + cache_millis)`
    fn is_fresh(&self, last_refresh: i64) -> bool {
        self.cache_millis < 0 || self.clock.now_millis() - last_refresh < self.cache_millis
    }

    /// Load into a fresh map and swap it in only when the load succeeded
    fn reload(&self, state: &mut State) -> std::result::Result<(), LoadError> {
        tracing::debug!("Refreshing messages");

        let entries = self.loader.load()?;
        let now = self.clock.now_millis();

        tracing::debug!(
            entries = entries.len(),
            elapsed_ms = now - state.last_refresh,
            "Messages reloaded"
        );
        metrics::record_reload(entries.len(), now);

        state.entries = Arc::new(entries);
        state.last_refresh = now;
        Ok(())
    }
}

impl fmt::Display for MessageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        let mut codes: Vec<&String> = snapshot.keys().collect();
        codes.sort();
        for code in codes {
            writeln!(f, "{} = {}", code, snapshot[code])?;
        }
        Ok(())
    }
}

impl fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MessageStore")
            .field("entries", &state.entries.len())
            .field("last_refresh", &state.last_refresh)
            .field("cache_millis", &self.cache_millis)
            .finish()
    }
}

/// Snapshot statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub entries: usize,
    pub last_refresh_ms: i64,
    pub age_ms: i64,
    pub cache_millis: i64,
    pub is_stale: bool,
}

/// Negative seconds all mean "forever"
pub(crate) fn seconds_to_millis(seconds: i64) -> i64 {
    if seconds < 0 {
        CACHE_FOREVER
    } else {
        seconds.saturating_mul(1000)
    }
}
