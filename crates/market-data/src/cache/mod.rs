//! In-memory key/value cache with per-entry expiry.
//!
//! Entries are visible to readers only while `now < expires_at`. Expired
//! entries are evicted lazily when they are read, or in bulk by
//! [`TimedCache::purge_expired`], which [`spawn_sweeper`] runs periodically.
//! The sweep cadence is not observable: an expired entry is never returned
//! whether or not it has been swept yet.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::task::JoinHandle;

use crate::models::QuoteRecord;

/// Default time-to-live for cached entries.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15);

/// Lower bound for the background sweep period.
const MIN_SWEEP_PERIOD: Duration = Duration::from_secs(5);

/// A cached value and the instant after which it must no longer be served.
#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    /// `None` when the TTL is too large to represent; such entries never expire.
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires_at| now < expires_at)
    }
}

/// Thread-safe cache whose entries expire after a time-to-live.
///
/// Single-key `get`/`set` are atomic with respect to each other. The lock is
/// held only for the map operation itself, never across an `.await`.
pub struct TimedCache<K, V> {
    entries: Mutex<HashMap<K, CacheEntry<V>>>,
    default_ttl: Duration,
}

/// Cache shared by quote sources, keyed by `"{source}:{symbol}"`.
pub type QuoteCache = TimedCache<String, QuoteRecord>;

impl<K, V> TimedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create an empty cache whose entries live for `default_ttl` unless
    /// overridden per entry.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Recommended sweep period: half the default TTL, but never less than
    /// five seconds.
    pub fn sweep_period(&self) -> Duration {
        (self.default_ttl / 2).max(MIN_SWEEP_PERIOD)
    }

    /// Lock the entry map, recovering from poison.
    ///
    /// A poisoned cache holds at worst a stale entry, which expiry already
    /// guards against.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<K, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Timed cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Return the value stored under `key` if it has not expired.
    ///
    /// An expired entry behaves exactly like a miss and is evicted.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = Instant::now();
        let mut entries = self.lock_entries();

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `value` under `key` with the default TTL.
    pub fn set(&self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Store `value` under `key`, replacing any previous entry and resetting
    /// its expiry to `now + ttl`.
    pub fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now().checked_add(ttl);
        self.lock_entries()
            .insert(key, CacheEntry { value, expires_at });
    }

    /// Evict every expired entry. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Number of entries that are still live.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock_entries()
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Start a background task that purges expired entries every `period`.
///
/// The task runs until the returned handle is aborted or the runtime shuts
/// down. Must be called from within a tokio runtime.
pub fn spawn_sweeper<K, V>(cache: Arc<TimedCache<K, V>>, period: Duration) -> JoinHandle<()>
where
    K: Eq + Hash + Send + 'static,
    V: Clone + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = cache.purge_expired();
            if removed > 0 {
                debug!("Timed cache sweep evicted {} expired entries", removed);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_returns_value() {
        let cache: TimedCache<String, i32> = TimedCache::new(Duration::from_secs(60));
        cache.set("cmp:INFY".to_string(), 42);

        assert_eq!(cache.get("cmp:INFY"), Some(42));
    }

    #[test]
    fn test_miss_returns_none() {
        let cache: TimedCache<String, i32> = TimedCache::new(Duration::from_secs(60));
        assert_eq!(cache.get("cmp:NONE"), None);
    }

    #[test]
    fn test_zero_ttl_entry_is_never_visible() {
        let cache: TimedCache<String, i32> = TimedCache::new(Duration::from_secs(60));
        cache.set_with_ttl("cmp:INFY".to_string(), 1, Duration::ZERO);

        assert_eq!(cache.get("cmp:INFY"), None);
    }

    #[test]
    fn test_entry_expires_without_intervening_set() {
        let cache: TimedCache<String, i32> = TimedCache::new(Duration::from_millis(20));
        cache.set("cmp:TCS".to_string(), 7);
        assert_eq!(cache.get("cmp:TCS"), Some(7));

        std::thread::sleep(Duration::from_millis(40));

        assert_eq!(cache.get("cmp:TCS"), None);
        // The expired read evicted the entry.
        assert_eq!(cache.purge_expired(), 0);
    }

    #[test]
    fn test_set_overwrites_and_resets_expiry() {
        let cache: TimedCache<String, i32> = TimedCache::new(Duration::from_secs(60));
        cache.set_with_ttl("k".to_string(), 1, Duration::ZERO);
        cache.set("k".to_string(), 2);

        assert_eq!(cache.get("k"), Some(2));
    }

    #[test]
    fn test_per_entry_ttl_override() {
        let cache: TimedCache<String, i32> = TimedCache::new(Duration::ZERO);
        cache.set("short".to_string(), 1);
        cache.set_with_ttl("long".to_string(), 2, Duration::from_secs(60));

        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.get("long"), Some(2));
    }

    #[test]
    fn test_purge_expired_counts_removed_entries() {
        let cache: TimedCache<String, i32> = TimedCache::new(Duration::from_secs(60));
        cache.set_with_ttl("a".to_string(), 1, Duration::ZERO);
        cache.set_with_ttl("b".to_string(), 2, Duration::ZERO);
        cache.set("c".to_string(), 3);

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert!(!cache.is_empty());
    }

    #[test]
    fn test_huge_ttl_never_expires() {
        let cache: TimedCache<String, i32> = TimedCache::new(Duration::MAX);
        cache.set("k".to_string(), 9);

        assert_eq!(cache.get("k"), Some(9));
    }

    #[test]
    fn test_sweep_period_has_floor() {
        let short: TimedCache<String, i32> = TimedCache::new(Duration::from_secs(4));
        assert_eq!(short.sweep_period(), Duration::from_secs(5));

        let long: TimedCache<String, i32> = TimedCache::new(Duration::from_secs(30));
        assert_eq!(long.sweep_period(), Duration::from_secs(15));
    }

    #[tokio::test]
    async fn test_sweeper_purges_in_background() {
        let cache: Arc<TimedCache<String, i32>> =
            Arc::new(TimedCache::new(Duration::from_millis(10)));
        cache.set("k".to_string(), 1);

        let handle = spawn_sweeper(cache.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert_eq!(cache.purge_expired(), 0);
        assert!(cache.is_empty());
    }
}
