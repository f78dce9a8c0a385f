//! TTL-bounded metrics snapshot store
//!
//! One entry per guild. There is no cross-request locking: two simultaneous
//! misses for the same guild may both trigger a recomputation upstream,
//! which is safe because recomputation is an idempotent full overwrite.
//! The one ordering contract the store participates in: the aggregator
//! invalidates a guild's entry only after all its metric writes complete.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

use review_core::entities::ModeratorMetrics;
use review_core::value_objects::Snowflake;

/// Default snapshot lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

struct CacheEntry {
    rows: Vec<ModeratorMetrics>,
    snapshot_at: Instant,
}

/// Process-scoped cache mapping guild id to a metrics snapshot
pub struct MetricsCache {
    entries: DashMap<Snowflake, CacheEntry>,
    ttl: Duration,
}

impl MetricsCache {
    /// Create a cache with the given TTL (injectable for tests)
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// The configured snapshot lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the guild's snapshot if one exists and is younger than the TTL
    pub fn get_fresh(&self, guild_id: Snowflake) -> Option<Vec<ModeratorMetrics>> {
        let entry = self.entries.get(&guild_id)?;
        if entry.snapshot_at.elapsed() < self.ttl {
            Some(entry.rows.clone())
        } else {
            None
        }
    }

    /// Store a snapshot with a fresh timestamp
    pub fn insert(&self, guild_id: Snowflake, rows: Vec<ModeratorMetrics>) {
        self.entries.insert(
            guild_id,
            CacheEntry {
                rows,
                snapshot_at: Instant::now(),
            },
        );
    }

    /// Drop the guild's snapshot, if any
    pub fn invalidate(&self, guild_id: Snowflake) {
        if self.entries.remove(&guild_id).is_some() {
            debug!(guild_id = %guild_id, "metrics cache entry invalidated");
        }
    }

    /// Drop every snapshot
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached guilds, fresh or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MetricsCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl std::fmt::Debug for MetricsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsCache")
            .field("guilds", &self.entries.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
