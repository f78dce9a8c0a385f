//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Claim mutation is exposed only as paired
//! claim-plus-audit operations so the atomicity guarantee lives behind the
//! trait boundary, not in callers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ActionLogEntry, Application, Claim, MetricsEpoch, ModeratorMetrics, NewActionLogEntry};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Application Repository (read-only here)
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find application by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Application>>;
}

// ============================================================================
// Claim Repository
// ============================================================================

#[async_trait]
pub trait ClaimRepository: Send + Sync {
    /// Find the claim on an application, if any
    async fn find(&self, app_id: Snowflake) -> RepoResult<Option<Claim>>;

    /// List a reviewer's open claims in a guild
    async fn find_by_reviewer(
        &self,
        guild_id: Snowflake,
        reviewer_id: Snowflake,
    ) -> RepoResult<Vec<Claim>>;

    /// Take the claim on an application and append the `claim` audit entry,
    /// both inside one transaction.
    ///
    /// Re-claiming a case already held by `reviewer_id` is an idempotent
    /// no-op returning the existing claim. A claim held by anyone else fails
    /// with [`DomainError::AlreadyClaimed`], including when a concurrent
    /// transaction wins the insert race.
    async fn claim_with_audit(
        &self,
        app_id: Snowflake,
        reviewer_id: Snowflake,
        guild_id: Snowflake,
        applicant_id: Snowflake,
    ) -> RepoResult<Claim>;

    /// Release the claim and append the `unclaim` audit entry atomically.
    ///
    /// Fails with [`DomainError::NotClaimed`] when no claim exists and
    /// [`DomainError::NotOwner`] when it is held by a different reviewer.
    async fn unclaim_with_audit(
        &self,
        app_id: Snowflake,
        reviewer_id: Snowflake,
        guild_id: Snowflake,
        applicant_id: Snowflake,
    ) -> RepoResult<()>;

    /// Unconditionally remove a claim row (decision path cleanup).
    /// Returns whether a row existed.
    async fn delete(&self, app_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Action Log Repository
// ============================================================================

/// Per-moderator action counters from conditional aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionCounts {
    pub claims: i64,
    pub accepts: i64,
    pub rejects: i64,
    pub kicks: i64,
    pub modmail_opens: i64,
}

#[async_trait]
pub trait ActionLogRepository: Send + Sync {
    /// Append one immutable entry, returning the persisted row
    async fn append(&self, entry: &NewActionLogEntry) -> RepoResult<ActionLogEntry>;

    /// All entries for a guild with `created_at_s >= since` (full history
    /// when `since` is None), in chronological order
    async fn fetch_for_guild(
        &self,
        guild_id: Snowflake,
        since: Option<i64>,
    ) -> RepoResult<Vec<ActionLogEntry>>;

    /// Most recent entries touching one application, newest first
    async fn recent_for_app(
        &self,
        app_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<ActionLogEntry>>;

    /// Distinct actors with at least one qualifying moderator action in the
    /// window
    async fn distinct_actors(
        &self,
        guild_id: Snowflake,
        since: Option<i64>,
    ) -> RepoResult<Vec<Snowflake>>;

    /// Conditional aggregation of one moderator's action counts over the
    /// filtered log
    async fn action_counts(
        &self,
        guild_id: Snowflake,
        actor_id: Snowflake,
        since: Option<i64>,
    ) -> RepoResult<ActionCounts>;

    /// Every guild that has at least one log entry (drives the scheduler)
    async fn distinct_guilds(&self) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Metrics Repository
// ============================================================================

#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Insert-or-replace one moderator's row, overwriting every aggregate
    /// column (never incrementing)
    async fn upsert(&self, metrics: &ModeratorMetrics) -> RepoResult<()>;

    /// All metrics rows for a guild
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<ModeratorMetrics>>;

    /// One moderator's row, if present
    async fn find_one(
        &self,
        guild_id: Snowflake,
        moderator_id: Snowflake,
    ) -> RepoResult<Option<ModeratorMetrics>>;

    /// Delete rows for moderators outside `keep`; returns rows removed.
    /// Used after recalculation so an epoch reset is reflected in the table.
    async fn prune_absent(&self, guild_id: Snowflake, keep: &[Snowflake]) -> RepoResult<u64>;
}

// ============================================================================
// Epoch Repository
// ============================================================================

#[async_trait]
pub trait EpochRepository: Send + Sync {
    /// The guild's metrics epoch, if one is set
    async fn get(&self, guild_id: Snowflake) -> RepoResult<Option<MetricsEpoch>>;

    /// Atomic upsert; last write wins under concurrent resets
    async fn set(&self, guild_id: Snowflake, start_at: DateTime<Utc>) -> RepoResult<MetricsEpoch>;

    /// Remove the epoch, restoring full-history visibility.
    /// Returns whether a row existed.
    async fn clear(&self, guild_id: Snowflake) -> RepoResult<bool>;
}

// ============================================================================
// Panic Switch (external collaborator)
// ============================================================================

/// Guild-wide safety switch that freezes claim/unclaim mutations.
/// Owned by the admin tooling; this core only reads it.
#[async_trait]
pub trait PanicSwitch: Send + Sync {
    async fn is_active(&self, guild_id: Snowflake) -> RepoResult<bool>;
}
