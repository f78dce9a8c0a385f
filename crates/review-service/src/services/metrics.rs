//! Metrics service
//!
//! Orchestrates the recalculate-and-overwrite aggregation pipeline and the
//! TTL-bounded read path. Every recalculation regenerates a guild's rows
//! wholesale from the filtered action log; nothing is patched in place.

use std::cmp::Ordering;

use chrono::Utc;
use tracing::{info, instrument, warn};

use review_core::entities::ModeratorMetrics;
use review_core::stats::{response_time_samples, summarize};
use review_core::traits::ActionCounts;
use review_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Outcome of one guild recalculation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecalcReport {
    /// Moderators whose rows were regenerated
    pub processed: usize,
    /// Moderators skipped because their aggregation failed; their previous
    /// rows are left in place
    pub skipped: usize,
    /// Stale rows removed for moderators no longer in the window
    pub pruned: u64,
}

/// Sort key for the leaderboard query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopSort {
    Accepts,
    Claims,
    /// Ascending; moderators without samples sort last
    ResponseTime,
}

/// Metrics service
pub struct MetricsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MetricsService<'a> {
    /// Create a new MetricsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Regenerate every moderator row for a guild from the epoch-filtered
    /// action log, then invalidate the guild's cache entry.
    ///
    /// A failure before any write (epoch lookup, log fetch) aborts the whole
    /// run. A failure for a single moderator only skips that moderator, so
    /// one bad row cannot blank the rest of the leaderboard.
    #[instrument(skip(self))]
    pub async fn recalculate(&self, guild_id: Snowflake) -> ServiceResult<RecalcReport> {
        let since = match self.ctx.epoch_repo().get(guild_id).await? {
            Some(epoch) => epoch.bound_s(),
            None => None,
        };

        let actors = self
            .ctx
            .action_log_repo()
            .distinct_actors(guild_id, since)
            .await?;
        let entries = self
            .ctx
            .action_log_repo()
            .fetch_for_guild(guild_id, since)
            .await?;
        let mut samples = response_time_samples(&entries);

        let mut report = RecalcReport::default();
        for &actor_id in &actors {
            let actor_samples = samples.remove(&actor_id).unwrap_or_default();
            match self
                .aggregate_one(guild_id, actor_id, since, &actor_samples)
                .await
            {
                Ok(()) => report.processed += 1,
                Err(e) => {
                    warn!(
                        guild_id = %guild_id,
                        moderator_id = %actor_id,
                        error = %e,
                        "Metrics aggregation failed for moderator, keeping previous row"
                    );
                    report.skipped += 1;
                }
            }
        }

        // Prune against the full actor set, not just the processed ones: a
        // skipped moderator keeps their stale row rather than losing it.
        report.pruned = self.ctx.metrics_repo().prune_absent(guild_id, &actors).await?;

        // Invalidate only after every write has landed, so a concurrent
        // reader never caches a half-written snapshot as fresh.
        self.ctx.metrics_cache().invalidate(guild_id);

        info!(
            guild_id = %guild_id,
            processed = report.processed,
            skipped = report.skipped,
            pruned = report.pruned,
            "Guild metrics recalculated"
        );
        Ok(report)
    }

    /// Build and upsert one moderator's row
    async fn aggregate_one(
        &self,
        guild_id: Snowflake,
        moderator_id: Snowflake,
        since: Option<i64>,
        samples: &[i64],
    ) -> ServiceResult<()> {
        let counts: ActionCounts = self
            .ctx
            .action_log_repo()
            .action_counts(guild_id, moderator_id, since)
            .await?;
        let stats = summarize(samples);

        let metrics = ModeratorMetrics {
            moderator_id,
            guild_id,
            total_claims: counts.claims,
            total_accepts: counts.accepts,
            total_rejects: counts.rejects,
            total_kicks: counts.kicks,
            total_modmail_opens: counts.modmail_opens,
            avg_response_time_s: stats.map(|s| s.avg),
            p50_response_time_s: stats.map(|s| s.p50),
            p95_response_time_s: stats.map(|s| s.p95),
            updated_at: Utc::now(),
        };

        self.ctx.metrics_repo().upsert(&metrics).await?;
        Ok(())
    }

    /// A guild's metrics snapshot, served from cache while fresh.
    ///
    /// A miss (no entry, or one past its TTL) recomputes synchronously, so
    /// the rows handed back always reflect the log as of this call.
    /// `force_refresh` recomputes even when the cache is still fresh.
    #[instrument(skip(self))]
    pub async fn get_guild_metrics(
        &self,
        guild_id: Snowflake,
        force_refresh: bool,
    ) -> ServiceResult<Vec<ModeratorMetrics>> {
        if !force_refresh {
            if let Some(rows) = self.ctx.metrics_cache().get_fresh(guild_id) {
                return Ok(rows);
            }
        }

        self.recalculate(guild_id).await?;
        let rows = self.ctx.metrics_repo().find_by_guild(guild_id).await?;
        self.ctx.metrics_cache().insert(guild_id, rows.clone());
        Ok(rows)
    }

    /// One moderator's row, if any aggregation has produced one
    #[instrument(skip(self))]
    pub async fn get_moderator_metrics(
        &self,
        guild_id: Snowflake,
        moderator_id: Snowflake,
    ) -> ServiceResult<Option<ModeratorMetrics>> {
        Ok(self
            .ctx
            .metrics_repo()
            .find_one(guild_id, moderator_id)
            .await?)
    }

    /// The guild leaderboard: the top `limit` moderators under `sort`
    #[instrument(skip(self))]
    pub async fn get_top_moderators(
        &self,
        guild_id: Snowflake,
        sort: TopSort,
        limit: usize,
    ) -> ServiceResult<Vec<ModeratorMetrics>> {
        let mut rows = self.get_guild_metrics(guild_id, false).await?;
        rank(&mut rows, sort);
        rows.truncate(limit);
        Ok(rows)
    }
}

/// Order metrics rows for a leaderboard. Count sorts are descending;
/// response time is ascending with sample-less moderators last.
pub fn rank(rows: &mut [ModeratorMetrics], sort: TopSort) {
    match sort {
        TopSort::Accepts => rows.sort_by(|a, b| b.total_accepts.cmp(&a.total_accepts)),
        TopSort::Claims => rows.sort_by(|a, b| b.total_claims.cmp(&a.total_claims)),
        TopSort::ResponseTime => rows.sort_by(|a, b| {
            match (a.avg_response_time_s, b.avg_response_time_s) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }
}
