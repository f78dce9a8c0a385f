//! Epoch service
//!
//! Thin orchestration over the per-guild metrics epoch. Setting or clearing
//! an epoch does not touch stored metrics directly; the next recalculation
//! picks up the new bound and the prune pass reconciles the table.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use review_core::entities::MetricsEpoch;
use review_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Epoch service
pub struct EpochService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EpochService<'a> {
    /// Create a new EpochService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The guild's epoch, if one is set
    #[instrument(skip(self))]
    pub async fn get_epoch(&self, guild_id: Snowflake) -> ServiceResult<Option<MetricsEpoch>> {
        Ok(self.ctx.epoch_repo().get(guild_id).await?)
    }

    /// Set the guild's epoch; actions before `start_at` stop counting at the
    /// next recalculation. Last write wins under concurrent resets.
    #[instrument(skip(self))]
    pub async fn set_epoch(
        &self,
        guild_id: Snowflake,
        start_at: DateTime<Utc>,
    ) -> ServiceResult<MetricsEpoch> {
        let epoch = self.ctx.epoch_repo().set(guild_id, start_at).await?;
        info!(guild_id = %guild_id, start_at = %start_at, "Metrics epoch set");
        Ok(epoch)
    }

    /// Remove the guild's epoch, restoring full-history aggregation.
    /// Returns whether an epoch existed.
    #[instrument(skip(self))]
    pub async fn clear_epoch(&self, guild_id: Snowflake) -> ServiceResult<bool> {
        let removed = self.ctx.epoch_repo().clear(guild_id).await?;
        if removed {
            info!(guild_id = %guild_id, "Metrics epoch cleared");
        }
        Ok(removed)
    }
}
