//! PostgreSQL implementation of MetricsRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use review_core::entities::ModeratorMetrics;
use review_core::traits::{MetricsRepository, RepoResult};
use review_core::value_objects::Snowflake;

use crate::models::ModeratorMetricsModel;

use super::error::map_db_error;

/// PostgreSQL implementation of MetricsRepository
#[derive(Clone)]
pub struct PgMetricsRepository {
    pool: PgPool,
}

impl PgMetricsRepository {
    /// Create a new PgMetricsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<ModeratorMetricsModel> for ModeratorMetrics {
    fn from(model: ModeratorMetricsModel) -> Self {
        ModeratorMetrics {
            moderator_id: Snowflake::new(model.moderator_id),
            guild_id: Snowflake::new(model.guild_id),
            total_claims: model.total_claims,
            total_accepts: model.total_accepts,
            total_rejects: model.total_rejects,
            total_kicks: model.total_kicks,
            total_modmail_opens: model.total_modmail_opens,
            avg_response_time_s: model.avg_response_time_s,
            p50_response_time_s: model.p50_response_time_s,
            p95_response_time_s: model.p95_response_time_s,
            updated_at: model.updated_at,
        }
    }
}

#[async_trait]
impl MetricsRepository for PgMetricsRepository {
    #[instrument(skip(self, metrics), fields(moderator_id = %metrics.moderator_id, guild_id = %metrics.guild_id))]
    async fn upsert(&self, metrics: &ModeratorMetrics) -> RepoResult<()> {
        // Wholesale overwrite: every aggregate column is replaced, the row
        // is never incremented.
        sqlx::query(
            r"
            INSERT INTO moderator_metrics (
                moderator_id, guild_id,
                total_claims, total_accepts, total_rejects, total_kicks, total_modmail_opens,
                avg_response_time_s, p50_response_time_s, p95_response_time_s,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, now())
            ON CONFLICT (moderator_id, guild_id) DO UPDATE SET
                total_claims        = EXCLUDED.total_claims,
                total_accepts       = EXCLUDED.total_accepts,
                total_rejects       = EXCLUDED.total_rejects,
                total_kicks         = EXCLUDED.total_kicks,
                total_modmail_opens = EXCLUDED.total_modmail_opens,
                avg_response_time_s = EXCLUDED.avg_response_time_s,
                p50_response_time_s = EXCLUDED.p50_response_time_s,
                p95_response_time_s = EXCLUDED.p95_response_time_s,
                updated_at          = now()
            ",
        )
        .bind(metrics.moderator_id.into_inner())
        .bind(metrics.guild_id.into_inner())
        .bind(metrics.total_claims)
        .bind(metrics.total_accepts)
        .bind(metrics.total_rejects)
        .bind(metrics.total_kicks)
        .bind(metrics.total_modmail_opens)
        .bind(metrics.avg_response_time_s)
        .bind(metrics.p50_response_time_s)
        .bind(metrics.p95_response_time_s)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Vec<ModeratorMetrics>> {
        let results = sqlx::query_as::<_, ModeratorMetricsModel>(
            r"
            SELECT moderator_id, guild_id,
                   total_claims, total_accepts, total_rejects, total_kicks, total_modmail_opens,
                   avg_response_time_s, p50_response_time_s, p95_response_time_s,
                   updated_at
            FROM moderator_metrics
            WHERE guild_id = $1
            ORDER BY moderator_id
            ",
        )
        .bind(guild_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ModeratorMetrics::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_one(
        &self,
        guild_id: Snowflake,
        moderator_id: Snowflake,
    ) -> RepoResult<Option<ModeratorMetrics>> {
        let result = sqlx::query_as::<_, ModeratorMetricsModel>(
            r"
            SELECT moderator_id, guild_id,
                   total_claims, total_accepts, total_rejects, total_kicks, total_modmail_opens,
                   avg_response_time_s, p50_response_time_s, p95_response_time_s,
                   updated_at
            FROM moderator_metrics
            WHERE guild_id = $1 AND moderator_id = $2
            ",
        )
        .bind(guild_id.into_inner())
        .bind(moderator_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ModeratorMetrics::from))
    }

    #[instrument(skip(self, keep), fields(keep = keep.len()))]
    async fn prune_absent(&self, guild_id: Snowflake, keep: &[Snowflake]) -> RepoResult<u64> {
        let keep_ids: Vec<i64> = keep.iter().copied().map(Snowflake::into_inner).collect();

        let result = sqlx::query(
            r"
            DELETE FROM moderator_metrics
            WHERE guild_id = $1 AND moderator_id <> ALL($2)
            ",
        )
        .bind(guild_id.into_inner())
        .bind(keep_ids)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
