//! PostgreSQL implementation of EpochRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use review_core::entities::MetricsEpoch;
use review_core::traits::{EpochRepository, RepoResult};
use review_core::value_objects::Snowflake;

use crate::models::MetricsEpochModel;

use super::error::map_db_error;

/// PostgreSQL implementation of EpochRepository
#[derive(Clone)]
pub struct PgEpochRepository {
    pool: PgPool,
}

impl PgEpochRepository {
    /// Create a new PgEpochRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<MetricsEpochModel> for MetricsEpoch {
    fn from(model: MetricsEpochModel) -> Self {
        MetricsEpoch {
            guild_id: Snowflake::new(model.guild_id),
            start_at: model.start_at,
        }
    }
}

#[async_trait]
impl EpochRepository for PgEpochRepository {
    #[instrument(skip(self))]
    async fn get(&self, guild_id: Snowflake) -> RepoResult<Option<MetricsEpoch>> {
        let result = sqlx::query_as::<_, MetricsEpochModel>(
            r"
            SELECT guild_id, start_at FROM metrics_epochs WHERE guild_id = $1
            ",
        )
        .bind(guild_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(MetricsEpoch::from))
    }

    #[instrument(skip(self))]
    async fn set(&self, guild_id: Snowflake, start_at: DateTime<Utc>) -> RepoResult<MetricsEpoch> {
        // Single-statement upsert: last write wins under concurrent resets
        let model = sqlx::query_as::<_, MetricsEpochModel>(
            r"
            INSERT INTO metrics_epochs (guild_id, start_at)
            VALUES ($1, $2)
            ON CONFLICT (guild_id) DO UPDATE SET start_at = $2
            RETURNING guild_id, start_at
            ",
        )
        .bind(guild_id.into_inner())
        .bind(start_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(MetricsEpoch::from(model))
    }

    #[instrument(skip(self))]
    async fn clear(&self, guild_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM metrics_epochs WHERE guild_id = $1
            ",
        )
        .bind(guild_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
