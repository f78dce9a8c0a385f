//! PostgreSQL-backed panic switch
//!
//! The flag is written by the admin tooling; this core only reads it.
//! A guild without a settings row reads as "off".

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use review_core::traits::{PanicSwitch, RepoResult};
use review_core::value_objects::Snowflake;

use super::error::map_db_error;

/// PostgreSQL implementation of PanicSwitch
#[derive(Clone)]
pub struct PgPanicSwitch {
    pool: PgPool,
}

impl PgPanicSwitch {
    /// Create a new PgPanicSwitch
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PanicSwitch for PgPanicSwitch {
    #[instrument(skip(self))]
    async fn is_active(&self, guild_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT panic_mode FROM guild_settings WHERE guild_id = $1
            ",
        )
        .bind(guild_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.unwrap_or(false))
    }
}
