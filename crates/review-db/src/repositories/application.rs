//! PostgreSQL implementation of ApplicationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use review_core::entities::{Application, ApplicationStatus};
use review_core::traits::{ApplicationRepository, RepoResult};
use review_core::value_objects::Snowflake;

use crate::models::ApplicationModel;

use super::error::{map_db_error, unknown_enum_value};

/// PostgreSQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_application(model: ApplicationModel) -> RepoResult<Application> {
    let status = ApplicationStatus::parse(&model.status)
        .ok_or_else(|| unknown_enum_value("status", &model.status))?;
    Ok(Application {
        id: Snowflake::new(model.id),
        guild_id: Snowflake::new(model.guild_id),
        user_id: Snowflake::new(model.user_id),
        status,
    })
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(
            r"
            SELECT id, guild_id, user_id, status
            FROM applications
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(map_application).transpose()
    }
}
