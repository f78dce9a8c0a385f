//! PostgreSQL implementation of ActionLogRepository
//!
//! The action log is append-only; nothing here updates or deletes rows.
//! Epoch filtering is always a typed bound parameter
//! (`$n::BIGINT IS NULL OR created_at_s >= $n`), never an interpolated
//! SQL fragment.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;

use review_core::entities::{ActionKind, ActionLogEntry, NewActionLogEntry};
use review_core::traits::{ActionCounts, ActionLogRepository, RepoResult};
use review_core::value_objects::Snowflake;

use crate::models::ActionLogModel;

use super::error::{map_db_error, unknown_enum_value};

/// PostgreSQL implementation of ActionLogRepository
#[derive(Clone)]
pub struct PgActionLogRepository {
    pool: PgPool,
}

impl PgActionLogRepository {
    /// Create a new PgActionLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_entry(model: ActionLogModel) -> RepoResult<ActionLogEntry> {
    let action =
        ActionKind::parse(&model.action).ok_or_else(|| unknown_enum_value("action", &model.action))?;
    Ok(ActionLogEntry {
        id: model.id,
        guild_id: Snowflake::new(model.guild_id),
        app_id: model.app_id.map(Snowflake::new),
        actor_id: Snowflake::new(model.actor_id),
        subject_id: Snowflake::new(model.subject_id),
        action,
        reason: model.reason,
        meta: model.meta,
        created_at_s: model.created_at_s,
    })
}

/// Qualifying moderator actions as bindable strings
fn moderator_actions() -> Vec<String> {
    ActionKind::MODERATOR_ACTIONS
        .iter()
        .map(|a| a.as_str().to_string())
        .collect()
}

#[derive(Debug, FromRow)]
struct ActionCountsRow {
    claims: i64,
    accepts: i64,
    rejects: i64,
    kicks: i64,
    modmail_opens: i64,
}

#[async_trait]
impl ActionLogRepository for PgActionLogRepository {
    #[instrument(skip(self, entry), fields(guild_id = %entry.guild_id, action = %entry.action))]
    async fn append(&self, entry: &NewActionLogEntry) -> RepoResult<ActionLogEntry> {
        let model = sqlx::query_as::<_, ActionLogModel>(
            r"
            INSERT INTO action_log (guild_id, app_id, actor_id, subject_id, action, reason, meta)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, guild_id, app_id, actor_id, subject_id, action, reason, meta, created_at_s
            ",
        )
        .bind(entry.guild_id.into_inner())
        .bind(entry.app_id.map(Snowflake::into_inner))
        .bind(entry.actor_id.into_inner())
        .bind(entry.subject_id.into_inner())
        .bind(entry.action.as_str())
        .bind(&entry.reason)
        .bind(&entry.meta)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        map_entry(model)
    }

    #[instrument(skip(self))]
    async fn fetch_for_guild(
        &self,
        guild_id: Snowflake,
        since: Option<i64>,
    ) -> RepoResult<Vec<ActionLogEntry>> {
        let results = sqlx::query_as::<_, ActionLogModel>(
            r"
            SELECT id, guild_id, app_id, actor_id, subject_id, action, reason, meta, created_at_s
            FROM action_log
            WHERE guild_id = $1
              AND ($2::BIGINT IS NULL OR created_at_s >= $2)
            ORDER BY created_at_s, id
            ",
        )
        .bind(guild_id.into_inner())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(map_entry).collect()
    }

    #[instrument(skip(self))]
    async fn recent_for_app(
        &self,
        app_id: Snowflake,
        limit: i64,
    ) -> RepoResult<Vec<ActionLogEntry>> {
        let results = sqlx::query_as::<_, ActionLogModel>(
            r"
            SELECT id, guild_id, app_id, actor_id, subject_id, action, reason, meta, created_at_s
            FROM action_log
            WHERE app_id = $1
            ORDER BY created_at_s DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(app_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(map_entry).collect()
    }

    #[instrument(skip(self))]
    async fn distinct_actors(
        &self,
        guild_id: Snowflake,
        since: Option<i64>,
    ) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT DISTINCT actor_id
            FROM action_log
            WHERE guild_id = $1
              AND action = ANY($2)
              AND ($3::BIGINT IS NULL OR created_at_s >= $3)
            ",
        )
        .bind(guild_id.into_inner())
        .bind(moderator_actions())
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn action_counts(
        &self,
        guild_id: Snowflake,
        actor_id: Snowflake,
        since: Option<i64>,
    ) -> RepoResult<ActionCounts> {
        let row = sqlx::query_as::<_, ActionCountsRow>(
            r"
            SELECT
                COUNT(*) FILTER (WHERE action = 'claim')        AS claims,
                COUNT(*) FILTER (WHERE action = 'approve')      AS accepts,
                COUNT(*) FILTER (WHERE action IN ('reject', 'perm_reject')) AS rejects,
                COUNT(*) FILTER (WHERE action = 'kick')         AS kicks,
                COUNT(*) FILTER (WHERE action = 'modmail_open') AS modmail_opens
            FROM action_log
            WHERE guild_id = $1
              AND actor_id = $2
              AND ($3::BIGINT IS NULL OR created_at_s >= $3)
            ",
        )
        .bind(guild_id.into_inner())
        .bind(actor_id.into_inner())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ActionCounts {
            claims: row.claims,
            accepts: row.accepts,
            rejects: row.rejects,
            kicks: row.kicks,
            modmail_opens: row.modmail_opens,
        })
    }

    #[instrument(skip(self))]
    async fn distinct_guilds(&self) -> RepoResult<Vec<Snowflake>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT DISTINCT guild_id FROM action_log
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }
}
