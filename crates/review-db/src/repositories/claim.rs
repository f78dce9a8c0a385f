//! PostgreSQL implementation of ClaimRepository
//!
//! Claim and unclaim pair the claim-row mutation with its audit entry inside
//! a single transaction, so the claims table and the action log can never
//! disagree about who holds a case. The ownership check runs on a
//! `SELECT ... FOR UPDATE` inside the same transaction; the claims primary
//! key is the serialization point for insert races.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use review_core::entities::{ActionKind, Claim};
use review_core::error::DomainError;
use review_core::traits::{ClaimRepository, RepoResult};
use review_core::value_objects::Snowflake;

use crate::models::ClaimModel;

use super::error::{is_unique_violation, map_db_error};

/// PostgreSQL implementation of ClaimRepository
#[derive(Clone)]
pub struct PgClaimRepository {
    pool: PgPool,
}

impl PgClaimRepository {
    /// Create a new PgClaimRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<ClaimModel> for Claim {
    fn from(model: ClaimModel) -> Self {
        Claim {
            app_id: Snowflake::new(model.app_id),
            reviewer_id: Snowflake::new(model.reviewer_id),
            guild_id: Snowflake::new(model.guild_id),
            claimed_at: model.claimed_at,
        }
    }
}

/// Lock the claim row for an application, if one exists
async fn lock_claim(
    tx: &mut Transaction<'_, Postgres>,
    app_id: Snowflake,
) -> RepoResult<Option<ClaimModel>> {
    sqlx::query_as::<_, ClaimModel>(
        r"
        SELECT app_id, reviewer_id, guild_id, claimed_at
        FROM claims
        WHERE app_id = $1
        FOR UPDATE
        ",
    )
    .bind(app_id.into_inner())
    .fetch_optional(&mut **tx)
    .await
    .map_err(map_db_error)
}

/// Append one audit entry inside the claim transaction
async fn append_audit(
    tx: &mut Transaction<'_, Postgres>,
    guild_id: Snowflake,
    app_id: Snowflake,
    actor_id: Snowflake,
    subject_id: Snowflake,
    action: ActionKind,
) -> RepoResult<()> {
    sqlx::query(
        r"
        INSERT INTO action_log (guild_id, app_id, actor_id, subject_id, action)
        VALUES ($1, $2, $3, $4, $5)
        ",
    )
    .bind(guild_id.into_inner())
    .bind(app_id.into_inner())
    .bind(actor_id.into_inner())
    .bind(subject_id.into_inner())
    .bind(action.as_str())
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

#[async_trait]
impl ClaimRepository for PgClaimRepository {
    #[instrument(skip(self))]
    async fn find(&self, app_id: Snowflake) -> RepoResult<Option<Claim>> {
        let result = sqlx::query_as::<_, ClaimModel>(
            r"
            SELECT app_id, reviewer_id, guild_id, claimed_at
            FROM claims
            WHERE app_id = $1
            ",
        )
        .bind(app_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Claim::from))
    }

    #[instrument(skip(self))]
    async fn find_by_reviewer(
        &self,
        guild_id: Snowflake,
        reviewer_id: Snowflake,
    ) -> RepoResult<Vec<Claim>> {
        let results = sqlx::query_as::<_, ClaimModel>(
            r"
            SELECT app_id, reviewer_id, guild_id, claimed_at
            FROM claims
            WHERE guild_id = $1 AND reviewer_id = $2
            ORDER BY claimed_at
            ",
        )
        .bind(guild_id.into_inner())
        .bind(reviewer_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Claim::from).collect())
    }

    #[instrument(skip(self))]
    async fn claim_with_audit(
        &self,
        app_id: Snowflake,
        reviewer_id: Snowflake,
        guild_id: Snowflake,
        applicant_id: Snowflake,
    ) -> RepoResult<Claim> {
        // Two racing claimants can both pass the FOR UPDATE check before
        // either row exists; the loser's INSERT then hits the primary key.
        // One retry re-runs the locked read, which now sees the winner.
        for _ in 0..2 {
            let mut tx = self.pool.begin().await.map_err(map_db_error)?;

            if let Some(existing) = lock_claim(&mut tx, app_id).await? {
                let claim = Claim::from(existing);
                if claim.reviewer_id == reviewer_id {
                    // Idempotent re-claim; nothing is written
                    return Ok(claim);
                }
                return Err(DomainError::AlreadyClaimed {
                    owner: claim.reviewer_id,
                });
            }

            let inserted = sqlx::query_as::<_, ClaimModel>(
                r"
                INSERT INTO claims (app_id, reviewer_id, guild_id)
                VALUES ($1, $2, $3)
                RETURNING app_id, reviewer_id, guild_id, claimed_at
                ",
            )
            .bind(app_id.into_inner())
            .bind(reviewer_id.into_inner())
            .bind(guild_id.into_inner())
            .fetch_one(&mut *tx)
            .await;

            let model = match inserted {
                Ok(model) => model,
                Err(e) if is_unique_violation(&e) => continue,
                Err(e) => return Err(map_db_error(e)),
            };

            append_audit(
                &mut tx,
                guild_id,
                app_id,
                reviewer_id,
                applicant_id,
                ActionKind::Claim,
            )
            .await?;

            tx.commit().await.map_err(map_db_error)?;
            return Ok(Claim::from(model));
        }

        // Retry exhausted: a concurrent claim committed between our read and
        // insert both times. Report the current owner.
        match self.find(app_id).await? {
            Some(claim) => Err(DomainError::AlreadyClaimed {
                owner: claim.reviewer_id,
            }),
            None => Err(DomainError::DatabaseError(
                "claim insert race did not settle".to_string(),
            )),
        }
    }

    #[instrument(skip(self))]
    async fn unclaim_with_audit(
        &self,
        app_id: Snowflake,
        reviewer_id: Snowflake,
        guild_id: Snowflake,
        applicant_id: Snowflake,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let Some(existing) = lock_claim(&mut tx, app_id).await? else {
            return Err(DomainError::NotClaimed);
        };

        if existing.reviewer_id != reviewer_id.into_inner() {
            return Err(DomainError::NotOwner {
                owner: Snowflake::new(existing.reviewer_id),
            });
        }

        sqlx::query(
            r"
            DELETE FROM claims WHERE app_id = $1
            ",
        )
        .bind(app_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        append_audit(
            &mut tx,
            guild_id,
            app_id,
            reviewer_id,
            applicant_id,
            ActionKind::Unclaim,
        )
        .await?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, app_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM claims WHERE app_id = $1
            ",
        )
        .bind(app_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
