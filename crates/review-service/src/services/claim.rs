//! Claim service
//!
//! Validates claim/unclaim preconditions and delegates the mutation to the
//! paired claim-plus-audit repository transaction. Every check runs before
//! any write, so an error always means nothing changed.

use tracing::{info, instrument};

use review_core::entities::{Application, Claim};
use review_core::error::DomainError;
use review_core::value_objects::Snowflake;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Claim service
pub struct ClaimService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClaimService<'a> {
    /// Create a new ClaimService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Preconditions shared by claim and unclaim, checked in order:
    /// application exists, panic mode is off, status is non-terminal.
    async fn validate_mutable(
        &self,
        app_id: Snowflake,
        guild_id: Snowflake,
    ) -> ServiceResult<Application> {
        let app = self
            .ctx
            .application_repo()
            .find_by_id(app_id)
            .await?
            .filter(|app| app.guild_id == guild_id)
            .ok_or(DomainError::AppNotFound(app_id))?;

        if self.ctx.panic_switch().is_active(guild_id).await? {
            return Err(DomainError::panic_mode().into());
        }

        if app.status.is_terminal() {
            return Err(DomainError::terminal_status(app.status).into());
        }

        Ok(app)
    }

    /// Take an exclusive claim on an application.
    ///
    /// Idempotent for the holder; fails `ALREADY_CLAIMED` for anyone else.
    #[instrument(skip(self))]
    pub async fn claim(
        &self,
        app_id: Snowflake,
        reviewer_id: Snowflake,
        guild_id: Snowflake,
    ) -> ServiceResult<Claim> {
        let app = self.validate_mutable(app_id, guild_id).await?;

        let claim = self
            .ctx
            .claim_repo()
            .claim_with_audit(app_id, reviewer_id, guild_id, app.user_id)
            .await?;

        info!(app_id = %app_id, reviewer_id = %reviewer_id, guild_id = %guild_id, "Application claimed");
        Ok(claim)
    }

    /// Release a claim held by the calling reviewer.
    #[instrument(skip(self))]
    pub async fn unclaim(
        &self,
        app_id: Snowflake,
        reviewer_id: Snowflake,
        guild_id: Snowflake,
    ) -> ServiceResult<()> {
        let app = self.validate_mutable(app_id, guild_id).await?;

        self.ctx
            .claim_repo()
            .unclaim_with_audit(app_id, reviewer_id, guild_id, app.user_id)
            .await?;

        info!(app_id = %app_id, reviewer_id = %reviewer_id, guild_id = %guild_id, "Application unclaimed");
        Ok(())
    }

    /// The claim on an application, if any
    #[instrument(skip(self))]
    pub async fn get_claim(&self, app_id: Snowflake) -> ServiceResult<Option<Claim>> {
        Ok(self.ctx.claim_repo().find(app_id).await?)
    }

    /// A reviewer's open caseload in a guild
    #[instrument(skip(self))]
    pub async fn get_reviewer_claims(
        &self,
        guild_id: Snowflake,
        reviewer_id: Snowflake,
    ) -> ServiceResult<Vec<Claim>> {
        Ok(self
            .ctx
            .claim_repo()
            .find_by_reviewer(guild_id, reviewer_id)
            .await?)
    }

    /// Unconditionally remove a claim row (decision-path cleanup).
    /// Returns whether a row existed.
    #[instrument(skip(self))]
    pub async fn clear_claim(&self, app_id: Snowflake) -> ServiceResult<bool> {
        let removed = self.ctx.claim_repo().delete(app_id).await?;
        if removed {
            info!(app_id = %app_id, "Claim cleared");
        }
        Ok(removed)
    }

    /// Pure guard for the command layer: a denial message when someone other
    /// than the claim holder tries to act on a claimed application, None
    /// when the action may proceed.
    pub fn claim_guard(claim: Option<&Claim>, acting_user_id: Snowflake) -> Option<String> {
        match claim {
            Some(claim) if !claim.is_held_by(acting_user_id) => Some(format!(
                "This application is claimed by <@{}>. Ask them to release it or wait for them to finish.",
                claim.reviewer_id
            )),
            _ => None,
        }
    }
}
