//! Background metrics recalculation scheduler
//!
//! Run with:
//! ```bash
//! cargo run -p review-jobs
//! ```
//!
//! Walks every guild with action-log history on a fixed interval and
//! regenerates its moderator metrics. Configuration is loaded from
//! environment variables (`.env` supported).

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use review_cache::MetricsCache;
use review_common::{try_init_tracing, AppConfig};
use review_db::{
    create_pool, DatabaseConfig, PgActionLogRepository, PgApplicationRepository,
    PgClaimRepository, PgEpochRepository, PgMetricsRepository, PgPanicSwitch, MIGRATOR,
};
use review_service::{MetricsService, ServiceContext, ServiceContextBuilder};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Scheduler failed");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    info!("Starting review metrics scheduler...");

    let config = AppConfig::from_env()?;
    info!(env = ?config.app.env, interval_secs = config.metrics.recalc_interval_secs, "Configuration loaded");

    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..DatabaseConfig::default()
    };
    let pool = create_pool(&db_config).await?;
    MIGRATOR.run(&pool).await?;
    info!("Database pool ready, migrations applied");

    let cache = Arc::new(MetricsCache::new(Duration::from_secs(
        config.metrics.cache_ttl_secs,
    )));
    let ctx = ServiceContextBuilder::new()
        .application_repo(Arc::new(PgApplicationRepository::new(pool.clone())))
        .claim_repo(Arc::new(PgClaimRepository::new(pool.clone())))
        .action_log_repo(Arc::new(PgActionLogRepository::new(pool.clone())))
        .metrics_repo(Arc::new(PgMetricsRepository::new(pool.clone())))
        .epoch_repo(Arc::new(PgEpochRepository::new(pool.clone())))
        .panic_switch(Arc::new(PgPanicSwitch::new(pool.clone())))
        .metrics_cache(cache)
        .build()
        .map_err(|e| anyhow::anyhow!("service context: {e}"))?;

    let mut interval = tokio::time::interval(Duration::from_secs(
        config.metrics.recalc_interval_secs,
    ));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                recalculate_all(&ctx).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping scheduler");
                break;
            }
        }
    }

    Ok(())
}

/// One full sweep over every guild with log history. A guild that fails is
/// logged and skipped so the sweep always completes.
async fn recalculate_all(ctx: &ServiceContext) {
    let guilds = match ctx.action_log_repo().distinct_guilds().await {
        Ok(guilds) => guilds,
        Err(e) => {
            error!(error = %e, "Failed to enumerate guilds, skipping sweep");
            return;
        }
    };

    let service = MetricsService::new(ctx);
    let mut failures = 0usize;
    for guild_id in &guilds {
        if let Err(e) = service.recalculate(*guild_id).await {
            warn!(guild_id = %guild_id, error = %e, "Guild recalculation failed");
            failures += 1;
        }
    }
    info!(guilds = guilds.len(), failures, "Recalculation sweep complete");
}
