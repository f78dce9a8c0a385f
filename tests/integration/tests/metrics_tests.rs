//! Aggregation, caching, and epoch filtering tests over the in-memory backend

use std::time::Duration;

use chrono::{TimeZone, Utc};
use integration_tests::{
    moderation_entry, submission_entry, submitted_app, test_context, unique_id, MemoryBackend,
};
use review_core::entities::{ActionKind, Application};
use review_core::traits::ActionLogRepository;
use review_core::value_objects::Snowflake;
use review_service::{EpochService, MetricsService, TopSort};

const TTL: Duration = Duration::from_secs(300);

/// Submit an application and have `moderator` respond `delay_s` later with
/// `action`. Leaves the clock just after the response.
async fn respond_after(
    backend: &MemoryBackend,
    app: &Application,
    moderator: Snowflake,
    delay_s: i64,
    action: ActionKind,
) {
    backend.append(&submission_entry(app)).await.unwrap();
    backend.advance_clock(delay_s);
    backend
        .append(&moderation_entry(app, moderator, action))
        .await
        .unwrap();
    backend.advance_clock(1);
}

#[tokio::test]
async fn test_recalculate_counts_and_response_stats() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let moderator = unique_id();

    // Five applications answered after 10/20/30/40/50 seconds
    for delay in [10, 20, 30, 40, 50] {
        let app = submitted_app(guild);
        backend.seed_application(app.clone());
        respond_after(&backend, &app, moderator, delay, ActionKind::Claim).await;
    }
    // One of them also gets approved, much later
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    backend.advance_clock(10_000);
    backend
        .append(&moderation_entry(&app, moderator, ActionKind::Approve))
        .await
        .unwrap();

    let report = service.recalculate(guild).await.unwrap();
    assert_eq!(report.processed, 1);
    assert_eq!(report.skipped, 0);

    let row = service
        .get_moderator_metrics(guild, moderator)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_claims, 5);
    assert_eq!(row.total_accepts, 1);
    assert!((row.avg_response_time_s.unwrap() - 30.0).abs() < f64::EPSILON);
    assert_eq!(row.p50_response_time_s, Some(30));
    // Nearest-rank p95 over five samples lands on the largest
    assert_eq!(row.p95_response_time_s, Some(50));
}

#[tokio::test]
async fn test_nearest_rank_median_of_four() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let moderator = unique_id();

    for delay in [1, 2, 3, 4] {
        let app = submitted_app(guild);
        backend.seed_application(app.clone());
        respond_after(&backend, &app, moderator, delay, ActionKind::Claim).await;
    }

    service.recalculate(guild).await.unwrap();
    let row = service
        .get_moderator_metrics(guild, moderator)
        .await
        .unwrap()
        .unwrap();
    // rank = ceil(0.5 * 4) = 2, so the median of [1,2,3,4] is 2, not 2.5
    assert_eq!(row.p50_response_time_s, Some(2));
}

#[tokio::test]
async fn test_moderator_without_samples_has_null_stats() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let moderator = unique_id();

    // A kick with no preceding submission marker: counted, but no sample
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    backend
        .append(&moderation_entry(&app, moderator, ActionKind::Kick))
        .await
        .unwrap();

    service.recalculate(guild).await.unwrap();
    let row = service
        .get_moderator_metrics(guild, moderator)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_kicks, 1);
    assert!(row.avg_response_time_s.is_none());
    assert!(row.p50_response_time_s.is_none());
}

#[tokio::test]
async fn test_epoch_excludes_older_actions() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let metrics = MetricsService::new(&ctx);
    let epochs = EpochService::new(&ctx);

    let guild = unique_id();
    let veteran = unique_id();
    let newcomer = unique_id();

    // Veteran works before the cutoff
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, veteran, 10, ActionKind::Claim).await;

    backend.advance_clock(1_000);
    let cutoff = backend.now();
    backend.advance_clock(1_000);

    // Newcomer works after it
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, newcomer, 20, ActionKind::Claim).await;

    // Without an epoch both moderators are enumerated
    let report = metrics.recalculate(guild).await.unwrap();
    assert_eq!(report.processed, 2);

    epochs.set_epoch(guild, cutoff).await.unwrap();
    let report = metrics.recalculate(guild).await.unwrap();
    assert_eq!(report.processed, 1);
    // The veteran's stale row is pruned, not left at its old values
    assert_eq!(report.pruned, 1);

    let rows = metrics.get_guild_metrics(guild, false).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].moderator_id, newcomer);
    assert_eq!(rows[0].total_claims, 1);

    // Clearing the epoch restores full history on the next pass
    epochs.clear_epoch(guild).await.unwrap();
    let report = metrics.recalculate(guild).await.unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.pruned, 0);
}

#[tokio::test]
async fn test_recalculation_overwrites_wholesale() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let moderator = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;

    service.recalculate(guild).await.unwrap();
    service.recalculate(guild).await.unwrap();

    // Back-to-back runs over the same log must not double-count
    let row = service
        .get_moderator_metrics(guild, moderator)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.total_claims, 1);
}

#[tokio::test]
async fn test_cache_miss_recomputes_from_log() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let moderator = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;

    // No prior recalculation: the first read aggregates on its own
    let rows = service.get_guild_metrics(guild, false).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].total_claims, 1);
}

#[tokio::test]
async fn test_cached_reads_within_ttl() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, Duration::from_millis(50));
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let moderator = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;

    let rows = service.get_guild_metrics(guild, false).await.unwrap();
    assert_eq!(rows[0].total_claims, 1);

    // New work lands; the fresh snapshot keeps serving the old numbers
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;

    let rows = service.get_guild_metrics(guild, false).await.unwrap();
    assert_eq!(rows[0].total_claims, 1);

    // Once the TTL lapses the next read recomputes and picks it up
    tokio::time::sleep(Duration::from_millis(80)).await;
    let rows = service.get_guild_metrics(guild, false).await.unwrap();
    assert_eq!(rows[0].total_claims, 2);
}

#[tokio::test]
async fn test_recalculate_invalidates_cache_immediately() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let moderator = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;

    service.recalculate(guild).await.unwrap();
    service.get_guild_metrics(guild, false).await.unwrap();

    // New work lands, then a recalculation; the long TTL must not matter
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;
    service.recalculate(guild).await.unwrap();

    let rows = service.get_guild_metrics(guild, false).await.unwrap();
    assert_eq!(rows[0].total_claims, 2);
}

#[tokio::test]
async fn test_force_refresh_bypasses_cache() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let moderator = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;

    // Prime a fresh snapshot, then let new work land behind it
    let rows = service.get_guild_metrics(guild, false).await.unwrap();
    assert_eq!(rows[0].total_claims, 1);

    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;

    // The long TTL still serves the snapshot, but forcing does not
    let rows = service.get_guild_metrics(guild, false).await.unwrap();
    assert_eq!(rows[0].total_claims, 1);

    let rows = service.get_guild_metrics(guild, true).await.unwrap();
    assert_eq!(rows[0].total_claims, 2);
}

#[tokio::test]
async fn test_top_moderators_sorting() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild = unique_id();
    let fast = unique_id();
    let slow = unique_id();
    let idle = unique_id();

    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, fast, 5, ActionKind::Claim).await;

    for _ in 0..2 {
        let app = submitted_app(guild);
        backend.seed_application(app.clone());
        respond_after(&backend, &app, slow, 500, ActionKind::Claim).await;
    }

    // Third moderator with actions but no response-time samples
    let app = submitted_app(guild);
    backend.seed_application(app.clone());
    backend
        .append(&moderation_entry(&app, idle, ActionKind::ModmailOpen))
        .await
        .unwrap();

    service.recalculate(guild).await.unwrap();

    let by_claims = service
        .get_top_moderators(guild, TopSort::Claims, 10)
        .await
        .unwrap();
    assert_eq!(by_claims[0].moderator_id, slow);

    let by_speed = service
        .get_top_moderators(guild, TopSort::ResponseTime, 10)
        .await
        .unwrap();
    assert_eq!(by_speed[0].moderator_id, fast);
    // Sample-less moderators always rank last on response time
    assert_eq!(by_speed[2].moderator_id, idle);

    let top_one = service
        .get_top_moderators(guild, TopSort::Claims, 1)
        .await
        .unwrap();
    assert_eq!(top_one.len(), 1);
}

#[tokio::test]
async fn test_guilds_are_isolated() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = MetricsService::new(&ctx);

    let guild_a = unique_id();
    let guild_b = unique_id();
    let moderator = unique_id();

    let app = submitted_app(guild_a);
    backend.seed_application(app.clone());
    respond_after(&backend, &app, moderator, 10, ActionKind::Claim).await;

    service.recalculate(guild_a).await.unwrap();
    service.recalculate(guild_b).await.unwrap();

    assert_eq!(service.get_guild_metrics(guild_a, false).await.unwrap().len(), 1);
    assert!(service.get_guild_metrics(guild_b, false).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_epoch_last_write_wins() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = EpochService::new(&ctx);

    let guild = unique_id();
    assert!(service.get_epoch(guild).await.unwrap().is_none());

    let first = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let second = Utc.timestamp_opt(1_800_000_000, 0).unwrap();
    service.set_epoch(guild, first).await.unwrap();
    service.set_epoch(guild, second).await.unwrap();

    let epoch = service.get_epoch(guild).await.unwrap().unwrap();
    assert_eq!(epoch.bound_s(), Some(1_800_000_000));

    assert!(service.clear_epoch(guild).await.unwrap());
    assert!(!service.clear_epoch(guild).await.unwrap());
}
