//! End-to-end claim lifecycle tests over the in-memory backend

use std::time::Duration;

use integration_tests::{decided_app, submitted_app, test_context, unique_id, MemoryBackend};
use review_core::entities::ApplicationStatus;
use review_core::error::DomainError;
use review_service::{ClaimService, ServiceError};

const TTL: Duration = Duration::from_secs(300);

fn domain(err: &ServiceError) -> &DomainError {
    err.as_domain().expect("expected a domain error")
}

#[tokio::test]
async fn test_claim_then_release() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    let reviewer = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());

    let claim = service.claim(app.id, reviewer, guild).await.unwrap();
    assert_eq!(claim.reviewer_id, reviewer);
    assert!(service.get_claim(app.id).await.unwrap().is_some());

    service.unclaim(app.id, reviewer, guild).await.unwrap();
    assert!(service.get_claim(app.id).await.unwrap().is_none());

    // claim + unclaim, each audited exactly once
    assert_eq!(backend.audit_count(app.id), 2);
}

#[tokio::test]
async fn test_reclaim_by_holder_is_idempotent() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    let reviewer = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());

    let first = service.claim(app.id, reviewer, guild).await.unwrap();
    backend.advance_clock(60);
    let second = service.claim(app.id, reviewer, guild).await.unwrap();

    // The original claim survives untouched and no second audit entry lands
    assert_eq!(first.claimed_at, second.claimed_at);
    assert_eq!(backend.audit_count(app.id), 1);
}

#[tokio::test]
async fn test_second_reviewer_is_rejected() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    let holder = unique_id();
    let intruder = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());

    service.claim(app.id, holder, guild).await.unwrap();
    let err = service.claim(app.id, intruder, guild).await.unwrap_err();

    assert_eq!(err.error_code(), "ALREADY_CLAIMED");
    assert!(matches!(domain(&err), DomainError::AlreadyClaimed { owner } if *owner == holder));
    // The failed attempt wrote nothing
    assert_eq!(backend.audit_count(app.id), 1);
}

#[tokio::test]
async fn test_unclaim_requires_ownership() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    let holder = unique_id();
    let intruder = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());

    let err = service.unclaim(app.id, holder, guild).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_CLAIMED");

    service.claim(app.id, holder, guild).await.unwrap();
    let err = service.unclaim(app.id, intruder, guild).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_OWNER");
    assert!(matches!(domain(&err), DomainError::NotOwner { owner } if *owner == holder));

    // The claim is still held after both failed attempts
    let claim = service.get_claim(app.id).await.unwrap().unwrap();
    assert_eq!(claim.reviewer_id, holder);
}

#[tokio::test]
async fn test_unknown_application() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let err = service
        .claim(unique_id(), unique_id(), unique_id())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "APP_NOT_FOUND");
}

#[tokio::test]
async fn test_application_from_another_guild_is_not_visible() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let home_guild = unique_id();
    let other_guild = unique_id();
    let app = submitted_app(home_guild);
    backend.seed_application(app.clone());

    let err = service
        .claim(app.id, unique_id(), other_guild)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "APP_NOT_FOUND");
}

#[tokio::test]
async fn test_terminal_application_locks_mutation() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    for status in [
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
        ApplicationStatus::Kicked,
    ] {
        let app = decided_app(guild, status);
        backend.seed_application(app.clone());

        let err = service.claim(app.id, unique_id(), guild).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_STATUS");
        assert_eq!(backend.audit_count(app.id), 0);
    }
}

#[tokio::test]
async fn test_needs_info_application_is_still_open() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    let app = decided_app(guild, ApplicationStatus::NeedsInfo);
    backend.seed_application(app.clone());

    assert!(service.claim(app.id, unique_id(), guild).await.is_ok());
}

#[tokio::test]
async fn test_panic_mode_freezes_claims() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    let reviewer = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());

    service.claim(app.id, reviewer, guild).await.unwrap();

    backend.set_panic(guild, true);
    let err = service.unclaim(app.id, reviewer, guild).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATUS");

    let other_app = submitted_app(guild);
    backend.seed_application(other_app.clone());
    let err = service
        .claim(other_app.id, reviewer, guild)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "INVALID_STATUS");

    // Lifting the switch restores normal operation
    backend.set_panic(guild, false);
    assert!(service.unclaim(app.id, reviewer, guild).await.is_ok());
}

#[tokio::test]
async fn test_clear_claim_bypasses_ownership() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    let app = submitted_app(guild);
    backend.seed_application(app.clone());

    service.claim(app.id, unique_id(), guild).await.unwrap();
    assert!(service.clear_claim(app.id).await.unwrap());
    assert!(!service.clear_claim(app.id).await.unwrap());
    assert!(service.get_claim(app.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_reviewer_caseload() {
    let backend = MemoryBackend::new();
    let ctx = test_context(&backend, TTL);
    let service = ClaimService::new(&ctx);

    let guild = unique_id();
    let reviewer = unique_id();
    let app_a = submitted_app(guild);
    let app_b = submitted_app(guild);
    backend.seed_application(app_a.clone());
    backend.seed_application(app_b.clone());

    service.claim(app_a.id, reviewer, guild).await.unwrap();
    backend.advance_clock(10);
    service.claim(app_b.id, reviewer, guild).await.unwrap();

    let held = service.get_reviewer_claims(guild, reviewer).await.unwrap();
    assert_eq!(held.len(), 2);
    assert_eq!(held[0].app_id, app_a.id);
}
