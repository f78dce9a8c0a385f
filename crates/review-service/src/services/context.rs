//! Service context - dependency container for services
//!
//! Holds the repositories, the panic switch, and the metrics cache. The
//! cache is deliberately a constructor-injected collaborator rather than a
//! module-level singleton so its TTL can be overridden in tests.

use std::sync::Arc;

use review_cache::MetricsCache;
use review_core::traits::{
    ActionLogRepository, ApplicationRepository, ClaimRepository, EpochRepository,
    MetricsRepository, PanicSwitch,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    application_repo: Arc<dyn ApplicationRepository>,
    claim_repo: Arc<dyn ClaimRepository>,
    action_log_repo: Arc<dyn ActionLogRepository>,
    metrics_repo: Arc<dyn MetricsRepository>,
    epoch_repo: Arc<dyn EpochRepository>,
    panic_switch: Arc<dyn PanicSwitch>,
    metrics_cache: Arc<MetricsCache>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        application_repo: Arc<dyn ApplicationRepository>,
        claim_repo: Arc<dyn ClaimRepository>,
        action_log_repo: Arc<dyn ActionLogRepository>,
        metrics_repo: Arc<dyn MetricsRepository>,
        epoch_repo: Arc<dyn EpochRepository>,
        panic_switch: Arc<dyn PanicSwitch>,
        metrics_cache: Arc<MetricsCache>,
    ) -> Self {
        Self {
            application_repo,
            claim_repo,
            action_log_repo,
            metrics_repo,
            epoch_repo,
            panic_switch,
            metrics_cache,
        }
    }

    /// Get the application repository
    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    /// Get the claim repository
    pub fn claim_repo(&self) -> &dyn ClaimRepository {
        self.claim_repo.as_ref()
    }

    /// Get the action log repository
    pub fn action_log_repo(&self) -> &dyn ActionLogRepository {
        self.action_log_repo.as_ref()
    }

    /// Get the metrics repository
    pub fn metrics_repo(&self) -> &dyn MetricsRepository {
        self.metrics_repo.as_ref()
    }

    /// Get the epoch repository
    pub fn epoch_repo(&self) -> &dyn EpochRepository {
        self.epoch_repo.as_ref()
    }

    /// Get the panic switch
    pub fn panic_switch(&self) -> &dyn PanicSwitch {
        self.panic_switch.as_ref()
    }

    /// Get the metrics cache
    pub fn metrics_cache(&self) -> &MetricsCache {
        self.metrics_cache.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("metrics_cache", &self.metrics_cache)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    application_repo: Option<Arc<dyn ApplicationRepository>>,
    claim_repo: Option<Arc<dyn ClaimRepository>>,
    action_log_repo: Option<Arc<dyn ActionLogRepository>>,
    metrics_repo: Option<Arc<dyn MetricsRepository>>,
    epoch_repo: Option<Arc<dyn EpochRepository>>,
    panic_switch: Option<Arc<dyn PanicSwitch>>,
    metrics_cache: Option<Arc<MetricsCache>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn application_repo(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.application_repo = Some(repo);
        self
    }

    pub fn claim_repo(mut self, repo: Arc<dyn ClaimRepository>) -> Self {
        self.claim_repo = Some(repo);
        self
    }

    pub fn action_log_repo(mut self, repo: Arc<dyn ActionLogRepository>) -> Self {
        self.action_log_repo = Some(repo);
        self
    }

    pub fn metrics_repo(mut self, repo: Arc<dyn MetricsRepository>) -> Self {
        self.metrics_repo = Some(repo);
        self
    }

    pub fn epoch_repo(mut self, repo: Arc<dyn EpochRepository>) -> Self {
        self.epoch_repo = Some(repo);
        self
    }

    pub fn panic_switch(mut self, switch: Arc<dyn PanicSwitch>) -> Self {
        self.panic_switch = Some(switch);
        self
    }

    pub fn metrics_cache(mut self, cache: Arc<MetricsCache>) -> Self {
        self.metrics_cache = Some(cache);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.application_repo
                .ok_or_else(|| ServiceError::validation("application_repo is required"))?,
            self.claim_repo
                .ok_or_else(|| ServiceError::validation("claim_repo is required"))?,
            self.action_log_repo
                .ok_or_else(|| ServiceError::validation("action_log_repo is required"))?,
            self.metrics_repo
                .ok_or_else(|| ServiceError::validation("metrics_repo is required"))?,
            self.epoch_repo
                .ok_or_else(|| ServiceError::validation("epoch_repo is required"))?,
            self.panic_switch
                .ok_or_else(|| ServiceError::validation("panic_switch is required"))?,
            self.metrics_cache
                .unwrap_or_else(|| Arc::new(MetricsCache::default())),
        ))
    }
}
