//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ActionCounts, ActionLogRepository, ApplicationRepository, ClaimRepository, EpochRepository,
    MetricsRepository, PanicSwitch, RepoResult,
};
