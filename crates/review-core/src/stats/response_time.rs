//! Response-time sample derivation
//!
//! A sample measures how long an application sat between its latest
//! submission and the first qualifying moderator action after it. Credit
//! goes to whoever acted first, not to whoever ultimately decided the case.

use std::collections::HashMap;

use crate::entities::{ActionKind, ActionLogEntry};
use crate::value_objects::Snowflake;

use super::percentile::{mean, nearest_rank};

/// Samples above seven days come from orphaned data and would distort the
/// percentiles, so they are discarded.
pub const MAX_RESPONSE_TIME_S: i64 = 7 * 86_400;

/// Derive per-moderator response-time samples from a guild's action log.
///
/// Entries are grouped by application. Within a group the chronologically
/// latest `app_submitted` wins, so a resubmission after rejection restarts
/// the clock. The first qualifying moderator action strictly after that
/// submission yields one sample for its actor. Non-positive samples (clock
/// skew) and samples above [`MAX_RESPONSE_TIME_S`] are dropped.
pub fn response_time_samples(entries: &[ActionLogEntry]) -> HashMap<Snowflake, Vec<i64>> {
    let mut by_app: HashMap<Snowflake, Vec<&ActionLogEntry>> = HashMap::new();
    for entry in entries {
        if let Some(app_id) = entry.app_id {
            by_app.entry(app_id).or_default().push(entry);
        }
    }

    let mut samples: HashMap<Snowflake, Vec<i64>> = HashMap::new();
    for group in by_app.values_mut() {
        group.sort_by_key(|e| (e.created_at_s, e.id));

        let Some(submitted) = group
            .iter()
            .filter(|e| e.action == ActionKind::AppSubmitted)
            .last()
        else {
            continue;
        };

        let Some(first_response) = group.iter().find(|e| {
            ActionKind::MODERATOR_ACTIONS.contains(&e.action)
                && e.created_at_s > submitted.created_at_s
        }) else {
            continue;
        };

        let response_time = first_response.created_at_s - submitted.created_at_s;
        if response_time <= 0 || response_time > MAX_RESPONSE_TIME_S {
            continue;
        }
        samples
            .entry(first_response.actor_id)
            .or_default()
            .push(response_time);
    }
    samples
}

/// Summary statistics over one moderator's samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseTimeStats {
    pub avg: f64,
    pub p50: i64,
    pub p95: i64,
}

/// avg/p50/p95 over a sample set; None when there are no samples
pub fn summarize(samples: &[i64]) -> Option<ResponseTimeStats> {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    Some(ResponseTimeStats {
        avg: mean(&sorted)?,
        p50: nearest_rank(&sorted, 50.0)?,
        p95: nearest_rank(&sorted, 95.0)?,
    })
}
