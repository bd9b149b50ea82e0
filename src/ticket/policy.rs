//! Expiration Policy Module
//!
//! Describes how long a ticket may live and how long it may sit idle.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

// == Expiration Policy ==
/// Lifetime bounds attached to a ticket at issuance.
///
/// A policy is an immutable value; tickets of the same type share identical
/// policies and evaluating one has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpirationPolicy {
    /// Maximum lifetime from creation, in seconds
    pub time_to_live: u64,
    /// Maximum inactivity gap in seconds, 0 = no idle limit
    pub time_to_idle: u64,
}

impl ExpirationPolicy {
    // == Constructors ==
    /// Creates a policy with both a lifetime and an idle bound.
    pub fn timeout(time_to_live: u64, time_to_idle: u64) -> Self {
        Self {
            time_to_live,
            time_to_idle,
        }
    }

    /// Creates a policy that only enforces the absolute lifetime.
    pub fn hard_timeout(time_to_live: u64) -> Self {
        Self::timeout(time_to_live, 0)
    }

    // == Effective Idle ==
    /// Idle bound handed to backends.
    ///
    /// Falls back to `time_to_live` when idle tracking is disabled, so the
    /// backend never evicts an idle ticket before its lifetime is up.
    pub fn effective_idle(&self) -> u64 {
        if self.time_to_idle > 0 {
            self.time_to_idle
        } else {
            self.time_to_live
        }
    }

    /// Returns true when idle tracking is enabled.
    pub fn tracks_idle(&self) -> bool {
        self.time_to_idle > 0
    }

    /// Returns an error message when the policy cannot be stored.
    pub fn validate(&self) -> Option<String> {
        if self.time_to_live == 0 {
            return Some("time-to-live must be greater than zero".to_string());
        }
        None
    }

    // == Is Expired ==
    /// Checks logical expiration.
    ///
    /// Boundary condition: a ticket is expired as soon as the elapsed time
    /// reaches either bound, i.e. `elapsed >= bound`.
    pub fn is_expired(
        &self,
        creation_time: DateTime<Utc>,
        last_used_time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        if now - creation_time >= seconds(self.time_to_live) {
            return true;
        }
        self.tracks_idle() && now - last_used_time >= seconds(self.time_to_idle)
    }
}

/// Converts seconds to a chrono duration, saturating on overflow.
fn seconds(secs: u64) -> Duration {
    i64::try_from(secs)
        .ok()
        .and_then(Duration::try_seconds)
        .unwrap_or(Duration::MAX)
}
