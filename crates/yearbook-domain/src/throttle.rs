//! Rolling-window throttle for passcode issuance.

use chrono::{DateTime, Duration, Utc};

/// Policy values governing passcode issuance and lifetime.
///
/// Defaults: 10-minute passcode TTL, at most 5 issuances per rolling
/// 60-minute window. Services may override from the environment.
#[derive(Debug, Clone, Copy)]
pub struct OtpPolicy {
    pub ttl: Duration,
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(10),
            max_requests: 5,
            window: Duration::minutes(60),
        }
    }
}

/// Per-record issuance counter, persisted on the record itself so that any
/// number of service instances share one view of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThrottleState {
    pub request_count: u32,
    pub window_started_at: Option<DateTime<Utc>>,
}

/// Outcome of a throttle check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    Permitted,
    /// Denied; the window reopens after this many whole seconds.
    Denied { retry_after_secs: i64 },
}

impl ThrottleState {
    /// Reset the window if it has lapsed, then decide whether one more
    /// issuance is allowed.
    ///
    /// A lapsed (or never-started) window resets the count to 0 and restarts
    /// the window at `now` before permitting. Inside a live window the check
    /// permits only while the count is below `policy.max_requests`. Denial
    /// leaves the state untouched; the caller persists nothing on denial.
    pub fn check_and_reset(&mut self, now: DateTime<Utc>, policy: &OtpPolicy) -> ThrottleDecision {
        match self.window_started_at {
            Some(started) if now - started <= policy.window => {
                if self.request_count < policy.max_requests {
                    ThrottleDecision::Permitted
                } else {
                    let reopens = (started + policy.window) - now;
                    ThrottleDecision::Denied {
                        retry_after_secs: reopens.num_seconds().max(0),
                    }
                }
            }
            _ => {
                self.request_count = 0;
                self.window_started_at = Some(now);
                ThrottleDecision::Permitted
            }
        }
    }

    /// Record one issuance. Call only after a permitted check.
    pub fn record_issue(&mut self) {
        self.request_count += 1;
    }
}
