//! Session expiry and login-lockout policy.
//!
//! Both policies are pure over a caller-supplied `now`; nothing here reads
//! the wall clock, so every decision is reproducible in tests. These are
//! the time-based collaborators that produce a trustworthy principal
//! snapshot before any access decision is made; they never make
//! authorization decisions themselves.

use chrono::{DateTime, Duration, Utc};

use meridian_shared::config::SessionConfig;

use super::types::{LoginTracker, Session, SessionStatus};

fn secs(value: u64) -> Duration {
    Duration::seconds(i64::try_from(value).unwrap_or(i64::MAX))
}

/// Idle-timeout and maximum-lifetime policy for sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    idle_timeout: Duration,
    max_lifetime: Duration,
}

impl SessionPolicy {
    /// Creates a policy with explicit windows.
    #[must_use]
    pub const fn new(idle_timeout: Duration, max_lifetime: Duration) -> Self {
        Self {
            idle_timeout,
            max_lifetime,
        }
    }

    /// Creates a policy from application configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(secs(config.idle_timeout_secs), secs(config.max_lifetime_secs))
    }

    /// Classifies `session` at `now`.
    ///
    /// Lifetime expiry takes precedence over idle expiry, and reaching a
    /// deadline exactly counts as expired.
    #[must_use]
    pub fn status(&self, session: &Session, now: DateTime<Utc>) -> SessionStatus {
        if now - session.created_at >= self.max_lifetime {
            return SessionStatus::LifetimeExpired;
        }
        if now - session.last_seen_at >= self.idle_timeout {
            return SessionStatus::IdleExpired;
        }
        SessionStatus::Active
    }

    /// Records activity at `now`, renewing the idle window only while the
    /// session is still active. Returns the status observed at `now`.
    pub fn touch(&self, session: &mut Session, now: DateTime<Utc>) -> SessionStatus {
        let status = self.status(session, now);
        if status.is_active() {
            session.last_seen_at = now;
        }
        status
    }
}

/// Consecutive-failure lockout policy for login attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    max_attempts: u32,
    lockout: Duration,
}

impl LockoutPolicy {
    /// Creates a policy with explicit limits.
    #[must_use]
    pub const fn new(max_attempts: u32, lockout: Duration) -> Self {
        Self {
            max_attempts,
            lockout,
        }
    }

    /// Creates a policy from application configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.max_login_attempts, secs(config.lockout_secs))
    }

    /// Returns true if logins for this tracker are currently refused.
    #[must_use]
    pub fn is_locked_out(&self, tracker: &LoginTracker, now: DateTime<Utc>) -> bool {
        tracker.locked_until.is_some_and(|until| now < until)
    }

    /// Records a failed login at `now`.
    ///
    /// An elapsed lockout clears before counting, so the failure that ends
    /// a lockout window starts a fresh count rather than re-tripping it.
    pub fn record_failure(&self, tracker: &mut LoginTracker, now: DateTime<Utc>) {
        if tracker.locked_until.is_some_and(|until| now >= until) {
            tracker.failures = 0;
            tracker.locked_until = None;
        }
        tracker.failures += 1;
        if tracker.failures >= self.max_attempts {
            tracker.locked_until = Some(now + self.lockout);
        }
    }

    /// Records a successful login, resetting the tracker.
    pub fn record_success(&self, tracker: &mut LoginTracker) {
        *tracker = LoginTracker::default();
    }
}
