//! Session domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use meridian_shared::types::{PrincipalId, SessionId};

/// An authenticated session.
///
/// Sessions carry only timing state; what the session's principal may do is
/// decided by the access-control engine against a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// The authenticated principal.
    pub principal_id: PrincipalId,
    /// When the session was established.
    pub created_at: DateTime<Utc>,
    /// Last observed activity.
    pub last_seen_at: DateTime<Utc>,
}

impl Session {
    /// Starts a new session for `principal_id` at `now`.
    #[must_use]
    pub fn start(principal_id: PrincipalId, now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::generate(),
            principal_id,
            created_at: now,
            last_seen_at: now,
        }
    }
}

/// Classification of a session at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Within both the idle and lifetime windows.
    Active,
    /// No activity for longer than the idle timeout.
    IdleExpired,
    /// Older than the maximum session lifetime.
    LifetimeExpired,
}

impl SessionStatus {
    /// Returns true if the session may still be used.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Consecutive-failure state for one login identity.
///
/// Mutated only through [`super::policy::LockoutPolicy`]; the default value
/// is a clean slate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginTracker {
    pub(super) failures: u32,
    pub(super) locked_until: Option<DateTime<Utc>>,
}

impl LoginTracker {
    /// Number of consecutive failures recorded.
    #[must_use]
    pub const fn failures(&self) -> u32 {
        self.failures
    }

    /// When the current lockout ends, if one is in force.
    #[must_use]
    pub const fn locked_until(&self) -> Option<DateTime<Utc>> {
        self.locked_until
    }
}
