//! Session expiry and login-lockout policy for Meridian.
//!
//! # Modules
//!
//! - `types` - Session, status, and login-tracker types
//! - `policy` - Clock-injected expiry and lockout logic

pub mod policy;
pub mod types;

pub use policy::{LockoutPolicy, SessionPolicy};
pub use types::{LoginTracker, Session, SessionStatus};
