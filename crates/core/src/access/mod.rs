//! Role and capability based access control for Meridian.
//!
//! This module is the single home for authorization decisions; route
//! guards and operation handlers all import it rather than re-deriving
//! role checks locally.
//!
//! # Modules
//!
//! - `types` - Principal, role, and capability domain types
//! - `tables` - Static feature/operation requirement tables
//! - `engine` - The stateless allow/deny decision engine

pub mod engine;
pub mod tables;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::AccessControl;
pub use tables::{AccessConfigError, AccessPolicy};
pub use types::{
    Capability, CapabilityGrant, OperationContext, OwnedResource, Principal, PrincipalSnapshot,
    ResourceRef, Role, WILDCARD_TOKEN,
};
