//! Core business logic for Meridian.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types and decision logic live here.
//!
//! # Modules
//!
//! - `access` - Role and capability based access-control decisions
//! - `session` - Session expiry and login-lockout policy

pub mod access;
pub mod session;
