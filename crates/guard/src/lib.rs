//! Request guards for Meridian handlers.
//!
//! The decision engine only ever answers true or false; what a `false`
//! means to the caller lives here. Guards translate a deny into the
//! appropriate [`AppError`] (`Unauthorized` when no principal is present,
//! `Forbidden` otherwise) and emit the audit event for the denied attempt,
//! which the engine itself deliberately never does.

use tracing::warn;

use meridian_core::access::{AccessControl, Capability, OperationContext, OwnedResource, Principal};
use meridian_shared::{AppError, AppResult};

/// Requires `capability`; denies with 401/403 semantics otherwise.
pub fn require_capability(
    engine: &AccessControl,
    principal: Option<&Principal>,
    capability: Capability,
) -> AppResult<()> {
    if engine.has_capability(principal, capability) {
        return Ok(());
    }
    Err(deny(principal, "capability", capability.as_str()))
}

/// Requires access to `feature`; denies with 401/403 semantics otherwise.
pub fn require_feature(
    engine: &AccessControl,
    principal: Option<&Principal>,
    feature: &str,
) -> AppResult<()> {
    if engine.can_access_feature(principal, feature) {
        return Ok(());
    }
    Err(deny(principal, "feature", feature))
}

/// Requires permission for `operation` in `context`.
pub fn require_operation(
    engine: &AccessControl,
    principal: Option<&Principal>,
    operation: &str,
    context: &OperationContext,
) -> AppResult<()> {
    if engine.can_perform_operation(principal, operation, context) {
        return Ok(());
    }
    Err(deny(principal, "operation", operation))
}

/// Requires ownership of (or elevated access to) `resource`.
///
/// `subject` names the resource kind in the error message and audit event,
/// e.g. `"account"` or `"transaction"`.
pub fn require_owned(
    engine: &AccessControl,
    principal: Option<&Principal>,
    resource: &impl OwnedResource,
    subject: &str,
) -> AppResult<()> {
    if engine.can_access_owned_resource(principal, resource) {
        return Ok(());
    }
    Err(deny(principal, "ownership", subject))
}

/// Builds the error for a denied check and emits the audit event.
fn deny(principal: Option<&Principal>, gate: &'static str, subject: &str) -> AppError {
    match principal {
        None => AppError::Unauthorized("authentication required".to_string()),
        Some(p) => {
            warn!(
                principal = %p.id,
                role = p.role.map_or("none", |r| r.as_str()),
                gate,
                subject,
                "access denied"
            );
            AppError::Forbidden(format!("{gate} check failed for {subject}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use meridian_core::access::{PrincipalSnapshot, ResourceRef};

    use super::*;

    fn engine() -> AccessControl {
        AccessControl::default()
    }

    fn customer(id: &str, caps: &[&str]) -> Principal {
        Principal::from_snapshot(&PrincipalSnapshot {
            id: id.to_string(),
            role: Some("customer".to_string()),
            capabilities: caps.iter().map(ToString::to_string).collect(),
            is_active: true,
            assigned_counterparty: None,
        })
    }

    #[test]
    fn test_missing_principal_is_unauthorized() {
        let err = require_feature(&engine(), None, "account_view").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_denied_principal_is_forbidden() {
        let p = customer("u1", &[]);
        let err = require_capability(&engine(), Some(&p), Capability::TransactionApprove)
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_allowed_principal_passes() {
        let p = customer("u1", &["account_view"]);
        assert!(require_capability(&engine(), Some(&p), Capability::AccountView).is_ok());
        assert!(require_feature(&engine(), Some(&p), "account_view").is_ok());
    }

    #[test]
    fn test_operation_guard_honors_ownership() {
        let e = engine();
        let p = customer("u1", &["user_edit"]);
        assert!(
            require_operation(&e, Some(&p), "edit_user", &OperationContext::targeting("u1"))
                .is_ok()
        );
        let err =
            require_operation(&e, Some(&p), "edit_user", &OperationContext::targeting("u2"))
                .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn test_ownership_guard() {
        let e = engine();
        let p = customer("u1", &[]);
        assert!(require_owned(&e, Some(&p), &ResourceRef::owned_by("u1"), "account").is_ok());
        assert!(require_owned(&e, Some(&p), &ResourceRef::owned_by("u2"), "account").is_err());
        assert!(require_owned(&e, None, &ResourceRef::owned_by("u2"), "account").is_err());
    }
}
