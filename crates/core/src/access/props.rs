//! Property-based tests for the access-control engine.
//!
//! - Fail-closed: unknown tokens, features, and operations always deny.
//! - Inactive principals hold no effective capabilities.
//! - The wildcard grant is equivalent to holding the full universe.
//! - Every predicate is deterministic over immutable inputs.

use proptest::prelude::*;

use super::engine::AccessControl;
use super::types::{Capability, OperationContext, Principal, PrincipalSnapshot, ResourceRef};

/// Strategy for an arbitrary capability from the known universe.
fn known_capability() -> impl Strategy<Value = Capability> {
    (0..Capability::ALL.len()).prop_map(|i| Capability::ALL[i])
}

/// Strategy for a subset of the known universe, as token strings.
fn grant_tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(known_capability(), 0..6)
        .prop_map(|caps| caps.iter().map(|c| c.as_str().to_string()).collect())
}

/// Strategy for a role string, sometimes unrecognized.
fn role_string() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("admin".to_string()),
        Just("manager".to_string()),
        Just("support".to_string()),
        Just("customer".to_string()),
        "[a-z]{3,10}",
    ]
}

fn snapshot(
    id: String,
    role: String,
    capabilities: Vec<String>,
    is_active: bool,
) -> PrincipalSnapshot {
    PrincipalSnapshot {
        id,
        role: Some(role),
        capabilities,
        is_active,
        assigned_counterparty: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// *For any* token string outside the known universe, every string
    /// entry point denies without panicking.
    #[test]
    fn prop_unknown_strings_fail_closed(
        token in "[a-zA-Z_*]{1,20}",
        grants in grant_tokens(),
        role in role_string(),
    ) {
        let engine = AccessControl::default();
        prop_assume!(Capability::parse(&token).is_none());
        prop_assume!(engine.policy().feature_requirements(&token).is_none());
        prop_assume!(engine.policy().operation_requirements(&token).is_none());

        let p = Principal::from_snapshot(&snapshot("u1".into(), role, grants, true));

        prop_assert!(!engine.has_capability_named(Some(&p), &token));
        prop_assert!(!engine.can_access_feature(Some(&p), &token));
        prop_assert!(
            !engine.can_perform_operation(Some(&p), &token, &OperationContext::none())
        );
    }

    /// *For any* grant list, an inactive principal holds nothing.
    #[test]
    fn prop_inactive_denies_every_capability(
        grants in grant_tokens(),
        cap in known_capability(),
        wildcard in any::<bool>(),
    ) {
        let mut tokens = grants;
        if wildcard {
            tokens.push("*".to_string());
        }
        let engine = AccessControl::default();
        let p = Principal::from_snapshot(&snapshot("u1".into(), "admin".into(), tokens, false));

        prop_assert!(!engine.has_capability(Some(&p), cap));
        prop_assert!(engine.resolve_effective_capabilities(Some(&p)).is_empty());
    }

    /// *For any* active principal holding the wildcard, every known
    /// capability is held and the effective set is the full universe.
    #[test]
    fn prop_wildcard_grants_universe(
        grants in grant_tokens(),
        role in role_string(),
    ) {
        let mut tokens = grants;
        tokens.push("*".to_string());
        let engine = AccessControl::default();
        let p = Principal::from_snapshot(&snapshot("u1".into(), role, tokens, true));

        for cap in Capability::ALL {
            prop_assert!(engine.has_capability(Some(&p), *cap));
        }
        prop_assert_eq!(
            engine.resolve_effective_capabilities(Some(&p)).len(),
            Capability::ALL.len()
        );
    }

    /// *For any* principal without the wildcard, `has_capability` holds
    /// exactly for the granted tokens.
    #[test]
    fn prop_capability_matches_grant_list(
        grants in grant_tokens(),
        cap in known_capability(),
    ) {
        let engine = AccessControl::default();
        let p = Principal::from_snapshot(&snapshot(
            "u1".into(),
            "customer".into(),
            grants.clone(),
            true,
        ));

        let expected = grants.contains(&cap.as_str().to_string());
        prop_assert_eq!(engine.has_capability(Some(&p), cap), expected);
    }

    /// *For any* inputs, calling a predicate twice yields the same result:
    /// no hidden state mutates between calls.
    #[test]
    fn prop_predicates_are_idempotent(
        grants in grant_tokens(),
        role in role_string(),
        is_active in any::<bool>(),
        cap in known_capability(),
        owner in "[a-z0-9]{1,8}",
    ) {
        let engine = AccessControl::default();
        let p = Principal::from_snapshot(&snapshot("u1".into(), role, grants, is_active));
        let resource = ResourceRef::owned_by(owner.as_str());
        let ctx = OperationContext::targeting(owner.as_str());

        prop_assert_eq!(
            engine.has_capability(Some(&p), cap),
            engine.has_capability(Some(&p), cap)
        );
        prop_assert_eq!(
            engine.has_elevated_access(Some(&p)),
            engine.has_elevated_access(Some(&p))
        );
        prop_assert_eq!(
            engine.can_access_owned_resource(Some(&p), &resource),
            engine.can_access_owned_resource(Some(&p), &resource)
        );
        prop_assert_eq!(
            engine.can_perform_operation(Some(&p), "edit_user", &ctx),
            engine.can_perform_operation(Some(&p), "edit_user", &ctx)
        );
        prop_assert_eq!(
            engine.resolve_effective_capabilities(Some(&p)),
            engine.resolve_effective_capabilities(Some(&p))
        );
    }

    /// *For any* non-elevated principal, the operation dual gate denies a
    /// row owned by someone else even when the capability is held.
    #[test]
    fn prop_ownership_gate_is_independent_of_capability(
        owner in "[a-z0-9]{1,8}",
    ) {
        prop_assume!(owner != "u1");

        let engine = AccessControl::default();
        let p = Principal::from_snapshot(&snapshot(
            "u1".into(),
            "customer".into(),
            vec!["user_edit".into()],
            true,
        ));

        let own = OperationContext::targeting("u1");
        let foreign = OperationContext::targeting(owner.as_str());
        prop_assert!(engine.can_perform_operation(Some(&p), "edit_user", &own));
        prop_assert!(!engine.can_perform_operation(Some(&p), "edit_user", &foreign));
    }
}
