//! The access-control decision engine.
//!
//! Every predicate here is total, synchronous, and side-effect-free: it
//! reads the supplied principal snapshot and the immutable policy tables
//! and returns a bool. There is no error outcome; missing, malformed, or
//! unrecognized input always resolves to a denial (fail-closed), never to
//! a fault. `None` in the principal position means an unauthenticated
//! caller and denies everything.
//!
//! The engine holds no mutable state and may be shared freely across
//! threads; callers are responsible for supplying a fresh principal
//! snapshot per decision.

use std::collections::BTreeSet;

use meridian_shared::config::AccessConfig;

use super::tables::{AccessConfigError, AccessPolicy};
use super::types::{
    Capability, CapabilityGrant, OperationContext, OwnedResource, Principal, Role,
};

/// Stateless allow/deny decision engine over immutable policy tables.
#[derive(Debug, Clone)]
pub struct AccessControl {
    policy: AccessPolicy,
}

impl Default for AccessControl {
    fn default() -> Self {
        Self::new(AccessPolicy::default())
    }
}

impl AccessControl {
    /// Creates an engine over the given policy tables.
    #[must_use]
    pub const fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// Creates an engine from the compiled-in tables plus config overrides.
    ///
    /// # Errors
    ///
    /// Returns [`AccessConfigError`] when the configuration names unknown
    /// capability tokens or empty requirement lists.
    pub fn from_config(config: &AccessConfig) -> Result<Self, AccessConfigError> {
        Ok(Self::new(AccessPolicy::from_config(config)?))
    }

    /// Returns the policy tables this engine decides against.
    #[must_use]
    pub const fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// Does the principal hold `capability`, directly or via the wildcard?
    ///
    /// Inactive principals hold no effective capabilities, whatever their
    /// grant list says.
    #[must_use]
    pub fn has_capability(&self, principal: Option<&Principal>, capability: Capability) -> bool {
        let Some(p) = principal else {
            return false;
        };
        if !p.is_active {
            return false;
        }
        p.grants
            .iter()
            .any(|g| matches!(g, CapabilityGrant::All) || *g == CapabilityGrant::Capability(capability))
    }

    /// String entry point for capability checks; unknown tokens are false.
    #[must_use]
    pub fn has_capability_named(&self, principal: Option<&Principal>, token: &str) -> bool {
        Capability::parse(token).is_some_and(|cap| self.has_capability(principal, cap))
    }

    /// Exact role match. False for a missing principal or an unrecognized
    /// stored role.
    #[must_use]
    pub fn is_role(&self, principal: Option<&Principal>, role: Role) -> bool {
        principal.is_some_and(|p| p.role == Some(role))
    }

    /// Coarse staff check (admin, manager, or support).
    ///
    /// This gates UI affordances only. Sensitive operations must go through
    /// [`Self::can_perform_operation`] with a specific capability; elevated
    /// access is never a substitute for one.
    #[must_use]
    pub fn has_elevated_access(&self, principal: Option<&Principal>) -> bool {
        principal.is_some_and(|p| p.role.is_some_and(|r| r.is_elevated()))
    }

    /// May the principal see `feature`?
    ///
    /// Any-of semantics: holding at least one of the feature's qualifying
    /// capabilities is enough. Unknown feature names are false.
    #[must_use]
    pub fn can_access_feature(&self, principal: Option<&Principal>, feature: &str) -> bool {
        self.policy
            .feature_requirements(feature)
            .is_some_and(|reqs| reqs.iter().any(|cap| self.has_capability(principal, *cap)))
    }

    /// Row-level ownership check: elevated roles pass, otherwise the
    /// principal must be the resource's recorded owner.
    ///
    /// Ownership is resource-specific; evaluate per resource and never
    /// cache a result across resources.
    #[must_use]
    pub fn can_access_owned_resource(
        &self,
        principal: Option<&Principal>,
        resource: &impl OwnedResource,
    ) -> bool {
        let Some(p) = principal else {
            return false;
        };
        self.has_elevated_access(principal) || p.id == *resource.owner_id()
    }

    /// May the principal perform `operation` in `context`?
    ///
    /// Dual gate: the principal must hold every capability the operation
    /// requires (all-of, unlike the feature table's any-of), and when the
    /// context names a target owner, must pass the ownership gate too.
    /// Capability says "you have this class of power"; ownership says "you
    /// may wield it on this particular row". Unknown operations are false.
    #[must_use]
    pub fn can_perform_operation(
        &self,
        principal: Option<&Principal>,
        operation: &str,
        context: &OperationContext,
    ) -> bool {
        let Some(reqs) = self.policy.operation_requirements(operation) else {
            return false;
        };
        if !reqs.iter().all(|cap| self.has_capability(principal, *cap)) {
            return false;
        }
        match &context.target_owner {
            Some(owner) => {
                self.has_elevated_access(principal)
                    || principal.is_some_and(|p| p.id == *owner)
            }
            None => true,
        }
    }

    /// The capability set the principal effectively holds, for display and
    /// audit only.
    ///
    /// A wildcard grant expands to the full enumerated universe; otherwise
    /// this is the stored grant list verbatim. The decision path must keep
    /// re-checking through [`Self::has_capability`] rather than consult a
    /// materialized set, so it stays correct if the universe grows.
    #[must_use]
    pub fn resolve_effective_capabilities(
        &self,
        principal: Option<&Principal>,
    ) -> BTreeSet<Capability> {
        let Some(p) = principal else {
            return BTreeSet::new();
        };
        if !p.is_active {
            return BTreeSet::new();
        }
        if p.has_wildcard() {
            return Capability::ALL.iter().copied().collect();
        }
        p.grants
            .iter()
            .filter_map(|g| match g {
                CapabilityGrant::All => None,
                CapabilityGrant::Capability(c) => Some(*c),
            })
            .collect()
    }
}
