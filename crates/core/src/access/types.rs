//! Access-control domain types.
//!
//! These types form the validation boundary between the untyped snapshots
//! the identity provider hands us and the closed enumerations the decision
//! engine works over. Anything that fails validation here is dropped, so
//! the engine never sees a role or capability it does not know about.

use serde::{Deserialize, Serialize, Serializer};

use meridian_shared::types::PrincipalId;

/// The wildcard capability token granting all capabilities.
pub const WILDCARD_TOKEN: &str = "*";

/// Principal roles, ordered from lowest to highest privilege.
///
/// The numeric hierarchy level is used only for display ordering in user
/// lists; authorization decisions are capability-based, never level-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A bank customer; sees only their own accounts and transactions.
    Customer,
    /// Support staff; read access across customers for assistance.
    Support,
    /// Branch manager; operational control short of system settings.
    Manager,
    /// Full administrative access.
    Admin,
}

impl Role {
    /// Parse a role from a stored string. Unrecognized strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" => Some(Self::Customer),
            "support" => Some(Self::Support),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Support => "support",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Hierarchy level for display ordering only (higher = more privileged).
    ///
    /// Never consult this for an authorization decision.
    #[must_use]
    pub const fn hierarchy_level(&self) -> u8 {
        match self {
            Self::Customer => 0,
            Self::Support => 1,
            Self::Manager => 2,
            Self::Admin => 3,
        }
    }

    /// Returns true for the staff roles treated as elevated in UI gating.
    #[must_use]
    pub const fn is_elevated(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::Support)
    }

    /// Default capability set granted when a principal with this role is
    /// provisioned. Used by provisioning collaborators, never consulted on
    /// the decision path (decisions read the stored grant list).
    #[must_use]
    pub const fn default_capabilities(&self) -> &'static [Capability] {
        match self {
            Self::Customer => &[
                Capability::AccountView,
                Capability::TransactionView,
                Capability::TransactionCreate,
            ],
            Self::Support => &[
                Capability::AccountView,
                Capability::TransactionView,
                Capability::UserView,
                Capability::ReportView,
            ],
            Self::Manager => &[
                Capability::AccountView,
                Capability::AccountEdit,
                Capability::AccountCreate,
                Capability::AccountClose,
                Capability::TransactionView,
                Capability::TransactionCreate,
                Capability::TransactionApprove,
                Capability::UserView,
                Capability::UserEdit,
                Capability::ReportView,
                Capability::AuditView,
            ],
            Self::Admin => Capability::ALL,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The closed set of known capability tokens.
///
/// Each variant names one permitted operation class. Strings that do not
/// parse to a variant are unknown tokens and always resolve to a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// View account details and balances.
    AccountView,
    /// Edit account metadata.
    AccountEdit,
    /// Open new accounts.
    AccountCreate,
    /// Close accounts.
    AccountClose,
    /// View transactions.
    TransactionView,
    /// Create transactions (transfers, payments).
    TransactionCreate,
    /// Approve pending transactions.
    TransactionApprove,
    /// View user profiles.
    UserView,
    /// Edit user profiles.
    UserEdit,
    /// Create users.
    UserCreate,
    /// Deactivate users.
    UserDeactivate,
    /// View reports.
    ReportView,
    /// View the audit log.
    AuditView,
    /// Modify system settings.
    SettingsEdit,
}

impl Capability {
    /// The full enumerated universe of known capabilities.
    pub const ALL: &'static [Capability] = &[
        Self::AccountView,
        Self::AccountEdit,
        Self::AccountCreate,
        Self::AccountClose,
        Self::TransactionView,
        Self::TransactionCreate,
        Self::TransactionApprove,
        Self::UserView,
        Self::UserEdit,
        Self::UserCreate,
        Self::UserDeactivate,
        Self::ReportView,
        Self::AuditView,
        Self::SettingsEdit,
    ];

    /// Parse a capability token. Unknown tokens yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "account_view" => Some(Self::AccountView),
            "account_edit" => Some(Self::AccountEdit),
            "account_create" => Some(Self::AccountCreate),
            "account_close" => Some(Self::AccountClose),
            "transaction_view" => Some(Self::TransactionView),
            "transaction_create" => Some(Self::TransactionCreate),
            "transaction_approve" => Some(Self::TransactionApprove),
            "user_view" => Some(Self::UserView),
            "user_edit" => Some(Self::UserEdit),
            "user_create" => Some(Self::UserCreate),
            "user_deactivate" => Some(Self::UserDeactivate),
            "report_view" => Some(Self::ReportView),
            "audit_view" => Some(Self::AuditView),
            "settings_edit" => Some(Self::SettingsEdit),
            _ => None,
        }
    }

    /// Returns the capability's token string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AccountView => "account_view",
            Self::AccountEdit => "account_edit",
            Self::AccountCreate => "account_create",
            Self::AccountClose => "account_close",
            Self::TransactionView => "transaction_view",
            Self::TransactionCreate => "transaction_create",
            Self::TransactionApprove => "transaction_approve",
            Self::UserView => "user_view",
            Self::UserEdit => "user_edit",
            Self::UserCreate => "user_create",
            Self::UserDeactivate => "user_deactivate",
            Self::ReportView => "report_view",
            Self::AuditView => "audit_view",
            Self::SettingsEdit => "settings_edit",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry in a principal's grant list.
///
/// The wildcard is a distinguished variant rather than a string compared in
/// multiple places; `parse` is the only point that ever looks at `"*"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityGrant {
    /// The wildcard grant: every known capability.
    All,
    /// A single named capability.
    Capability(Capability),
}

impl CapabilityGrant {
    /// Parse a stored grant token. Unknown tokens yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        if s == WILDCARD_TOKEN {
            return Some(Self::All);
        }
        Capability::parse(s).map(Self::Capability)
    }

    /// Returns the grant's token string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => WILDCARD_TOKEN,
            Self::Capability(c) => c.as_str(),
        }
    }
}

impl std::fmt::Display for CapabilityGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for CapabilityGrant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Untyped principal snapshot as supplied by the identity/session layer.
///
/// This is the wire shape; convert to [`Principal`] before evaluating any
/// predicate. Missing fields default to their most restrictive value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalSnapshot {
    /// Stable identifier issued by the identity provider.
    pub id: String,
    /// Stored role string; may be absent or unrecognized.
    #[serde(default)]
    pub role: Option<String>,
    /// Stored capability token strings, wildcard included.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Whether the account is active. Absent means inactive.
    #[serde(default)]
    pub is_active: bool,
    /// Counterparty this principal is scoped to, if any.
    #[serde(default)]
    pub assigned_counterparty: Option<String>,
}

/// A validated principal, the unit every access decision is made over.
///
/// The engine never creates, stores, or mutates principals; callers supply
/// a fresh one per decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// Stable identifier.
    pub id: PrincipalId,
    /// The principal's single role. `None` when the stored role string was
    /// missing or unrecognized; every role predicate is false for it.
    pub role: Option<Role>,
    /// Validated capability grants. Unrecognized stored tokens are dropped.
    pub grants: Vec<CapabilityGrant>,
    /// Inactive principals hold no effective capabilities.
    pub is_active: bool,
    /// Counterparty this principal is scoped to, if any.
    pub assigned_counterparty: Option<PrincipalId>,
}

impl Principal {
    /// Validates an untyped snapshot into a `Principal`.
    ///
    /// Unrecognized role and capability strings are dropped rather than
    /// rejected: the snapshot came from the trusted session layer, and a
    /// stale token must degrade to a denial, not a fault.
    #[must_use]
    pub fn from_snapshot(snapshot: &PrincipalSnapshot) -> Self {
        let mut grants: Vec<CapabilityGrant> = snapshot
            .capabilities
            .iter()
            .filter_map(|token| CapabilityGrant::parse(token))
            .collect();
        grants.sort_unstable_by_key(CapabilityGrant::as_str);
        grants.dedup();

        Self {
            id: PrincipalId::new(snapshot.id.clone()),
            role: snapshot.role.as_deref().and_then(Role::parse),
            grants,
            is_active: snapshot.is_active,
            assigned_counterparty: snapshot
                .assigned_counterparty
                .as_deref()
                .map(PrincipalId::from),
        }
    }

    /// Returns true if the grant list contains the wildcard.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.grants.contains(&CapabilityGrant::All)
    }
}

impl From<&PrincipalSnapshot> for Principal {
    fn from(snapshot: &PrincipalSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}

/// Anything that records an owning principal, for row-level checks.
///
/// Resources with no recorded owner are a data-integrity error upstream of
/// this crate; every domain row carries exactly one owner.
pub trait OwnedResource {
    /// Identifier of the principal that owns this resource.
    fn owner_id(&self) -> &PrincipalId;
}

/// A minimal resource descriptor for callers that only have an owner id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// The owning principal.
    pub owner: PrincipalId,
}

impl ResourceRef {
    /// Creates a descriptor for a resource owned by `owner`.
    #[must_use]
    pub fn owned_by(owner: impl Into<PrincipalId>) -> Self {
        Self {
            owner: owner.into(),
        }
    }
}

impl OwnedResource for ResourceRef {
    fn owner_id(&self) -> &PrincipalId {
        &self.owner
    }
}

/// Per-call context for operation checks.
///
/// When the operation targets a specific row or user, the caller names its
/// owner here and the ownership gate applies in addition to the capability
/// gate. An empty context means the operation is not row-scoped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationContext {
    /// Owner of the row or profile the operation targets.
    pub target_owner: Option<PrincipalId>,
}

impl OperationContext {
    /// Context for an operation with no row-level target.
    #[must_use]
    pub const fn none() -> Self {
        Self { target_owner: None }
    }

    /// Context for an operation targeting a row owned by `owner`.
    #[must_use]
    pub fn targeting(owner: impl Into<PrincipalId>) -> Self {
        Self {
            target_owner: Some(owner.into()),
        }
    }
}
