//! Static policy tables mapping features and operations to capabilities.
//!
//! Two tables with deliberately different matching semantics:
//!
//! - **features** use any-of matching: a feature (menu item, page) is
//!   visible if the principal holds at least one qualifying capability.
//! - **operations** use all-of matching: a sensitive operation requires
//!   every listed capability, and an ownership gate on top when the call
//!   is row-scoped.
//!
//! Do not unify the two; collapsing coarse UI gating into fine operation
//! gating (or vice versa) silently changes authorization behavior.

use std::collections::HashMap;

use thiserror::Error;

use meridian_shared::config::AccessConfig;

use super::types::Capability;

/// Errors raised while building policy tables from configuration.
///
/// Config is trusted operator input, so malformed entries fail startup
/// loudly. Runtime inputs never reach this error path; they fail closed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessConfigError {
    /// A configured capability token is not in the known universe.
    #[error("unknown capability token `{token}` for {table} `{name}`")]
    UnknownCapability {
        /// Which table the entry came from ("feature" or "operation").
        table: &'static str,
        /// The feature or operation name being configured.
        name: String,
        /// The unrecognized token.
        token: String,
    },

    /// A configured entry lists no capabilities at all.
    ///
    /// An empty requirement would gate nothing; rejecting it keeps a typo
    /// from silently opening a feature to everyone.
    #[error("{table} `{name}` has an empty capability list")]
    EmptyRequirement {
        /// Which table the entry came from ("feature" or "operation").
        table: &'static str,
        /// The feature or operation name being configured.
        name: String,
    },
}

/// Immutable feature and operation requirement tables.
///
/// Built once at startup; the engine borrows it for the process lifetime.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    features: HashMap<String, Vec<Capability>>,
    operations: HashMap<String, Vec<Capability>>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            features: builtin_features(),
            operations: builtin_operations(),
        }
    }
}

impl AccessPolicy {
    /// Builds the compiled-in tables extended/overridden by configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AccessConfigError`] when a configured entry names an
    /// unknown capability token or lists none.
    pub fn from_config(config: &AccessConfig) -> Result<Self, AccessConfigError> {
        let mut policy = Self::default();
        for (name, tokens) in &config.features {
            let caps = parse_tokens("feature", name, tokens)?;
            policy.features.insert(name.clone(), caps);
        }
        for (name, tokens) in &config.operations {
            let caps = parse_tokens("operation", name, tokens)?;
            policy.operations.insert(name.clone(), caps);
        }
        Ok(policy)
    }

    /// Capabilities qualifying a principal for `feature` (any-of).
    #[must_use]
    pub fn feature_requirements(&self, feature: &str) -> Option<&[Capability]> {
        self.features.get(feature).map(Vec::as_slice)
    }

    /// Capabilities required to perform `operation` (all-of).
    #[must_use]
    pub fn operation_requirements(&self, operation: &str) -> Option<&[Capability]> {
        self.operations.get(operation).map(Vec::as_slice)
    }

    /// Iterates over all known feature names.
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Iterates over all known operation names.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

fn parse_tokens(
    table: &'static str,
    name: &str,
    tokens: &[String],
) -> Result<Vec<Capability>, AccessConfigError> {
    if tokens.is_empty() {
        return Err(AccessConfigError::EmptyRequirement {
            table,
            name: name.to_string(),
        });
    }
    tokens
        .iter()
        .map(|token| {
            Capability::parse(token).ok_or_else(|| AccessConfigError::UnknownCapability {
                table,
                name: name.to_string(),
                token: token.clone(),
            })
        })
        .collect()
}

fn builtin_features() -> HashMap<String, Vec<Capability>> {
    use Capability as C;
    [
        ("account_view", vec![C::AccountView]),
        ("transaction_history", vec![C::TransactionView]),
        ("transfer_funds", vec![C::TransactionCreate]),
        ("approvals", vec![C::TransactionApprove]),
        (
            "user_management",
            vec![C::UserView, C::UserEdit, C::UserCreate],
        ),
        ("reports", vec![C::ReportView]),
        ("audit_log", vec![C::AuditView]),
        ("settings", vec![C::SettingsEdit]),
    ]
    .into_iter()
    .map(|(name, caps)| (name.to_string(), caps))
    .collect()
}

fn builtin_operations() -> HashMap<String, Vec<Capability>> {
    use Capability as C;
    [
        ("view_account", vec![C::AccountView]),
        ("edit_account", vec![C::AccountEdit]),
        ("open_account", vec![C::AccountCreate]),
        ("close_account", vec![C::AccountClose]),
        ("view_transaction", vec![C::TransactionView]),
        ("create_transaction", vec![C::TransactionCreate]),
        ("approve_transaction", vec![C::TransactionApprove]),
        ("view_user", vec![C::UserView]),
        ("edit_user", vec![C::UserEdit]),
        ("create_user", vec![C::UserCreate]),
        ("deactivate_user", vec![C::UserDeactivate]),
        ("export_report", vec![C::ReportView]),
        ("view_audit_log", vec![C::AuditView]),
        ("update_settings", vec![C::SettingsEdit]),
    ]
    .into_iter()
    .map(|(name, caps)| (name.to_string(), caps))
    .collect()
}
