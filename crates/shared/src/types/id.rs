//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `PrincipalId` where an
//! `AccountId` is expected. IDs are opaque strings rather than UUIDs because
//! the external identity provider issues free-form string UIDs; IDs minted
//! locally (sessions) use UUID v7 for time-ordered values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers over opaque strings.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an ID from an existing identifier string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Mints a fresh ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Returns the ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the ID and returns the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

typed_id!(PrincipalId, "Unique identifier for an authenticated principal.");
typed_id!(AccountId, "Unique identifier for a bank account.");
typed_id!(TransactionId, "Unique identifier for a transaction.");
typed_id!(SessionId, "Unique identifier for a user session.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trips_string() {
        let id = PrincipalId::new("uid-42");
        assert_eq!(id.as_str(), "uid-42");
        assert_eq!(id.to_string(), "uid-42");
        assert_eq!(id.into_inner(), "uid-42");
    }

    #[test]
    fn test_ids_compare_as_opaque_strings() {
        assert_eq!(PrincipalId::new("a"), PrincipalId::from("a"));
        assert_ne!(PrincipalId::new("a"), PrincipalId::new("A"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = AccountId::new("acct-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"acct-7\"");
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
