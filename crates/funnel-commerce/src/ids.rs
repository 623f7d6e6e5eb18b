//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing an OfferId where an OrderId is expected. All ids in
//! this crate originate outside the core (funnel config or the order
//! backend), so there is no local id generation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check if the ID is empty.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define all ID types
define_id!(FunnelId);
define_id!(OfferId);
define_id!(OrderId);
define_id!(DraftOrderId);
define_id!(PaymentRef);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = OfferId::new("offer-123");
        assert_eq!(id.as_str(), "offer-123");
    }

    #[test]
    fn test_id_from_string() {
        let id: OrderId = "ord-456".into();
        assert_eq!(id.as_str(), "ord-456");
    }

    #[test]
    fn test_id_display() {
        let id = PaymentRef::new("pi_789");
        assert_eq!(format!("{}", id), "pi_789");
    }

    #[test]
    fn test_id_equality() {
        let id1 = OfferId::new("same");
        let id2 = OfferId::new("same");
        let id3 = OfferId::new("different");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_is_empty() {
        assert!(FunnelId::new("").is_empty());
        assert!(!FunnelId::new("f-1").is_empty());
    }
}
