//! Entity identifier value objects
//!
//! Every persisted entity gets its own UUID-backed identifier newtype so
//! that an `OrderId` can never be passed where a `ProjectId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse an identifier from a string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Get the underlying UUID
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// A unique principal (authenticated user) identifier
    PrincipalId
);
entity_id!(
    /// A unique project identifier
    ProjectId
);
entity_id!(
    /// A unique client identifier
    ClientId
);
entity_id!(
    /// A unique contributor identifier
    ContributorId
);
entity_id!(
    /// A unique order identifier
    OrderId
);
entity_id!(
    /// A unique order section identifier
    OrderSectionId
);
entity_id!(
    /// A unique order line identifier
    OrderLineId
);
entity_id!(
    /// A unique timesheet entry identifier
    TimesheetId
);
entity_id!(
    /// A unique planning slot identifier
    PlanningId
);
entity_id!(
    /// A unique invoice identifier
    InvoiceId
);
entity_id!(
    /// A unique project task identifier
    TaskId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(ProjectId::new(), ProjectId::new());
        assert_ne!(OrderId::new(), OrderId::new());
    }

    #[test]
    fn id_can_be_parsed_back() {
        let original = ClientId::new();
        let parsed = ClientId::parse(&original.to_string()).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(TimesheetId::parse("not-a-uuid").is_err());
    }
}
