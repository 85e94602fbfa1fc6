//! Newtype wrappers around `i64` for all domain entity identifiers.
//!
//! Using distinct types prevents accidentally passing a `UserId` where a
//! `TeamId` is expected. The raw value `0` means "not yet persisted"; the
//! repository assigns the real value on insert.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::traits::entity::EntityId;

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identifier from a raw value.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl EntityId for $name {
            const UNSET: Self = Self(0);

            fn from_raw(raw: i64) -> Self {
                Self(raw)
            }

            fn raw(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a user.
    UserId
);

define_id!(
    /// Unique identifier for a team.
    TeamId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unset() {
        assert!(UserId::default().is_unset());
        assert_eq!(UserId::UNSET, UserId::new(0));
        assert!(!UserId::new(7).is_unset());
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::new(42).to_string(), "42");
    }

    #[test]
    fn test_user_id_from_str() {
        let id: UserId = " 17 ".parse().expect("should parse");
        assert_eq!(id.raw(), 17);
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&TeamId::new(9)).expect("serialize");
        assert_eq!(json, "9");
        let parsed: TeamId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, TeamId::new(9));
    }
}
