//! Identifier newtypes for positions and techniques
//!
//! Identifiers are kebab-case strings (`closed-guard-bottom`,
//! `mount-top-armbar`). Both types borrow as `str`, so arena indexes keyed by
//! them can be queried with plain string slices.

use std::borrow::Borrow;
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier from any string-like value
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier, returning the inner string
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Unique identifier of a [`Position`](crate::Position)
    ///
    /// # Examples
    ///
    /// ```
    /// use grapple_domain::PositionId;
    ///
    /// let id = PositionId::from("mount-top");
    /// assert_eq!(id.as_str(), "mount-top");
    /// assert_eq!(id.to_string(), "mount-top");
    /// ```
    PositionId
);

string_id!(
    /// Unique identifier of a [`Technique`](crate::Technique)
    TechniqueId
);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Display round-trips the raw identifier
        #[test]
        fn test_display_roundtrip(raw in "[a-z][a-z0-9-]{0,24}") {
            let id = PositionId::from(raw.as_str());
            prop_assert_eq!(id.to_string(), raw);
        }

        /// Property: Ordering matches the underlying string ordering
        #[test]
        fn test_ordering_property(a in "[a-z-]{1,12}", b in "[a-z-]{1,12}") {
            let id_a = TechniqueId::from(a.as_str());
            let id_b = TechniqueId::from(b.as_str());
            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }
    }
}
