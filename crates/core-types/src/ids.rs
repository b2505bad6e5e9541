//! Newtype identifiers for the three entity collections.
//!
//! Each collection gets its own wrapper so a `ProductId` can never be passed
//! where a `CustomerId` is expected.

/// Defines a type-safe identifier around `u32`.
///
/// The generated type serializes transparently as a bare integer, orders
/// numerically (so `BTreeMap` indexes iterate in id order), and converts
/// to and from `u32`.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Creates an identifier from its raw value.
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Returns the raw value.
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Returns the identifier that follows this one.
            pub const fn next(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifies a [`Customer`](crate::Customer).
    CustomerId
);
define_id!(
    /// Identifies a [`Product`](crate::Product).
    ProductId
);
define_id!(
    /// Identifies an [`Order`](crate::Order).
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&CustomerId::new(7)).unwrap();
        assert_eq!(json, "7");

        let back: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(back, ProductId::new(42));
    }

    #[test]
    fn ids_parse_with_surrounding_whitespace() {
        assert_eq!(" 12 ".parse::<OrderId>().unwrap(), OrderId::new(12));
        assert!("twelve".parse::<OrderId>().is_err());
    }

    #[test]
    fn next_saturates() {
        assert_eq!(OrderId::new(1).next(), OrderId::new(2));
        assert_eq!(OrderId::new(u32::MAX).next(), OrderId::new(u32::MAX));
    }
}
