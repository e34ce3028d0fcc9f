//! Strongly-typed, store-assigned integer identifiers.
//!
//! The store hands out positive identifiers starting at 1. The value `0` is
//! reserved for records that have not been persisted yet.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Common behaviour of record identifiers.
pub trait RecordId: Copy + Eq + core::hash::Hash + core::fmt::Debug {
    /// Raw integer value.
    fn get(self) -> i64;

    /// `true` when the record has no row in the store yet.
    fn is_transient(self) -> bool {
        self.get() == 0
    }

    /// `true` when the identifier refers to a stored row.
    fn is_persisted(self) -> bool {
        self.get() > 0
    }
}

/// Identifier of a customer row.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CustomerId(i64);

/// Identifier of an address row.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AddressId(i64);

macro_rules! impl_record_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Identifier of a record that has not been stored.
            pub const TRANSIENT: Self = Self(0);

            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            pub const fn is_transient(self) -> bool {
                self.0 == 0
            }

            pub const fn is_persisted(self) -> bool {
                self.0 > 0
            }
        }

        impl RecordId for $t {
            fn get(self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                if value < 0 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must not be negative (got {value})",
                        $name
                    )));
                }
                Ok(Self(value))
            }
        }
    };
}

impl_record_id!(CustomerId, "CustomerId");
impl_record_id!(AddressId, "AddressId");
