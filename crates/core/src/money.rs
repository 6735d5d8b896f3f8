//! Monetary amounts in smallest currency units.
//!
//! The checkout totals computed here must match, byte for byte, the totals the
//! backend independently recomputes at order-creation time. Floating point is
//! therefore off the table; every amount is an integer count of centavos.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Amount of money in smallest currency unit (e.g., cents).
///
/// All arithmetic is checked; overflow is reported as a domain invariant
/// violation rather than wrapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Build from an amount already expressed in minor units.
    pub const fn from_minor_units(units: u64) -> Self {
        Self(units)
    }

    /// Amount in minor units.
    pub const fn minor_units(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money addition overflow"))
    }

    /// Multiply by a quantity (photo count, cart line quantity).
    pub fn checked_mul(self, quantity: u32) -> DomainResult<Money> {
        self.0
            .checked_mul(u64::from(quantity))
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money multiplication overflow"))
    }

    /// Sum an iterator of amounts with overflow checking.
    pub fn checked_sum<I>(amounts: I) -> DomainResult<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl ValueObject for Money {}

impl Default for Money {
    fn default() -> Self {
        Money::ZERO
    }
}

impl core::fmt::Display for Money {
    /// Render as a decimal amount with two fraction digits, e.g. `175.00`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
