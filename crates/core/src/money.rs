use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Monetary amount in the smallest currency unit (e.g. fils, cents).
///
/// Signed: expense records are commonly stored as negative amounts.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn minor(amount: i64) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Share of this amount expressed in basis points (1/100 of a percent),
    /// rounded half away from zero.
    pub fn share_bps(self, bps: i64) -> Self {
        let scaled = self.0 as i128 * bps as i128;
        let half = if scaled >= 0 { 5_000 } else { -5_000 };
        Self(((scaled + half) / 10_000) as i64)
    }

    /// Multiply a nightly price by a number of nights; `None` on overflow.
    pub fn checked_times(self, n: i64) -> Option<Self> {
        self.0.checked_mul(n).map(Self)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_percent_share_is_exact_for_round_amounts() {
        assert_eq!(Money(1000).share_bps(2000), Money(200));
        assert_eq!(Money(45_000).share_bps(2000), Money(9_000));
    }

    #[test]
    fn share_rounds_half_away_from_zero() {
        assert_eq!(Money(3).share_bps(5000), Money(2));
        assert_eq!(Money(-3).share_bps(5000), Money(-2));
    }

    #[test]
    fn nightly_totals_refuse_to_overflow() {
        assert_eq!(Money(15_000).checked_times(4), Some(Money(60_000)));
        assert_eq!(Money(i64::MAX / 2).checked_times(3), None);
        assert_eq!(Money(15_000).checked_times(i64::MAX), None);
    }

    #[test]
    fn sum_of_empty_iterator_is_zero() {
        let total: Money = Vec::<Money>::new().into_iter().sum();
        assert_eq!(total, Money::ZERO);
    }
}
