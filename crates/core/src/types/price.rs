//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront trades in a single currency (INR), so `Price` carries only
//! the amount. Display formatting uses Indian digit grouping
//! (`₹1,00,000.00`), matching how prices appear on the site and on invoices.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in Indian rupees.
///
/// Backed by [`Decimal`] to avoid floating-point drift in totals. Arithmetic
/// is limited to what a cart needs: addition and multiplication by a
/// quantity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(Decimal::from_parts(
            rupees.unsigned_abs() as u32,
            (rupees.unsigned_abs() >> 32) as u32,
            0,
            rupees < 0,
            0,
        ))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Format for display with the rupee sign and Indian digit grouping,
    /// e.g. `₹1,299.00` or `₹1,00,000.00`.
    #[must_use]
    pub fn display(&self) -> String {
        let negative = self.0.is_sign_negative();
        let rounded = self.0.abs().round_dp(2);
        let fixed = format!("{rounded:.2}");
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let grouped = group_indian(int_part);
        if negative {
            format!("-₹{grouped}.{frac_part}")
        } else {
            format!("₹{grouped}.{frac_part}")
        }
    }
}

/// Insert Indian-style digit grouping: the last three digits form a group,
/// then groups of two (`1234567` → `12,34,567`).
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_chars: Vec<char> = head.chars().collect();
    let mut idx = head_chars.len();
    while idx > 0 {
        let start = idx.saturating_sub(2);
        groups.push(head_chars.get(start..idx).unwrap_or_default());
        idx = start;
    }
    let mut out = String::new();
    for group in groups.iter().rev() {
        out.extend(group.iter());
        out.push(',');
    }
    out.push_str(tail);
    out
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
