//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In revenue reporting:                                                  │
//! │    1000.00 / 3 nights = 333.33 (×3 = 999.99) → Lost 0.01!              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    100000 cents / 3 = 33333 cents (×3 = 99999 cents)                   │
//! │    We KNOW we lost 1 cent, and handle it explicitly                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stayline_core::money::Money;
//!
//! // Create from cents (preferred)
//! let rate = Money::from_cents(100_000); // 1000.00 per night
//!
//! // Revenue for a 2-night, 1-room stay
//! let revenue = rate.per_stay(2, 1);
//! assert_eq!(revenue.cents(), 200_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and cost deductions
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use stayline_core::money::Money;
    ///
    /// let rate = Money::from_cents(109_900); // 1099.00
    /// assert_eq!(rate.cents(), 109_900);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Revenue contribution of a stay at this nightly rate.
    ///
    /// `rate × nights × rooms`, the multiplication every reservation row
    /// contributes to the revenue sum.
    ///
    /// ## Example
    /// ```rust
    /// use stayline_core::money::Money;
    ///
    /// let rate = Money::from_cents(100_000); // 1000.00/night
    /// assert_eq!(rate.per_stay(2, 1).cents(), 200_000);
    /// assert_eq!(rate.per_stay(3, 2).cents(), 600_000);
    /// ```
    #[inline]
    pub const fn per_stay(&self, nights: i64, rooms: i64) -> Self {
        Money(self.0 * nights * rooms)
    }

    /// Divides this amount by an integer denominator, rounding half away
    /// from zero, in i128 to prevent overflow on large sums.
    ///
    /// Returns zero when the denominator is zero: revenue ratios over an
    /// empty denominator are reported as 0, never as a division error.
    ///
    /// ## Example
    /// ```rust
    /// use stayline_core::money::Money;
    ///
    /// let revenue = Money::from_cents(200_000);
    /// // ADR over 2 occupied room-nights
    /// assert_eq!(revenue.div_rounded(2).cents(), 100_000);
    /// // RevPAR over 6 available room-nights: 333.33 (rounded)
    /// assert_eq!(revenue.div_rounded(6).cents(), 33_333);
    /// // Zero denominator stays zero
    /// assert_eq!(revenue.div_rounded(0).cents(), 0);
    /// ```
    pub fn div_rounded(&self, denominator: i64) -> Money {
        if denominator == 0 {
            return Money::zero();
        }
        let n = self.0 as i128;
        let d = denominator as i128;
        let magnitude = (n.abs() + d.abs() / 2) / d.abs();
        let q = magnitude * (n.signum() * d.signum());
        Money(q as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// This is for logs and debugging. The front end formats amounts for
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for room-night counts).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Money(self.0 * count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
