//! # Money Module
//!
//! Provides the `Money` type for amounts on a table's bill.
//!
//! ## Precision Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ROUND ONCE, AT THE END                                                 │
//! │                                                                         │
//! │  Menu prices are decimals (e.g. 350, 120.50). Tax is 5% of the          │
//! │  subtotal, which regularly lands between paise:                         │
//! │    subtotal 1.99 × 5% = 0.0995                                          │
//! │                                                                         │
//! │  Rounding every intermediate value drifts as quantities go up and      │
//! │  down. So Money keeps full precision through every calculation and     │
//! │  is rounded to 2 decimal places only when it is displayed.             │
//! │                                                                         │
//! │    Money::new(0.0995).to_string()  → "0.10"  (display)                 │
//! │    Money::new(0.0995).amount()     → 0.0995  (arithmetic)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tablepos_core::money::{Money, TAX_RATE};
//!
//! let price = Money::new(350.0);
//! let line = price.multiply_quantity(2);
//! let tax = line.calculate_tax(TAX_RATE);
//! assert_eq!(tax.to_string(), "35.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 500 bps = 5%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the rate as a multiplier (500 bps → 0.05).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }
}

/// The restaurant's flat tax rate: 5%.
///
/// Fixed for every bill. There is deliberately no setting for it.
pub const TAX_RATE: TaxRate = TaxRate::from_bps(500);

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major currency units (rupees), full precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value from an amount in major units.
    ///
    /// ## Example
    /// ```rust
    /// use tablepos_core::money::Money;
    ///
    /// let price = Money::new(120.5);
    /// assert_eq!(price.amount(), 120.5);
    /// ```
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns the unrounded amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Rounds to 2 decimal places for presentation.
    ///
    /// Never feed the result back into a calculation.
    ///
    /// ## Example
    /// ```rust
    /// use tablepos_core::money::Money;
    ///
    /// assert_eq!(Money::new(36.745).rounded(), 36.75);
    /// assert_eq!(Money::new(0.0995).rounded(), 0.1);
    /// ```
    pub fn rounded(&self) -> f64 {
        // Nudge by a relative epsilon so 36.745 (stored as 36.74499...) rounds up.
        let scaled = self.0 * 100.0;
        let nudged = scaled + scaled.signum() * scaled.abs() * f64::EPSILON;
        nudged.round() / 100.0
    }

    /// Calculates tax at the given rate, keeping full precision.
    ///
    /// ## Example
    /// ```rust
    /// use tablepos_core::money::{Money, TAX_RATE};
    ///
    /// let subtotal = Money::new(700.0);
    /// assert!((subtotal.calculate_tax(TAX_RATE).amount() - 35.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.fraction())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tablepos_core::money::Money;
    ///
    /// let unit_price = Money::new(45.5);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 136.5);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as f64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount rounded to 2 decimal places, without a
/// currency symbol. The host adds the symbol from its configuration.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rounds_to_two_places() {
        assert_eq!(Money::new(350.0).to_string(), "350.00");
        assert_eq!(Money::new(17.5).to_string(), "17.50");
        assert_eq!(Money::new(0.0995).to_string(), "0.10");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(100.0);
        let b = Money::new(25.5);

        assert_eq!((a + b).amount(), 125.5);
        assert_eq!((a - b).amount(), 74.5);
        assert_eq!((b * 2).amount(), 51.0);
    }

    #[test]
    fn test_tax_keeps_full_precision() {
        let subtotal = Money::new(1.99);
        let tax = subtotal.calculate_tax(TAX_RATE);
        assert!((tax.amount() - 0.0995).abs() < 1e-12);
        assert_eq!(tax.to_string(), "0.10");
    }

    #[test]
    fn test_tax_rate_is_five_percent() {
        assert_eq!(TAX_RATE.bps(), 500);
        assert!((TAX_RATE.percentage() - 5.0).abs() < f64::EPSILON);
        assert!((TAX_RATE.fraction() - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::new(1.5), Money::new(2.25), Money::new(3.0)]
            .into_iter()
            .sum();
        assert_eq!(total.amount(), 6.75);
    }

    /// Repeated +1/-1 quantity changes must not accumulate rounding error.
    #[test]
    fn test_no_drift_across_repeated_changes() {
        let unit = Money::new(0.1);
        let mut qty = 0u32;
        for _ in 0..1000 {
            qty += 1;
        }
        for _ in 0..997 {
            qty -= 1;
        }
        assert_eq!(unit.multiply_quantity(qty).to_string(), "0.30");
    }
}
