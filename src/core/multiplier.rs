//! Exact payout multipliers.
//!
//! Multipliers grow by repeated factors (×1.5 per correct Ride the Bus
//! guess) or by fixed increments (+0.1 per safe tile). Both are kept as an
//! exact fraction so payouts never pick up floating point drift; the only
//! rounding is the final floor to whole chips in [`Multiplier::apply`].

use serde::{Deserialize, Serialize};

/// Rational payout multiplier (`numerator / denominator`).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Multiplier {
    numerator: u64,
    denominator: u64,
}

impl Multiplier {
    /// The 1.0x multiplier every round starts at.
    pub const ONE: Multiplier = Multiplier { numerator: 1, denominator: 1 };

    /// Create from a fraction. A zero denominator is treated as 1.
    #[must_use]
    pub fn from_ratio(numerator: u64, denominator: u64) -> Self {
        Self::reduced(numerator, denominator.max(1))
    }

    /// Multiply by `num / den`.
    #[must_use]
    pub fn scale(self, num: u64, den: u64) -> Self {
        Self::reduced(self.numerator * num, self.denominator * den.max(1))
    }

    /// Add `num / den`.
    #[must_use]
    pub fn add(self, num: u64, den: u64) -> Self {
        let den = den.max(1);
        Self::reduced(
            self.numerator * den + num * self.denominator,
            self.denominator * den,
        )
    }

    /// Payout for `bet` chips, floored to a whole chip.
    #[must_use]
    pub fn apply(self, bet: i64) -> i64 {
        let scaled = i128::from(bet) * i128::from(self.numerator);
        let payout = scaled.div_euclid(i128::from(self.denominator));
        i64::try_from(payout).unwrap_or(if payout > 0 { i64::MAX } else { i64::MIN })
    }

    /// Approximate value for display.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Numerator of the reduced fraction.
    #[must_use]
    pub fn numerator(self) -> u64 {
        self.numerator
    }

    /// Denominator of the reduced fraction.
    #[must_use]
    pub fn denominator(self) -> u64 {
        self.denominator
    }

    fn reduced(numerator: u64, denominator: u64) -> Self {
        let divisor = gcd(numerator, denominator).max(1);
        Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        }
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl PartialEq for Multiplier {
    fn eq(&self, other: &Self) -> bool {
        u128::from(self.numerator) * u128::from(other.denominator)
            == u128::from(other.numerator) * u128::from(self.denominator)
    }
}

impl Eq for Multiplier {}

impl std::fmt::Display for Multiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}x", self.as_f64())
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
