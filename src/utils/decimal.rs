use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};
use num_traits::ToPrimitive;

pub trait BigDecimalHelpers {
    fn to_f64_or_zero(&self) -> f64;
    fn to_money(&self) -> BigDecimal;
}

impl BigDecimalHelpers for BigDecimal {
    fn to_f64_or_zero(&self) -> f64 {
        self.to_f64().filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Rounds half-up to two decimal places and pins the scale at 2.
    fn to_money(&self) -> BigDecimal {
        self.with_scale_round(2, RoundingMode::HalfUp)
    }
}

/// Converts user-entered floating point input into a decimal.
///
/// Goes through the shortest round-trip text form, so `1000.1` becomes
/// exactly `1000.1` rather than its binary expansion. Returns `None` for
/// NaN and infinities.
pub fn decimal_from_f64(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }
    BigDecimal::from_str(&value.to_string()).ok()
}
