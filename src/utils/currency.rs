//! Currency formatting for Bangladeshi Taka amounts.
//!
//! Amounts are carried as `BigDecimal` end to end; formatting is the only
//! place they get rounded.
use bigdecimal::BigDecimal;
use num_traits::{Signed, Zero};

use crate::utils::decimal::BigDecimalHelpers;

pub const CURRENCY_SYMBOL: &str = "৳";

/// Format an amount as `৳1,250.75`
pub fn format_taka(amount: &BigDecimal) -> String {
    let money = amount.abs().to_money().to_string();
    let (whole, fraction) = money.split_once('.').unwrap_or((money.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() && !amount.to_money().is_zero() { "-" } else { "" };
    format!("{}{}{}.{}", sign, CURRENCY_SYMBOL, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_taka() {
        assert_eq!(format_taka(&BigDecimal::from_str("1250.75").unwrap()), "৳1,250.75");
        assert_eq!(format_taka(&BigDecimal::from(1000)), "৳1,000.00");
        assert_eq!(format_taka(&BigDecimal::from_str("0.5").unwrap()), "৳0.50");
        assert_eq!(format_taka(&BigDecimal::from(1234567)), "৳1,234,567.00");
        assert_eq!(format_taka(&BigDecimal::from(999)), "৳999.00");
    }

    #[test]
    fn test_format_taka_negative() {
        assert_eq!(format_taka(&BigDecimal::from(-20)), "-৳20.00");
    }
}
