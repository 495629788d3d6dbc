//! Fixed-point number formatting shared by the table and the CSV export.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format `value` with exactly `decimals` fractional digits, rounding exact
/// midpoints away from zero (`0.125` → `"0.13"`).
///
/// The decimal expansion of the stored `f64` is what gets rounded, so a value
/// such as `1.005` (stored just below the midpoint) still becomes `"1.00"`.
/// Non-finite or out-of-range values fall back to the standard formatter.
pub fn fixed(value: f64, decimals: u32) -> String {
    let width = decimals as usize;
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.width$}")
        }
        None => format!("{value:.width$}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoints_round_up() {
        assert_eq!(fixed(0.125, 2), "0.13");
        assert_eq!(fixed(2.5, 0), "3");
        assert_eq!(fixed(0.03125, 4), "0.0313");
        assert_eq!(fixed(-0.125, 2), "-0.13");
    }

    #[test]
    fn test_values_below_midpoint_round_down() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(fixed(1.005, 2), "1.00");
        assert_eq!(fixed(0.123456, 4), "0.1235");
    }

    #[test]
    fn test_pads_to_requested_digits() {
        assert_eq!(fixed(5.0, 2), "5.00");
        assert_eq!(fixed(1.0, 4), "1.0000");
        assert_eq!(fixed(0.0, 2), "0.00");
    }

    #[test]
    fn test_non_finite_falls_back() {
        assert_eq!(fixed(f64::NAN, 2), "NaN");
        assert_eq!(fixed(f64::INFINITY, 2), "inf");
    }
}
