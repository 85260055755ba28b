//! Decimal rounding shared by every rounded output field.
//!
//! Halves round to even (banker's rounding), so a savings estimate of
//! 352.5 kg is reported as 352 and 577.5 kg as 578.

/// Round to `decimals` places after the point
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_one_decimal() {
        assert_eq!(round_to(7.2548, 1), 7.3);
        assert_eq!(round_to(26.18, 1), 26.2);
        assert_eq!(round_to(-48.44, 1), -48.4);
    }

    #[test]
    fn test_round_to_whole() {
        assert_eq!(round_to(2520.0000000000005, 0), 2520.0);
        assert_eq!(round_to(467.99999, 0), 468.0);
        assert_eq!(round_to(0.4, 0), 0.0);
    }

    #[test]
    fn test_halves_round_to_even() {
        assert_eq!(round_to(352.5, 0), 352.0);
        assert_eq!(round_to(577.5, 0), 578.0);
        assert_eq!(round_to(-0.5, 0), 0.0);
        assert_eq!(round_to(0.25, 1), 0.2);
    }
}
