// Rounds half away from zero to two decimals
pub fn round_to_hundredths(val: f64) -> f64 {
    (val * 100.0).round() / 100.0
}

// Per-match average rounded to two decimals. Zero matches gives 0.0, never NaN
pub fn per_match(total: u32, matches_played: u32) -> f64 {
    if matches_played == 0 { return 0.0; }
    round_to_hundredths(total as f64 / matches_played as f64)
}

// Share of `part` in `whole` as a percentage, 0.0 for an empty whole
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 { return 0.0; }
    part as f64 / whole as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to_hundredths(2.345_000_1), 2.35);
        assert_eq!(round_to_hundredths(0.125), 0.13);
        assert_eq!(round_to_hundredths(-0.125), -0.13);
        assert_eq!(round_to_hundredths(1.0 / 3.0), 0.33);
    }

    #[test]
    fn per_match_guards_zero() {
        assert_eq!(per_match(10, 0), 0.0);
        assert_eq!(per_match(0, 0), 0.0);
        assert_eq!(per_match(10, 4), 2.5);
        assert_eq!(per_match(2, 3), 0.67);
    }

    #[test]
    fn percentage_guards_zero() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }
}
