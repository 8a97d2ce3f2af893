/// Average encoding rate in bits/second that fills `max_size_mb` over
/// `duration_seconds`, truncated to an integer.
///
/// `duration_seconds` must be positive; the probe layer substitutes the
/// fallback maximum before planning, so a zero or negative duration never
/// reaches this function.
pub fn target_bitrate(max_size_mb: f64, duration_seconds: f64) -> u64 {
    let total_bits = max_size_mb * 8.0 * 1024.0 * 1024.0;
    (total_bits / duration_seconds) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitrate_at_maximum_duration() {
        // 13 MB over 6 minutes
        assert_eq!(target_bitrate(13.0, 360.0), 302_921);
    }

    #[test]
    fn test_bitrate_for_short_clip() {
        assert_eq!(target_bitrate(13.0, 10.0), 10_905_190);
    }

    #[test]
    fn test_bitrate_matches_floor_formula() {
        for duration in [1.0, 7.5, 42.0, 113.3, 359.9, 360.0] {
            let expected = (13.0_f64 * 8.0 * 1024.0 * 1024.0 / duration).floor() as u64;
            assert_eq!(target_bitrate(13.0, duration), expected);
        }
    }

    #[test]
    fn test_bitrate_scales_inversely_with_duration() {
        assert!(target_bitrate(13.0, 10.0) > target_bitrate(13.0, 360.0));
    }
}
