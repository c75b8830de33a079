//! Time representation for the player.
//! Playback positions are plain seconds (f64); timer periods are `Duration`s.

use std::time::Duration;

/// Playback position or length in seconds
pub type Seconds = f64;

/// Time constants for conversions
pub mod constants {
    pub const SECONDS_PER_MINUTE: i64 = 60;
}

/// Time zero constant
pub const ZERO: Seconds = 0.0;

/// Convert seconds (f64) to a `Duration`, saturating negatives and NaN to zero
#[inline]
pub fn to_duration(seconds: Seconds) -> Duration {
    if seconds.is_finite() && seconds > 0.0 {
        Duration::from_secs_f64(seconds)
    } else {
        Duration::ZERO
    }
}

/// Convert a `Duration` to seconds (f64)
#[inline]
pub fn from_duration(duration: Duration) -> Seconds {
    duration.as_secs_f64()
}

/// Format time as MM:SS.
/// Minutes are not wrapped at the hour, so 3661s renders as "61:01".
pub fn format_time(seconds: Seconds) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as i64
    } else {
        0
    };
    let minutes = whole / constants::SECONDS_PER_MINUTE;
    let secs = whole % constants::SECONDS_PER_MINUTE;

    format!("{:02}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(0.0), "00:00");
    }

    #[test]
    fn test_format_time_truncates_fraction() {
        assert_eq!(format_time(59.999), "00:59");
        assert_eq!(format_time(60.0), "01:00");
        assert_eq!(format_time(125.4), "02:05");
    }

    #[test]
    fn test_format_time_long_tracks() {
        // No hour field: minutes keep counting
        assert_eq!(format_time(3661.0), "61:01");
    }

    #[test]
    fn test_format_time_degenerate_input() {
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn test_duration_conversion() {
        let d = to_duration(1.5);
        assert_eq!(d, Duration::from_millis(1500));
        assert!((from_duration(d) - 1.5).abs() < 0.000001);
    }

    #[test]
    fn test_duration_conversion_saturates() {
        assert_eq!(to_duration(-1.0), Duration::ZERO);
        assert_eq!(to_duration(f64::NAN), Duration::ZERO);
        assert_eq!(to_duration(ZERO), Duration::ZERO);
    }
}
