//! Lap time formatting and comparison helpers.

use std::time::Duration;

/// Formats an optional lap time as `M:SS.mmm`. Missing times render as `N/A`,
/// which is how incomplete or in/out laps show up in the summary row.
pub fn format_laptime(time: Option<Duration>) -> String {
    match time {
        None => "N/A".to_string(),
        Some(t) => {
            let total_seconds = t.as_secs_f64();
            let minutes = (total_seconds / 60.).floor() as u64;
            let seconds = total_seconds % 60.;
            format!("{}:{:06.3}", minutes, seconds)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FasterDriver {
    First,
    Second,
}

/// Signed lap-time comparison between two drivers. The delta itself is never
/// stored, only the winner and the absolute gap in seconds.
#[derive(Clone, Copy, Debug)]
pub struct LapDelta {
    pub faster: FasterDriver,
    pub gap_s: f64,
}

impl LapDelta {
    /// Compares two lap times. Returns `None` if either time is missing, in
    /// which case the caller skips the comparison entirely. A tie resolves to
    /// the second driver: the winner is picked on `t1 - t2 < 0` only.
    pub fn between(t1: Option<Duration>, t2: Option<Duration>) -> Option<Self> {
        let (t1, t2) = (t1?, t2?);
        let delta = t1.as_secs_f64() - t2.as_secs_f64();
        let faster = if delta < 0. {
            FasterDriver::First
        } else {
            FasterDriver::Second
        };
        Some(Self {
            faster,
            gap_s: delta.abs(),
        })
    }

    pub fn gap_label(&self) -> String {
        format!("{:.3} s faster", self.gap_s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_missing_laptime() {
        assert_eq!(format_laptime(None), "N/A");
    }

    #[test]
    fn test_format_laptime() {
        assert_eq!(
            format_laptime(Some(Duration::from_secs_f64(75.5))),
            "1:15.500"
        );
    }

    #[test]
    fn test_format_laptime_pads_seconds() {
        assert_eq!(
            format_laptime(Some(Duration::from_secs_f64(61.004))),
            "1:01.004"
        );
    }

    #[test]
    fn test_format_laptime_over_two_minutes() {
        assert_eq!(
            format_laptime(Some(Duration::from_secs_f64(125.021))),
            "2:05.021"
        );
    }

    #[test]
    fn test_delta_first_driver_faster() {
        let delta = LapDelta::between(
            Some(Duration::from_secs_f64(90.3)),
            Some(Duration::from_secs_f64(92.1)),
        )
        .unwrap();
        assert_eq!(delta.faster, FasterDriver::First);
        assert_eq!(delta.gap_label(), "1.800 s faster");
    }

    #[test]
    fn test_delta_second_driver_faster() {
        let delta = LapDelta::between(
            Some(Duration::from_secs_f64(92.1)),
            Some(Duration::from_secs_f64(90.3)),
        )
        .unwrap();
        assert_eq!(delta.faster, FasterDriver::Second);
        assert_eq!(delta.gap_label(), "1.800 s faster");
    }

    #[test]
    fn test_delta_tie_resolves_to_second_driver() {
        let delta = LapDelta::between(
            Some(Duration::from_secs_f64(90.0)),
            Some(Duration::from_secs_f64(90.0)),
        )
        .unwrap();
        assert_eq!(delta.faster, FasterDriver::Second);
        assert_eq!(delta.gap_label(), "0.000 s faster");
    }

    #[test]
    fn test_delta_skipped_when_time_missing() {
        assert!(LapDelta::between(None, Some(Duration::from_secs(90))).is_none());
        assert!(LapDelta::between(Some(Duration::from_secs(90)), None).is_none());
        assert!(LapDelta::between(None, None).is_none());
    }

    proptest! {
        #[test]
        fn prop_format_laptime_shape(seconds in 0.0f64..3600.0) {
            let formatted = format_laptime(Some(Duration::from_secs_f64(seconds)));
            let (minutes, rest) = formatted.split_once(':').unwrap();
            prop_assert!(minutes.parse::<u64>().is_ok());
            // SS.mmm, seconds always zero-padded to two integer digits
            prop_assert_eq!(rest.len(), 6);
            prop_assert!(rest.parse::<f64>().unwrap() < 60.001);
        }

        #[test]
        fn prop_delta_gap_is_absolute_difference(t1 in 60.0f64..120.0, t2 in 60.0f64..120.0) {
            let delta = LapDelta::between(
                Some(Duration::from_secs_f64(t1)),
                Some(Duration::from_secs_f64(t2)),
            ).unwrap();
            prop_assert!((delta.gap_s - (t1 - t2).abs()).abs() < 1e-6);
            if t1 < t2 {
                prop_assert_eq!(delta.faster, FasterDriver::First);
            } else {
                prop_assert_eq!(delta.faster, FasterDriver::Second);
            }
        }
    }
}
