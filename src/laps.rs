//! Lap and telemetry data model. Everything here is read-only once loaded
//! from the archive; the dashboard only filters and picks.

use std::time::Duration;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One point along a lap, ordered by distance from the start/finish line.
/// Throttle, brake, and gear are carried for completeness but unused by the
/// speed comparison view.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Meters traveled from S/F this lap
    pub distance_m: f64,
    /// Instantaneous speed
    pub speed_kmh: f64,
    /// Throttle use. 0=off throttle to 1=full throttle
    #[serde(default)]
    pub throttle: Option<f32>,
    /// Brake use. 0=brake released to 1=max pedal force
    #[serde(default)]
    pub brake: Option<f32>,
    /// Current gear
    #[serde(default)]
    pub gear: Option<i8>,
}

/// One complete circuit by one driver, with its time and telemetry trace.
/// The time is `None` for incomplete laps.
#[derive(Clone, Debug, Default)]
pub struct Lap {
    pub driver: String,
    pub number: u32,
    pub time: Option<Duration>,
    pub telemetry: Vec<TelemetrySample>,
}

impl Lap {
    /// Speed-vs-distance series in the shape the plot wants.
    pub fn speed_trace(&self) -> Vec<[f64; 2]> {
        self.telemetry
            .iter()
            .map(|s| [s.distance_m, s.speed_kmh])
            .collect()
    }
}

/// A filterable collection of laps, kept in archive load order. Load order
/// follows lap start time, which is what makes the duplicate-number
/// tie-break in [`LapSet::pick_number`] deterministic.
#[derive(Clone, Debug, Default)]
pub struct LapSet {
    laps: Vec<Lap>,
}

impl LapSet {
    pub fn new(laps: Vec<Lap>) -> Self {
        Self { laps }
    }

    pub fn push(&mut self, lap: Lap) {
        self.laps.push(lap);
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lap> {
        self.laps.iter()
    }

    /// Laps belonging to one driver, in load order.
    pub fn pick_driver(&self, code: &str) -> LapSet {
        LapSet {
            laps: self
                .laps
                .iter()
                .filter(|l| l.driver == code)
                .cloned()
                .collect(),
        }
    }

    /// The lap with the minimum non-null time. Untimed laps are ignored;
    /// `None` when no timed lap exists.
    pub fn pick_fastest(&self) -> Option<&Lap> {
        self.laps
            .iter()
            .filter(|l| l.time.is_some())
            .min_by(|a, b| a.time.cmp(&b.time))
    }

    /// The first lap with an exact number match, `None` when the number is
    /// not in the set.
    pub fn pick_number(&self, number: u32) -> Option<&Lap> {
        self.laps.iter().find(|l| l.number == number)
    }

    /// Available lap numbers for the manual-selection dropdown, deduplicated,
    /// in load order.
    pub fn lap_numbers(&self) -> Vec<u32> {
        self.laps.iter().map(|l| l.number).unique().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed_lap(driver: &str, number: u32, time_s: f64) -> Lap {
        Lap {
            driver: driver.to_string(),
            number,
            time: Some(Duration::from_secs_f64(time_s)),
            telemetry: Vec::new(),
        }
    }

    fn untimed_lap(driver: &str, number: u32) -> Lap {
        Lap {
            driver: driver.to_string(),
            number,
            time: None,
            telemetry: Vec::new(),
        }
    }

    #[test]
    fn test_pick_fastest() {
        let laps = LapSet::new(vec![
            timed_lap("VER", 1, 92.1),
            timed_lap("VER", 2, 90.3),
            timed_lap("VER", 3, 91.0),
        ]);
        let fastest = laps.pick_fastest().unwrap();
        assert_eq!(fastest.number, 2);
        assert_eq!(fastest.time, Some(Duration::from_secs_f64(90.3)));
    }

    #[test]
    fn test_pick_fastest_ignores_untimed_laps() {
        let laps = LapSet::new(vec![
            untimed_lap("LEC", 1),
            timed_lap("LEC", 2, 95.0),
            untimed_lap("LEC", 3),
        ]);
        assert_eq!(laps.pick_fastest().unwrap().number, 2);
    }

    #[test]
    fn test_pick_fastest_with_no_timed_laps() {
        let laps = LapSet::new(vec![untimed_lap("LEC", 1)]);
        assert!(laps.pick_fastest().is_none());
    }

    #[test]
    fn test_pick_driver_filters() {
        let laps = LapSet::new(vec![
            timed_lap("VER", 1, 92.1),
            timed_lap("LEC", 1, 93.0),
            timed_lap("VER", 2, 90.3),
        ]);
        let ver = laps.pick_driver("VER");
        assert_eq!(ver.len(), 2);
        assert!(ver.iter().all(|l| l.driver == "VER"));
    }

    #[test]
    fn test_pick_number_absent_is_none() {
        let laps = LapSet::new(vec![timed_lap("VER", 1, 92.1)]);
        assert!(laps.pick_number(7).is_none());
    }

    #[test]
    fn test_pick_number_duplicate_takes_first_occurrence() {
        let laps = LapSet::new(vec![
            timed_lap("VER", 4, 92.1),
            timed_lap("VER", 4, 90.3),
        ]);
        let lap = laps.pick_number(4).unwrap();
        assert_eq!(lap.time, Some(Duration::from_secs_f64(92.1)));
    }

    #[test]
    fn test_lap_numbers_deduplicated_in_order() {
        let laps = LapSet::new(vec![
            timed_lap("VER", 3, 92.1),
            timed_lap("VER", 1, 93.0),
            timed_lap("VER", 3, 90.3),
        ]);
        assert_eq!(laps.lap_numbers(), vec![3, 1]);
    }

    #[test]
    fn test_speed_trace() {
        let lap = Lap {
            telemetry: vec![
                TelemetrySample {
                    distance_m: 0.,
                    speed_kmh: 120.,
                    ..Default::default()
                },
                TelemetrySample {
                    distance_m: 50.,
                    speed_kmh: 180.,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(lap.speed_trace(), vec![[0., 120.], [50., 180.]]);
    }
}
