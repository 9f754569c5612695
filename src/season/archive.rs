//! Offline season archive: a JSONL stream of events, session headers, lap
//! headers, and telemetry samples. Samples attach to the most recent lap
//! header, laps to the most recent session header, the same grouping pass a
//! recorded telemetry file goes through.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::LapdeltaError;
use crate::laps::{Lap, TelemetrySample};
use crate::season::{
    DriverEntry, EventInfo, SeasonDataProvider, SessionData, SessionInfo, SessionKey, SessionKind,
};

/// One line of the archive file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ArchiveRecord {
    /// Adds an event to a season's schedule.
    Event(EventInfo),
    /// Starts a session; every following `Lap` and `Sample` belongs to it.
    SessionStart {
        year: u16,
        event_name: String,
        kind: SessionKind,
        results: Vec<DriverEntry>,
    },
    /// Starts a lap within the current session. Lap time is in seconds,
    /// absent for incomplete laps.
    Lap {
        driver: String,
        number: u32,
        time_s: Option<f64>,
    },
    /// One telemetry point of the current lap.
    Sample(TelemetrySample),
}

/// All seasons loaded from one archive file, indexed for provider lookups.
pub struct SeasonArchive {
    schedules: HashMap<u16, Vec<EventInfo>>,
    sessions: HashMap<SessionKey, SessionData>,
}

impl SeasonArchive {
    pub fn load(source_file: &Path) -> Result<Self, LapdeltaError> {
        let records = serde_jsonlines::json_lines(source_file)
            .map_err(|e| LapdeltaError::ArchiveIoError { source: e })?
            .collect::<Result<Vec<ArchiveRecord>, std::io::Error>>()
            .map_err(|e| LapdeltaError::ArchiveIoError { source: e })?;

        let mut schedules: HashMap<u16, Vec<EventInfo>> = HashMap::new();
        let mut sessions: HashMap<SessionKey, SessionData> = HashMap::new();

        let mut cur_session: Option<(SessionKey, SessionData)> = None;
        let mut cur_lap: Option<Lap> = None;

        fn finalize_lap(session: &mut Option<(SessionKey, SessionData)>, lap: Option<Lap>) {
            if let (Some((_, data)), Some(lap)) = (session.as_mut(), lap) {
                data.laps.push(lap);
            }
        }

        for (line_no, record) in records.into_iter().enumerate() {
            let line = line_no + 1;
            match record {
                ArchiveRecord::Event(event) => {
                    let schedule = schedules.entry(event.year).or_default();
                    if !schedule.contains(&event) {
                        schedule.push(event);
                    }
                }
                ArchiveRecord::SessionStart {
                    year,
                    event_name,
                    kind,
                    results,
                } => {
                    finalize_lap(&mut cur_session, cur_lap.take());
                    if let Some((key, data)) = cur_session.take() {
                        sessions.insert(key, data);
                    }
                    let key = SessionKey {
                        year,
                        event_name: event_name.clone(),
                        kind,
                    };
                    let data = SessionData {
                        info: SessionInfo {
                            year,
                            event_name,
                            kind,
                        },
                        results,
                        laps: Default::default(),
                    };
                    cur_session = Some((key, data));
                }
                ArchiveRecord::Lap {
                    driver,
                    number,
                    time_s,
                } => {
                    if cur_session.is_none() {
                        return Err(LapdeltaError::OrphanArchiveRecord { line });
                    }
                    // Duration::from_secs_f64 panics on negative or non-finite input
                    let time = match time_s {
                        Some(t) if !t.is_finite() || t < 0. => {
                            return Err(LapdeltaError::InvalidLapTime { line });
                        }
                        Some(t) => Some(Duration::from_secs_f64(t)),
                        None => None,
                    };
                    finalize_lap(&mut cur_session, cur_lap.take());
                    cur_lap = Some(Lap {
                        driver,
                        number,
                        time,
                        telemetry: Vec::new(),
                    });
                }
                ArchiveRecord::Sample(sample) => match cur_lap.as_mut() {
                    Some(lap) => lap.telemetry.push(sample),
                    None => return Err(LapdeltaError::OrphanTelemetrySample { line }),
                },
            }
        }
        finalize_lap(&mut cur_session, cur_lap.take());
        if let Some((key, data)) = cur_session.take() {
            sessions.insert(key, data);
        }

        info!(
            "Loaded {:?}, found {} seasons and {} sessions",
            source_file,
            schedules.len(),
            sessions.len()
        );
        Ok(Self {
            schedules,
            sessions,
        })
    }
}

impl SeasonDataProvider for SeasonArchive {
    fn event_schedule(&mut self, year: u16) -> Result<Vec<EventInfo>, LapdeltaError> {
        self.schedules
            .get(&year)
            .cloned()
            .ok_or(LapdeltaError::UnknownYear { year })
    }

    fn load_session(
        &mut self,
        year: u16,
        event_name: &str,
        kind: SessionKind,
    ) -> Result<SessionData, LapdeltaError> {
        let key = SessionKey {
            year,
            event_name: event_name.to_string(),
            kind,
        };
        self.sessions
            .get(&key)
            .cloned()
            .ok_or_else(|| LapdeltaError::UnknownSession {
                year,
                event_name: event_name.to_string(),
                kind,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_sample_archive() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let records = vec![
            ArchiveRecord::Event(EventInfo {
                year: 2025,
                name: "Monaco Grand Prix".to_string(),
            }),
            ArchiveRecord::Event(EventInfo {
                year: 2025,
                name: "British Grand Prix".to_string(),
            }),
            ArchiveRecord::SessionStart {
                year: 2025,
                event_name: "Monaco Grand Prix".to_string(),
                kind: SessionKind::Qualifying,
                results: vec![
                    DriverEntry {
                        code: "VER".to_string(),
                        team: "Red Bull Racing".to_string(),
                    },
                    DriverEntry {
                        code: "LEC".to_string(),
                        team: "Ferrari".to_string(),
                    },
                ],
            },
            ArchiveRecord::Lap {
                driver: "VER".to_string(),
                number: 1,
                time_s: Some(71.2),
            },
            ArchiveRecord::Sample(TelemetrySample {
                distance_m: 0.,
                speed_kmh: 120.,
                ..Default::default()
            }),
            ArchiveRecord::Sample(TelemetrySample {
                distance_m: 45.,
                speed_kmh: 205.,
                ..Default::default()
            }),
            ArchiveRecord::Lap {
                driver: "LEC".to_string(),
                number: 1,
                time_s: None,
            },
            ArchiveRecord::Sample(TelemetrySample {
                distance_m: 0.,
                speed_kmh: 118.,
                ..Default::default()
            }),
        ];
        for record in records {
            writeln!(file, "{}", serde_json::to_string(&record).unwrap()).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_groups_laps_and_samples() {
        let file = write_sample_archive();
        let mut archive = SeasonArchive::load(file.path()).unwrap();

        let schedule = archive.event_schedule(2025).unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].name, "Monaco Grand Prix");

        let session = archive
            .load_session(2025, "Monaco Grand Prix", SessionKind::Qualifying)
            .unwrap();
        assert_eq!(session.driver_codes(), vec!["VER", "LEC"]);
        assert_eq!(session.laps.len(), 2);

        let ver_lap = session.laps.pick_driver("VER").pick_fastest().cloned().unwrap();
        assert_eq!(ver_lap.telemetry.len(), 2);
        assert_eq!(ver_lap.time, Some(Duration::from_secs_f64(71.2)));

        // the incomplete LEC lap keeps its telemetry but has no time
        let lec_laps = session.laps.pick_driver("LEC");
        assert!(lec_laps.pick_fastest().is_none());
        assert_eq!(lec_laps.pick_number(1).unwrap().telemetry.len(), 1);
    }

    #[test]
    fn test_unknown_year_is_error() {
        let file = write_sample_archive();
        let mut archive = SeasonArchive::load(file.path()).unwrap();
        assert!(matches!(
            archive.event_schedule(2019),
            Err(LapdeltaError::UnknownYear { year: 2019 })
        ));
    }

    #[test]
    fn test_unknown_session_is_error() {
        let file = write_sample_archive();
        let mut archive = SeasonArchive::load(file.path()).unwrap();
        assert!(matches!(
            archive.load_session(2025, "Monaco Grand Prix", SessionKind::Race),
            Err(LapdeltaError::UnknownSession { .. })
        ));
    }

    #[test]
    fn test_orphan_sample_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        let sample = ArchiveRecord::Sample(TelemetrySample::default());
        writeln!(file, "{}", serde_json::to_string(&sample).unwrap()).unwrap();
        file.flush().unwrap();

        assert!(matches!(
            SeasonArchive::load(file.path()),
            Err(LapdeltaError::OrphanTelemetrySample { line: 1 })
        ));
    }

    #[test]
    fn test_negative_lap_time_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        let session = ArchiveRecord::SessionStart {
            year: 2025,
            event_name: "Monaco Grand Prix".to_string(),
            kind: SessionKind::Race,
            results: Vec::new(),
        };
        let lap = ArchiveRecord::Lap {
            driver: "VER".to_string(),
            number: 1,
            time_s: Some(-5.0),
        };
        writeln!(file, "{}", serde_json::to_string(&session).unwrap()).unwrap();
        writeln!(file, "{}", serde_json::to_string(&lap).unwrap()).unwrap();
        file.flush().unwrap();

        assert!(matches!(
            SeasonArchive::load(file.path()),
            Err(LapdeltaError::InvalidLapTime { line: 2 })
        ));
    }

    #[test]
    fn test_orphan_lap_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        let lap = ArchiveRecord::Lap {
            driver: "VER".to_string(),
            number: 1,
            time_s: Some(90.0),
        };
        writeln!(file, "{}", serde_json::to_string(&lap).unwrap()).unwrap();
        file.flush().unwrap();

        assert!(matches!(
            SeasonArchive::load(file.path()),
            Err(LapdeltaError::OrphanArchiveRecord { line: 1 })
        ));
    }
}
