//! Season data: session selection types and the provider boundary the
//! dashboard pulls schedules and sessions through.

pub mod archive;
pub mod cache;
pub mod colors;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::LapdeltaError;
use crate::laps::LapSet;

/// The kind of on-track activity within an event.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum SessionKind {
    #[default]
    Race,
    Qualifying,
    Practice1,
    Practice2,
    Practice3,
}

impl SessionKind {
    pub const ALL: [SessionKind; 5] = [
        SessionKind::Race,
        SessionKind::Qualifying,
        SessionKind::Practice1,
        SessionKind::Practice2,
        SessionKind::Practice3,
    ];

    /// Short code used in chart titles, matching timing-screen convention.
    pub fn code(&self) -> &'static str {
        match self {
            SessionKind::Race => "R",
            SessionKind::Qualifying => "Q",
            SessionKind::Practice1 => "FP1",
            SessionKind::Practice2 => "FP2",
            SessionKind::Practice3 => "FP3",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionKind::Race => "Race",
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Practice1 => "Practice 1",
            SessionKind::Practice2 => "Practice 2",
            SessionKind::Practice3 => "Practice 3",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One event on a season's schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub year: u16,
    pub name: String,
}

/// One classified driver in a session's results, with the team the display
/// color is resolved from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DriverEntry {
    pub code: String,
    pub team: String,
}

/// Fully determines which session dataset is loaded. Also the cache key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub year: u16,
    pub event_name: String,
    pub kind: SessionKind,
}

/// Identity of a loaded session, carried inside [`SessionData`] so chart
/// titles can name the session without the [`SessionKey`] it was looked up by.
#[derive(Clone, Debug, Default)]
pub struct SessionInfo {
    pub year: u16,
    pub event_name: String,
    pub kind: SessionKind,
}

/// One loaded session: its results table and every lap with telemetry.
#[derive(Clone, Debug, Default)]
pub struct SessionData {
    pub info: SessionInfo,
    pub results: Vec<DriverEntry>,
    pub laps: LapSet,
}

impl SessionData {
    pub fn driver_codes(&self) -> Vec<String> {
        self.results.iter().map(|d| d.code.clone()).collect()
    }
}

/// The boundary to whatever supplies schedules and session data. The
/// dashboard only ever talks to this trait; [`cache::SessionCache`] wraps any
/// implementation with a bounded LRU.
pub trait SeasonDataProvider {
    /// All events on a season's schedule, in calendar order.
    fn event_schedule(&mut self, year: u16) -> Result<Vec<EventInfo>, LapdeltaError>;

    /// Loads one session's results and laps.
    fn load_session(
        &mut self,
        year: u16,
        event_name: &str,
        kind: SessionKind,
    ) -> Result<SessionData, LapdeltaError>;
}
