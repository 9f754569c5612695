// Library interface for lapdelta
// This allows the binary and integration tests to access internal modules

pub mod errors;
pub mod laps;
pub mod laptime;
pub mod season;
pub mod ui;

// Re-export commonly used types
pub use errors::LapdeltaError;
pub use laps::{Lap, LapSet, TelemetrySample};
pub use laptime::{FasterDriver, LapDelta, format_laptime};
pub use season::{
    DriverEntry, EventInfo, SeasonDataProvider, SessionData, SessionInfo, SessionKind,
    archive::SeasonArchive, cache::SessionCache,
};
