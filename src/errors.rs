// Error types for lapdelta

use crate::season::SessionKind;
use snafu::Snafu;
use std::io;

#[derive(Debug, Snafu)]
pub enum LapdeltaError {
    // Errors for the season archive
    #[snafu(display("Invalid season archive: {path}"))]
    InvalidArchiveFile { path: String },
    #[snafu(display("Error reading season archive"))]
    ArchiveIoError { source: io::Error },
    #[snafu(display("Archive record outside of a session at line {line}"))]
    OrphanArchiveRecord { line: usize },
    #[snafu(display("Telemetry sample outside of a lap at line {line}"))]
    OrphanTelemetrySample { line: usize },
    #[snafu(display("Invalid lap time at line {line}"))]
    InvalidLapTime { line: usize },

    // Errors for provider lookups
    #[snafu(display("No events in the archive for {year}"))]
    UnknownYear { year: u16 },
    #[snafu(display("No {kind} session for {event_name} {year} in the archive"))]
    UnknownSession {
        year: u16,
        event_name: String,
        kind: SessionKind,
    },

    // Config management errors
    #[snafu(display("Could not find application data directory to save config file"))]
    NoConfigDir,
    #[snafu(display("Error writing config file"))]
    ConfigIOError { source: io::Error },
    #[snafu(display("Error serializing config file"))]
    ConfigSerializeError { source: serde_json::Error },
}
