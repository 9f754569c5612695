//! Team color lookup: a driver's trace is drawn in their team's color,
//! resolved from the session results. Unknown teams fall back to a
//! deterministic palette color so the two traces stay distinguishable.

use egui::Color32;

use crate::season::SessionData;

const TEAM_COLORS: &[(&str, Color32)] = &[
    ("Red Bull Racing", Color32::from_rgb(0x36, 0x71, 0xC6)),
    ("Ferrari", Color32::from_rgb(0xE8, 0x00, 0x20)),
    ("Mercedes", Color32::from_rgb(0x27, 0xF4, 0xD2)),
    ("McLaren", Color32::from_rgb(0xFF, 0x80, 0x00)),
    ("Aston Martin", Color32::from_rgb(0x22, 0x93, 0x71)),
    ("Alpine", Color32::from_rgb(0x00, 0x93, 0xCC)),
    ("Williams", Color32::from_rgb(0x64, 0xC4, 0xFF)),
    ("RB", Color32::from_rgb(0x66, 0x92, 0xFF)),
    ("Kick Sauber", Color32::from_rgb(0x52, 0xE2, 0x52)),
    ("Haas F1 Team", Color32::from_rgb(0xB6, 0xBA, 0xBD)),
    // teams from earlier seasons covered by the archive range
    ("AlphaTauri", Color32::from_rgb(0x4E, 0x7C, 0x9B)),
    ("Alfa Romeo", Color32::from_rgb(0x90, 0x00, 0x00)),
    ("Racing Point", Color32::from_rgb(0xF5, 0x96, 0xC8)),
    ("Renault", Color32::from_rgb(0xFF, 0xD8, 0x00)),
    ("Toro Rosso", Color32::from_rgb(0x46, 0x9B, 0xFF)),
    ("Force India", Color32::from_rgb(0xFF, 0x80, 0xC7)),
    ("Sauber", Color32::from_rgb(0x00, 0x6E, 0xFF)),
    ("Lotus F1", Color32::from_rgb(0xFF, 0xB8, 0x00)),
    ("Manor Marussia", Color32::from_rgb(0xED, 0x1B, 0x24)),
];

const FALLBACK_PALETTE: &[Color32] = &[
    Color32::from_rgb(0xF2, 0x61, 0x3F),
    Color32::from_rgb(0x9B, 0x39, 0x22),
    Color32::from_rgb(0xC8, 0xC8, 0xC8),
    Color32::from_rgb(0x48, 0x8F, 0x31),
];

/// Official team color for a driver in this session. The driver's team comes
/// from the session results; an unknown team falls back to a palette color
/// keyed on the driver's position in the results, so two unknown-team drivers
/// still get distinct colors. Drivers missing from the results entirely get a
/// palette color keyed on their code.
pub fn driver_color(code: &str, session: &SessionData) -> Color32 {
    match session.results.iter().position(|d| d.code == code) {
        Some(index) => team_color(&session.results[index].team)
            .unwrap_or(FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()]),
        None => fallback_color(code),
    }
}

/// Color for a team name, `None` when the team is not in the table.
pub fn team_color(team: &str) -> Option<Color32> {
    TEAM_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(team))
        .map(|(_, color)| *color)
}

fn fallback_color(code: &str) -> Color32 {
    let index = code.bytes().fold(0usize, |acc, b| acc + b as usize);
    FALLBACK_PALETTE[index % FALLBACK_PALETTE.len()]
}
