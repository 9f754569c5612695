pub mod config;
pub mod dashboard;

use egui::Color32;

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_BROWN: Color32 = Color32::from_rgb(72, 30, 20);
pub(crate) const PALETTE_MAROON: Color32 = Color32::from_rgb(155, 57, 34);

pub(crate) const BANNER_SUCCESS: Color32 = Color32::from_rgb(0x52, 0xE2, 0x52);
pub(crate) const BANNER_WARNING: Color32 = Color32::from_rgb(0xFF, 0xD8, 0x66);
