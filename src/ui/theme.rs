// src/ui/theme.rs
use eframe::egui::Color32;

// Chart palette: one accent blue for the trend line, three shades for the
// platform bars, gray for axis text.
pub const ACCENT: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
pub const ACCENT_LIGHT: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);
pub const ACCENT_FAINT: Color32 = Color32::from_rgb(0x93, 0xc5, 0xfd);
pub const AXIS_TEXT: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);

/// Bar fill per platform, in chart order.
pub const PLATFORM_COLORS: [Color32; 3] = [ACCENT, ACCENT_LIGHT, ACCENT_FAINT];

/// Bar width in plot units.
pub const BAR_WIDTH: f64 = 0.6;
