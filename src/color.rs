use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Country;
use crate::scale::{Rgb, Scale};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Stable bubble fill for a country: evenly spaced hues over the whitelist.
pub fn country_color(country: Country) -> Color32 {
    let hue = (country.index() as f32 / Country::COUNT as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.65, 0.70);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Gradient: scale value → Color32
// ---------------------------------------------------------------------------

/// Clamp an unclamped RGB triple into a drawable colour.
pub fn to_color32(rgb: Rgb) -> Color32 {
    let channel = |c: i32| c.clamp(0, 255) as u8;
    Color32::from_rgb(channel(rgb.red), channel(rgb.green), channel(rgb.blue))
}

/// Red→green cell background for `value` within `scale`.
pub fn gradient_color(scale: &Scale, value: f64) -> Color32 {
    to_color32(scale.to_color(value))
}

/// Black or white, whichever reads better on `background`.
pub fn text_on(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
