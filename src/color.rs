use eframe::egui::Color32;
use palette::{Hsl, Hsla, IntoColor, Srgb, Srgba};

// ---------------------------------------------------------------------------
// Hue cycle: evenly spaced HSLA stops
// ---------------------------------------------------------------------------

/// Number of stops in the month hue cycle.
pub const MONTH_STOPS: usize = 12;

/// One HSLA colour stop. Saturation/lightness/alpha are in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueStop {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl HueStop {
    pub fn new(hue: f32) -> Self {
        Self {
            hue,
            saturation: 1.0,
            lightness: 0.75,
            alpha: 0.9,
        }
    }

    /// CSS form, e.g. `hsla(330, 100%, 75%, 0.9)`.
    pub fn css(&self) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            self.hue,
            self.saturation * 100.0,
            self.lightness * 100.0,
            self.alpha
        )
    }

    /// 8-bit unmultiplied RGBA.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let hsla = Hsla::new(self.hue, self.saturation, self.lightness, self.alpha);
        let rgba: Srgba = hsla.into_color();
        [
            (rgba.red * 255.0).round() as u8,
            (rgba.green * 255.0).round() as u8,
            (rgba.blue * 255.0).round() as u8,
            (rgba.alpha * 255.0).round() as u8,
        ]
    }

    pub fn to_color32(&self) -> Color32 {
        let [r, g, b, a] = self.to_rgba8();
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// `n` stops with hues `0, 360/n, 2·360/n, …` (360° itself is excluded).
pub fn hue_cycle(n: usize) -> Vec<HueStop> {
    (0..n)
        .map(|i| HueStop::new(i as f32 * 360.0 / n as f32))
        .collect()
}

/// Position in the 12-stop cycle used for calendar month `month` (1–12).
///
/// The cycle runs backwards: January takes the last stop, December the first.
pub fn month_color_index(month: u32) -> usize {
    debug_assert!((1..=12).contains(&month));
    MONTH_STOPS - month as usize
}

// ---------------------------------------------------------------------------
// Continuous scale: magnitude → Color32
// ---------------------------------------------------------------------------

/// Rainbow scale stretched over a magnitude extent, for map points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeScale {
    pub min: f64,
    pub max: f64,
}

impl MagnitudeScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 0.0 at `min`, 1.0 at `max`, clamped. A flat extent maps everything to 0.0.
    pub fn position(&self, magnitude: f64) -> f64 {
        let range = self.max - self.min;
        if range.abs() < f64::EPSILON {
            return 0.0;
        }
        ((magnitude - self.min) / range).clamp(0.0, 1.0)
    }

    /// Violet (low) through red (high).
    pub fn color_for(&self, magnitude: f64) -> Color32 {
        let hue = 270.0 * (1.0 - self.position(magnitude)) as f32;
        let hsl = Hsl::new(hue, 0.85, 0.5);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}
