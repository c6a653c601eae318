use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Price color scale
// ---------------------------------------------------------------------------

/// Maps a price range onto a green→red hue gradient, so cheap municipalities
/// read green and expensive ones red on the map and bar chart.
#[derive(Debug, Clone, Copy)]
pub struct PriceScale {
    min: f64,
    max: f64,
}

impl PriceScale {
    /// Build a scale from the prices present in a series. `None` when the
    /// series has no priced entries.
    pub fn from_prices(prices: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut any = false;
        for p in prices {
            any = true;
            min = min.min(p);
            max = max.max(p);
        }
        any.then_some(PriceScale { min, max })
    }

    /// Color for a price; gray for missing prices.
    pub fn color_for(&self, price: Option<f64>) -> Color32 {
        let Some(price) = price else {
            return Color32::GRAY;
        };
        let range = self.max - self.min;
        let t = if range.abs() < f64::EPSILON {
            0.5
        } else {
            ((price - self.min) / range).clamp(0.0, 1.0)
        };
        // Hue 120 (green) at the cheap end down to 0 (red) at the expensive end.
        let hsl = Hsl::new(120.0 * (1.0 - t as f32), 0.75, 0.45);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}
