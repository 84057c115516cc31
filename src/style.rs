use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::{PaintError, PaintResult};

pub const DEFAULT_STROKE_WIDTH: f32 = 12.0;

/// How two stroked segments meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Shape of the open ends of a stroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// Paint settings shared by every stroke and by the frame around the canvas.
///
/// The style is fixed once a surface is built; there is no way to change it
/// mid-stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Filled in from the `colorPaint` palette entry when a view is built,
    /// so it is neither read from nor written to config files.
    #[serde(skip)]
    pub color: Color32,
    pub width: f32,
    pub join: LineJoin,
    pub cap: LineCap,
    pub anti_alias: bool,
    /// Render through the high precision pipeline before quantizing to 8 bits
    pub dither: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0xFF, 0xEB, 0x3B),
            width: DEFAULT_STROKE_WIDTH,
            join: LineJoin::Round,
            cap: LineCap::Round,
            anti_alias: true,
            dither: true,
        }
    }
}

impl StrokeStyle {
    pub fn with_color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    pub fn validate(&self) -> PaintResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(PaintError::InvalidStyle(format!(
                "stroke width must be a positive number, got {}",
                self.width
            )));
        }
        Ok(())
    }

    pub(crate) fn to_paint(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(to_skia_color(self.color));
        paint.anti_alias = self.anti_alias;
        paint.force_hq_pipeline = self.dither;
        paint
    }

    pub(crate) fn to_stroke(&self) -> tiny_skia::Stroke {
        let mut stroke = tiny_skia::Stroke::default();
        stroke.width = self.width;
        stroke.line_join = match self.join {
            LineJoin::Miter => tiny_skia::LineJoin::Miter,
            LineJoin::Round => tiny_skia::LineJoin::Round,
            LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        };
        stroke.line_cap = match self.cap {
            LineCap::Butt => tiny_skia::LineCap::Butt,
            LineCap::Round => tiny_skia::LineCap::Round,
            LineCap::Square => tiny_skia::LineCap::Square,
        };
        stroke
    }
}

pub(crate) fn to_skia_color(color: Color32) -> tiny_skia::Color {
    // Color32 is premultiplied; tiny-skia wants straight alpha here.
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}
