use egui::{Color32, Context};

use crate::palette::Palette;

/// Services a paint view needs from the windowing layer around it
pub trait ViewHost {
    /// Look up a named color resource
    fn resolve_color(&self, name: &str) -> Option<Color32>;

    /// Smallest pointer movement, in pixels, that counts as intentional
    fn touch_tolerance(&self) -> f32;

    /// Ask for `on_draw` to be called again soon
    fn request_repaint(&self);
}

/// `ViewHost` backed by an egui context
pub struct EguiHost {
    ctx: Context,
    palette: Palette,
    touch_slop: f32,
}

impl EguiHost {
    /// `touch_slop` is in logical points; it is scaled to pixels on query
    pub fn new(ctx: Context, palette: Palette, touch_slop: f32) -> Self {
        Self {
            ctx,
            palette,
            touch_slop,
        }
    }

    pub fn ctx(&self) -> &Context {
        &self.ctx
    }
}

impl ViewHost for EguiHost {
    fn resolve_color(&self, name: &str) -> Option<Color32> {
        self.palette.get(name)
    }

    fn touch_tolerance(&self) -> f32 {
        self.touch_slop * self.ctx.pixels_per_point()
    }

    fn request_repaint(&self) {
        self.ctx.request_repaint();
    }
}
