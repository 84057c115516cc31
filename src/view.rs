use log::{debug, info};
use tiny_skia::Pixmap;

use crate::config::PaintConfig;
use crate::error::{PaintError, PaintResult};
use crate::host::ViewHost;
use crate::input::PointerSample;
use crate::palette::{COLOR_BACKGROUND, COLOR_PAINT};
use crate::stroke::{StrokeAccumulator, StrokeUpdate};
use crate::surface::CanvasSurface;

/// A freehand drawing surface driven by host callbacks.
///
/// The host reports size changes, pointer samples and repaint requests; the
/// view keeps the stroke state and the cached image and asks the host for a
/// repaint whenever the cache changes.
pub struct PaintView<H: ViewHost> {
    host: H,
    accumulator: StrokeAccumulator,
    surface: CanvasSurface,
}

impl<H: ViewHost> PaintView<H> {
    /// Resolves colors and the touch tolerance from `host` once, up front.
    ///
    /// The stroke color always comes from the `colorPaint` resource.
    pub fn new(host: H, config: &PaintConfig) -> PaintResult<Self> {
        let background = host
            .resolve_color(COLOR_BACKGROUND)
            .ok_or_else(|| PaintError::UnknownColor(COLOR_BACKGROUND.to_owned()))?;
        let paint = host
            .resolve_color(COLOR_PAINT)
            .ok_or_else(|| PaintError::UnknownColor(COLOR_PAINT.to_owned()))?;

        let style = config.stroke.clone().with_color(paint);
        style.validate()?;

        let tolerance = host.touch_tolerance();
        info!("Paint view created, touch tolerance {tolerance}px");

        Ok(Self {
            accumulator: StrokeAccumulator::new(tolerance),
            surface: CanvasSurface::new(style, background, config.frame_inset),
            host,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn accumulator(&self) -> &StrokeAccumulator {
        &self.accumulator
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    /// Called when the visible area changes. Clears everything drawn so far.
    ///
    /// Returns `Ok(false)` when the new size has a zero dimension; the old
    /// image is kept in that case.
    pub fn on_size_changed(
        &mut self,
        width: u32,
        height: u32,
        old_width: u32,
        old_height: u32,
    ) -> PaintResult<bool> {
        debug!("Size changed from {old_width}x{old_height} to {width}x{height}");
        let resized = self.surface.resize(width, height)?;
        if resized {
            self.host.request_repaint();
        }
        Ok(resized)
    }

    pub fn on_draw(&self, target: &mut Pixmap) {
        self.surface.render(target);
    }

    pub fn on_pointer_event(&mut self, sample: PointerSample) -> StrokeUpdate {
        let update = self.accumulator.handle(sample);
        if update == StrokeUpdate::Committed
            && self.surface.commit_segment(self.accumulator.path())
        {
            self.host.request_repaint();
        }
        update
    }
}
