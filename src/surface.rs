use egui::Color32;
use log::{debug, info, warn};
use tiny_skia::{BlendMode, IntSize, Pixmap, PixmapPaint, Transform};

use crate::error::{PaintError, PaintResult};
use crate::stroke::StrokePath;
use crate::style::{StrokeStyle, to_skia_color};

/// Rectangle drawn as a border inside the canvas, in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl FrameRect {
    /// Insets `width` x `height` by `inset` on every side.
    ///
    /// The inset is clamped to half of each dimension, so the result can
    /// collapse to a line but never turns inside out.
    pub fn inset(width: u32, height: u32, inset: f32) -> Self {
        let (width, height) = (width as f32, height as f32);
        let inset = inset.max(0.0);
        let dx = inset.min(width / 2.0);
        let dy = inset.min(height / 2.0);
        Self {
            left: dx,
            top: dy,
            right: width - dx,
            bottom: height - dy,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    fn to_skia_rect(self) -> Option<tiny_skia::Rect> {
        if self.is_degenerate() {
            return None;
        }
        tiny_skia::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}

/// The cached drawing plus the frame around it.
///
/// Strokes are rasterized once into the backing image as they are committed.
/// Repaints only copy that image and draw the frame, so their cost does not
/// depend on how much has been drawn.
pub struct CanvasSurface {
    backing: Option<Pixmap>,
    frame: Option<FrameRect>,
    style: StrokeStyle,
    background: Color32,
    inset: f32,
}

impl std::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("size", &self.size())
            .field("frame", &self.frame)
            .field("style", &self.style)
            .field("background", &self.background)
            .field("inset", &self.inset)
            .finish()
    }
}

impl CanvasSurface {
    pub fn new(style: StrokeStyle, background: Color32, inset: f32) -> Self {
        Self {
            backing: None,
            frame: None,
            style,
            background,
            inset,
        }
    }

    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Width and height of the backing image, if one has been allocated
    pub fn size(&self) -> Option<(u32, u32)> {
        self.backing.as_ref().map(|p| (p.width(), p.height()))
    }

    pub fn frame_rect(&self) -> Option<FrameRect> {
        self.frame
    }

    pub fn backing_image(&self) -> Option<&Pixmap> {
        self.backing.as_ref()
    }

    /// Replaces the backing image with a blank one of the given size.
    ///
    /// Returns `Ok(false)` without touching anything when either dimension is
    /// zero. On allocation failure the current image and frame are kept.
    pub fn resize(&mut self, width: u32, height: u32) -> PaintResult<bool> {
        if width == 0 || height == 0 {
            debug!("Ignoring resize to {width}x{height}");
            return Ok(false);
        }

        let mut pixmap = allocate_pixmap(width, height).inspect_err(|_| {
            warn!("Could not allocate a {width}x{height} backing image");
        })?;
        pixmap.fill(to_skia_color(self.background));

        // Dropping the old pixmap here releases its buffer.
        self.backing = Some(pixmap);
        self.frame = Some(FrameRect::inset(width, height, self.inset));
        info!("Canvas resized to {width}x{height}");
        Ok(true)
    }

    /// Strokes `path` into the backing image. Returns whether anything was drawn.
    pub fn commit_segment(&mut self, path: &StrokePath) -> bool {
        let Some(backing) = self.backing.as_mut() else {
            debug!("Dropping segment, canvas has no backing image yet");
            return false;
        };
        let Some(skia_path) = path.to_skia_path() else {
            return false;
        };

        backing.stroke_path(
            &skia_path,
            &self.style.to_paint(),
            &self.style.to_stroke(),
            Transform::identity(),
            None,
        );
        true
    }

    /// Composites the backing image and the frame onto `target` at the origin
    pub fn render(&self, target: &mut Pixmap) {
        let Some(backing) = self.backing.as_ref() else {
            return;
        };

        target.draw_pixmap(
            0,
            0,
            backing.as_ref(),
            &PixmapPaint {
                blend_mode: BlendMode::Source,
                ..PixmapPaint::default()
            },
            Transform::identity(),
            None,
        );

        if let Some(rect) = self.frame.and_then(FrameRect::to_skia_rect) {
            let frame = tiny_skia::PathBuilder::from_rect(rect);
            target.stroke_path(
                &frame,
                &self.style.to_paint(),
                &self.style.to_stroke(),
                Transform::identity(),
                None,
            );
        }
    }

    /// Renders into a fresh target the size of the backing image
    pub fn render_to_new(&self) -> PaintResult<Option<Pixmap>> {
        let Some((width, height)) = self.size() else {
            return Ok(None);
        };
        let mut target = allocate_pixmap(width, height)?;
        self.render(&mut target);
        Ok(Some(target))
    }
}

/// Allocates a transparent pixmap, reporting out-of-memory instead of aborting
fn allocate_pixmap(width: u32, height: u32) -> PaintResult<Pixmap> {
    let error = PaintError::Allocation { width, height };

    // tiny-skia needs each row's byte length to fit in an i32.
    let row_bytes = i32::try_from(width).ok().and_then(|w| w.checked_mul(4));
    let (Some(size), Some(row_bytes)) = (IntSize::from_wh(width, height), row_bytes) else {
        return Err(error);
    };
    let Some(len) = (row_bytes as usize).checked_mul(height as usize) else {
        return Err(error);
    };

    let mut data = Vec::new();
    if data.try_reserve_exact(len).is_err() {
        return Err(error);
    }
    data.resize(len, 0);
    Pixmap::from_vec(data, size).ok_or(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rect_reference_inset() {
        let frame = FrameRect::inset(100, 100, 40.0);
        assert_eq!(
            frame,
            FrameRect {
                left: 40.0,
                top: 40.0,
                right: 60.0,
                bottom: 60.0
            }
        );
        assert!(!frame.is_degenerate());
    }

    #[test]
    fn test_frame_rect_never_inverts() {
        let frame = FrameRect::inset(50, 30, 40.0);
        assert_eq!(frame.left, 25.0);
        assert_eq!(frame.right, 25.0);
        assert_eq!(frame.top, 15.0);
        assert_eq!(frame.bottom, 15.0);
        assert!(frame.is_degenerate());
        assert!(frame.to_skia_rect().is_none());
    }

    #[test]
    fn test_frame_rect_partial_clamp() {
        let frame = FrameRect::inset(200, 60, 40.0);
        assert_eq!((frame.left, frame.right), (40.0, 160.0));
        assert_eq!((frame.top, frame.bottom), (30.0, 30.0));
        assert!(frame.is_degenerate());
    }

    #[test]
    fn test_allocate_pixmap_reports_exhaustion() {
        // Fits tiny-skia's size limits but not any address space
        let result = allocate_pixmap(1 << 28, 1 << 30);
        assert!(matches!(
            result,
            Err(PaintError::Allocation {
                width: 268_435_456,
                height: 1_073_741_824
            })
        ));
    }

    #[test]
    fn test_allocate_pixmap_is_transparent() {
        let pixmap = allocate_pixmap(3, 2).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (3, 2));
        assert!(pixmap.data().iter().all(|&b| b == 0));
        assert!(allocate_pixmap(0, 2).is_err());
    }

    #[test]
    fn test_commit_before_resize_is_noop() {
        let mut surface = CanvasSurface::new(StrokeStyle::default(), Color32::WHITE, 40.0);
        let mut path = StrokePath::new();
        path.move_to(egui::pos2(0.0, 0.0));
        path.quad_to(egui::pos2(0.0, 0.0), egui::pos2(10.0, 10.0));
        assert!(!surface.commit_segment(&path));
        assert!(surface.render_to_new().unwrap().is_none());
    }
}
