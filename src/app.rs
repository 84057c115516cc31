use egui::{Color32, ColorImage, Rect, TextureHandle, TextureOptions, pos2};
use log::warn;
use tiny_skia::Pixmap;

use crate::config::PaintConfig;
use crate::error::PaintResult;
use crate::host::EguiHost;
use crate::input::InputHandler;
use crate::stroke::StrokeUpdate;
use crate::view::PaintView;

/// eframe application hosting a single paint view in its central panel
pub struct MiniPaintApp {
    view: PaintView<EguiHost>,
    input: InputHandler,
    /// Size of the canvas in physical pixels, as last reported to the view
    canvas_size: (u32, u32),
    /// Display surface the view composites into
    frame: Option<Pixmap>,
    texture: Option<TextureHandle>,
    frame_dirty: bool,
}

impl MiniPaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: PaintConfig) -> PaintResult<Self> {
        Self::with_context(cc.egui_ctx.clone(), config)
    }

    pub fn with_context(ctx: egui::Context, config: PaintConfig) -> PaintResult<Self> {
        let pixels_per_point = ctx.pixels_per_point();
        let host = EguiHost::new(ctx, config.palette.clone(), config.touch_slop);
        let view = PaintView::new(host, &config)?;

        Ok(Self {
            view,
            input: InputHandler::new(Rect::NOTHING, pixels_per_point),
            canvas_size: (0, 0),
            frame: None,
            texture: None,
            frame_dirty: true,
        })
    }

    fn sync_size(&mut self, rect: Rect, pixels_per_point: f32) {
        self.input.set_canvas_rect(rect, pixels_per_point);

        let width = (rect.width() * pixels_per_point).round().max(0.0) as u32;
        let height = (rect.height() * pixels_per_point).round().max(0.0) as u32;
        // A minimized or collapsed panel keeps the drawing for when it comes back.
        if width == 0 || height == 0 || (width, height) == self.canvas_size {
            return;
        }

        let (old_width, old_height) = self.canvas_size;
        match self.view.on_size_changed(width, height, old_width, old_height) {
            Ok(false) => {}
            Ok(true) => {
                self.canvas_size = (width, height);
                self.frame = Pixmap::new(width, height);
                self.frame_dirty = true;
            }
            Err(err) => warn!("Keeping previous canvas: {err}"),
        }
    }

    fn upload_frame(&mut self, ctx: &egui::Context) {
        let Some(frame) = self.frame.as_mut() else {
            return;
        };
        self.view.on_draw(frame);

        let size = [frame.width() as usize, frame.height() as usize];
        let image = ColorImage::from_rgba_premultiplied(size, frame.data());
        match self.texture.as_mut() {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                let texture = ctx.load_texture("minipaint_canvas", image, TextureOptions::NEAREST);
                self.texture = Some(texture);
            }
        }
        self.frame_dirty = false;
    }
}

impl eframe::App for MiniPaintApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::drag());
                let rect = response.rect;

                self.sync_size(rect, ctx.pixels_per_point());

                for sample in self.input.process_input(ctx) {
                    if self.view.on_pointer_event(sample) == StrokeUpdate::Committed {
                        self.frame_dirty = true;
                    }
                }

                if self.frame_dirty {
                    self.upload_frame(ctx);
                }

                if let Some(texture) = &self.texture {
                    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                    painter.image(texture.id(), rect, uv, Color32::WHITE);
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerSample;
    use egui::{Context, Vec2, vec2};

    fn create_app() -> (Context, MiniPaintApp) {
        let ctx = Context::default();
        let app = MiniPaintApp::with_context(ctx.clone(), PaintConfig::default()).unwrap();
        (ctx, app)
    }

    fn canvas_rect(size: Vec2) -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), size)
    }

    fn backing_data(app: &MiniPaintApp) -> Vec<u8> {
        app.view.surface().backing_image().unwrap().data().to_vec()
    }

    #[test]
    fn test_sync_size_resizes_view_and_frame() {
        let (_ctx, mut app) = create_app();
        app.sync_size(canvas_rect(vec2(100.0, 80.0)), 1.0);

        assert_eq!(app.canvas_size, (100, 80));
        assert_eq!(app.view.surface().size(), Some((100, 80)));
        let frame = app.frame.as_ref().unwrap();
        assert_eq!((frame.width(), frame.height()), (100, 80));
        assert!(app.frame_dirty);
    }

    #[test]
    fn test_sync_size_scales_to_pixels() {
        let (_ctx, mut app) = create_app();
        app.sync_size(canvas_rect(vec2(50.0, 40.0)), 2.0);
        assert_eq!(app.canvas_size, (100, 80));
    }

    #[test]
    fn test_drawing_survives_collapse_to_zero() {
        let (_ctx, mut app) = create_app();
        let rect = canvas_rect(vec2(100.0, 100.0));
        app.sync_size(rect, 1.0);
        app.view.on_pointer_event(PointerSample::down(10.0, 10.0));
        app.view.on_pointer_event(PointerSample::moved(60.0, 10.0));
        let drawn = backing_data(&app);

        app.sync_size(canvas_rect(Vec2::ZERO), 1.0);
        assert_eq!(app.canvas_size, (100, 100));
        assert!(app.frame.is_some());

        app.sync_size(canvas_rect(vec2(100.0, 0.0)), 1.0);
        app.sync_size(rect, 1.0);
        assert_eq!(backing_data(&app), drawn);
    }

    #[test]
    fn test_upload_frame_creates_then_reuses_texture() {
        let (ctx, mut app) = create_app();
        app.sync_size(canvas_rect(vec2(64.0, 64.0)), 1.0);

        app.upload_frame(&ctx);
        assert!(!app.frame_dirty);
        let id = app.texture.as_ref().unwrap().id();
        assert_eq!(app.texture.as_ref().unwrap().size(), [64, 64]);

        app.frame_dirty = true;
        app.upload_frame(&ctx);
        assert_eq!(app.texture.as_ref().unwrap().id(), id);
    }
}
