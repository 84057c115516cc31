#![warn(clippy::all, rust_2018_idioms)]

use minipaint::{MiniPaintApp, PaintConfig};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("MiniPaint")
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([200.0, 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MiniPaint",
        native_options,
        Box::new(|cc| Ok(Box::new(MiniPaintApp::new(cc, PaintConfig::default())?))),
    )
}
