#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod palette;
pub mod stroke;
pub mod style;
pub mod surface;
pub mod view;

pub use app::MiniPaintApp;
pub use config::PaintConfig;
pub use error::{PaintError, PaintResult};
pub use host::{EguiHost, ViewHost};
pub use input::{InputHandler, PointerPhase, PointerSample};
pub use palette::Palette;
pub use stroke::{PathCommand, StrokeAccumulator, StrokePath, StrokeState, StrokeUpdate};
pub use style::{LineCap, LineJoin, StrokeStyle};
pub use surface::{CanvasSurface, FrameRect};
pub use view::PaintView;
