#![warn(clippy::all, rust_2018_idioms)]

pub mod animation;
pub mod app;
pub mod components;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod export;
pub mod palette;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod state;
pub mod stroke;
pub mod surface;

pub use app::SplashApp;
pub use config::SplashConfig;
pub use engine::DrawingEngine;
pub use error::{ConfigError, ExportError};
pub use export::{ExportOutcome, ExportTarget, ExportTask};
pub use palette::Palette;
pub use panels::toolbar::{ActionHandler, Toolbar, ToolbarAction};
pub use renderer::Renderer;
pub use state::{DisplayMode, Tool, ToolState};
pub use stroke::{PolarPoint, Stroke};
pub use surface::{CanvasSurface, Surface};
