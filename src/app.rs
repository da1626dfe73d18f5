use crate::config::SplashConfig;
use crate::cursor::CursorIcons;
use crate::engine::DrawingEngine;
use crate::export::ExportTarget;
use crate::palette::Palette;
use crate::panels::toolbar::Toolbar;
use crate::renderer::Renderer;
use crate::state::DisplayMode;
use crate::surface::{CanvasSurface, Surface};

/// Top-level app: owns the toolbar, the surface and the drawing engine and
/// routes each frame's input between them.
pub struct SplashApp {
    toolbar: Toolbar,
    surface: CanvasSurface,
    engine: DrawingEngine,
    renderer: Renderer,
    cursor_icons: CursorIcons,
    applied_mode: Option<DisplayMode>,
}

impl SplashApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: SplashConfig) -> Self {
        // No filesystem on the web
        let cursor_icons = if cfg!(target_arch = "wasm32") {
            CursorIcons::bundled(&cc.egui_ctx)
        } else {
            CursorIcons::load(&cc.egui_ctx, &config.asset_path)
        };
        Self::from_config(config, cursor_icons)
    }

    /// Builds the app without a window, with the given cursor textures
    pub fn from_config(config: SplashConfig, cursor_icons: CursorIcons) -> Self {
        let palette = config.palette().unwrap_or_else(|err| {
            log::warn!("Falling back to the default palette: {}", err);
            Palette::default()
        });
        let outline = config.outline_color().unwrap_or_else(|err| {
            log::warn!("Ignoring outline color: {}", err);
            None
        });

        let surface = CanvasSurface::new(config.initial_mode, export_target(&config))
            .with_export_file_name(config.export.file_name.clone());

        Self {
            toolbar: Toolbar::new(&config.toolbar),
            surface,
            engine: DrawingEngine::new(palette, config.reveal),
            renderer: Renderer::new(outline.map(|color| egui::Stroke::new(1.0, color))),
            cursor_icons,
            applied_mode: None,
        }
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn engine(&self) -> &DrawingEngine {
        &self.engine
    }

    fn apply_mode(&mut self, ctx: &egui::Context) {
        let mode = self.surface.mode();
        if self.applied_mode != Some(mode) {
            log::debug!("Applying {} mode", mode.class_name());
            ctx.set_visuals(mode.visuals());
            self.applied_mode = Some(mode);
        }
    }

    fn report_exports(&mut self, ctx: &egui::Context) {
        for result in self.surface.poll_exports() {
            match result {
                Ok(outcome) => match &outcome.saved_to {
                    Some(path) => log::info!("Saved {}x{} image to {}", outcome.width, outcome.height, path.display()),
                    None => log::info!("Exported {} ({}x{})", outcome.file_name, outcome.width, outcome.height),
                },
                Err(err) => log::error!("PNG export failed: {}", err),
            }
        }
        if self.surface.has_pending_exports() {
            ctx.request_repaint();
        }
    }
}

fn export_target(config: &SplashConfig) -> ExportTarget {
    if cfg!(target_arch = "wasm32") {
        ExportTarget::Browser
    } else {
        ExportTarget::Directory(config.export.download_dir.clone())
    }
}

impl eframe::App for SplashApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        let selected = self.surface.tool_state().active();
        self.toolbar.show(ctx, selected, &mut self.surface);
        self.apply_mode(ctx);
        self.report_exports(ctx);

        let background = self.surface.background_color();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(background))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                if rect.size() != self.surface.size() {
                    self.surface.handle_viewport_resize(rect);
                }

                let response = ui.allocate_rect(rect, egui::Sense::click());
                if response.clicked() {
                    self.engine.toggle_drawing();
                }
                if response.hovered() {
                    ctx.set_cursor_icon(egui::CursorIcon::None);
                }

                // One stroke per pointer event, as the events arrived
                let moves: Vec<egui::Pos2> = ctx.input(|i| {
                    i.events
                        .iter()
                        .filter_map(|event| match event {
                            egui::Event::PointerMoved(pos) => Some(*pos),
                            _ => None,
                        })
                        .collect()
                });
                for pos in moves.into_iter().filter(|pos| rect.contains(*pos)) {
                    let local = (pos - rect.min).to_pos2();
                    self.engine.on_pointer_move(&mut self.surface, Some(local), now);
                }

                let painter = ui.painter_at(rect);
                self.renderer.paint_surface(&painter, rect, &self.surface, now);
                self.renderer
                    .paint_cursor(&painter, rect, self.surface.cursor(), &self.cursor_icons, now);
            });

        let cursor = self.surface.cursor();
        let cursor_fading = cursor.is_visible() && cursor.opacity(now) < 1.0;
        if cursor_fading || self.renderer.needs_animation_frames(&self.surface, now) {
            ctx.request_repaint();
        }
    }
}
