use std::fmt::Write as _;

use egui::{Color32, Pos2, Rect, Vec2};

use crate::cursor::CursorIndicator;
use crate::error::ExportResult;
use crate::export::{self, DEFAULT_EXPORT_FILE_NAME, ExportOutcome, ExportTarget, ExportTask, SurfaceSnapshot};
use crate::palette::to_hex_string;
use crate::panels::toolbar::{ActionHandler, ToolbarAction};
use crate::state::{DisplayMode, SurfaceState, ToolState};
use crate::stroke::Stroke;

/// What the drawing engine needs from the surface it paints on
pub trait Surface {
    fn tool_state(&self) -> ToolState;

    fn mode(&self) -> DisplayMode;

    fn background_color(&self) -> Color32 {
        self.mode().background()
    }

    fn update_cursor_position(&mut self, position: Pos2, now: f64);

    fn add_stroke(&mut self, stroke: Stroke);
}

/// The full-viewport drawing surface: strokes, mode, tool and cursor
#[derive(Debug)]
pub struct CanvasSurface {
    state: SurfaceState,
    root_class: &'static str,
    strokes: Vec<Stroke>,
    size: Vec2,
    cursor: CursorIndicator,
    export_file_name: String,
    export_target: ExportTarget,
    pending_exports: Vec<ExportTask>,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new(DisplayMode::default(), ExportTarget::Memory)
    }
}

impl CanvasSurface {
    pub fn new(mode: DisplayMode, export_target: ExportTarget) -> Self {
        let mut surface = Self {
            state: SurfaceState::new(mode),
            root_class: "",
            strokes: Vec::new(),
            size: Vec2::ZERO,
            cursor: CursorIndicator::new(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_owned(),
            export_target,
            pending_exports: Vec::new(),
        };
        surface.apply_mode();
        surface
    }

    pub fn with_export_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.export_file_name = file_name.into();
        self
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Class currently applied to the root container, always the mode's
    pub fn root_class(&self) -> &'static str {
        self.root_class
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn last_stroke(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn cursor(&self) -> &CursorIndicator {
        &self.cursor
    }

    /// Pixel size of the surface
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn pixel_size(&self) -> [u32; 2] {
        [self.size.x.round().max(0.0) as u32, self.size.y.round().max(0.0) as u32]
    }

    /// Single dispatch point for toolbar actions, keyed by exact label.
    /// Unknown labels are ignored.
    pub fn dispatch_action(&mut self, label: &str) {
        let Some(action) = ToolbarAction::from_label(label) else {
            log::trace!("Ignoring unrecognized toolbar action {:?}", label);
            return;
        };
        log::debug!("Toolbar action: {}", action.label());

        match action {
            ToolbarAction::Mode => {
                self.state.mode = self.state.mode.toggled();
                self.apply_mode();
            }
            ToolbarAction::SaveAsPng => {
                let task = self.export_png();
                self.pending_exports.push(task);
            }
            ToolbarAction::Brush => self.state.tool = ToolState::brush(),
            ToolbarAction::Rubber => self.state.tool = ToolState::rubber(),
            ToolbarAction::ClearAll => self.clear(),
        }
    }

    fn apply_mode(&mut self) {
        self.root_class = self.state.mode.class_name();
    }

    /// Removes every stroke
    pub fn clear(&mut self) {
        log::info!("Clearing {} strokes", self.strokes.len());
        self.strokes.clear();
    }

    /// Starts rendering the current scene to PNG. The returned task
    /// completes with the encoded image or the reason it failed.
    pub fn export_png(&self) -> ExportTask {
        let [width, height] = self.pixel_size();
        let snapshot = SurfaceSnapshot {
            width,
            height,
            background: self.background_color(),
            strokes: self.strokes.clone(),
        };
        log::info!("Exporting {}x{} surface as {}", width, height, self.export_file_name);
        export::spawn_export(snapshot, self.export_file_name.clone(), self.export_target.clone())
    }

    /// Drains exports that have finished since the last call
    pub fn poll_exports(&mut self) -> Vec<ExportResult<ExportOutcome>> {
        let mut finished = Vec::new();
        self.pending_exports.retain_mut(|task| match task.try_take() {
            Some(result) => {
                finished.push(result);
                false
            }
            None => true,
        });
        finished
    }

    pub fn has_pending_exports(&self) -> bool {
        !self.pending_exports.is_empty()
    }

    /// Takes ownership of the pending exports, e.g. to await them
    pub fn take_pending_exports(&mut self) -> Vec<ExportTask> {
        std::mem::take(&mut self.pending_exports)
    }

    /// Recomputes the surface size from the container bounds
    pub fn handle_viewport_resize(&mut self, bounds: Rect) {
        let size = bounds.size().max(Vec2::ZERO);
        if size != self.size {
            log::debug!("Surface resized to {}x{}", size.x, size.y);
        }
        self.size = size;
    }

    /// Any stroke outline still animating at `now`
    pub fn has_active_reveals(&self, now: f64) -> bool {
        self.strokes.iter().any(|stroke| !stroke.reveal().is_finished(now))
    }

    /// Serializes the scene as an SVG document, one path per stroke
    pub fn to_svg(&self) -> String {
        let [width, height] = self.pixel_size();
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" width="{}" height="{}">"#,
            self.root_class, width, height
        );
        for stroke in &self.strokes {
            let Some(data) = stroke.svg_path_data() else {
                continue;
            };
            let origin = stroke.origin();
            let _ = write!(
                svg,
                r#"<path transform="translate({},{})" d="{}" fill="{}" stroke="none"></path>"#,
                origin.x,
                origin.y,
                data,
                to_hex_string(stroke.fill())
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

impl Surface for CanvasSurface {
    fn tool_state(&self) -> ToolState {
        self.state.tool
    }

    fn mode(&self) -> DisplayMode {
        self.state.mode
    }

    fn update_cursor_position(&mut self, position: Pos2, now: f64) {
        self.cursor.move_to(position, self.state.tool, now);
    }

    fn add_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }
}

impl ActionHandler for CanvasSurface {
    fn handle_action(&mut self, label: &str) {
        self.dispatch_action(label);
    }
}
