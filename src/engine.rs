use egui::{Color32, Pos2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::animation::RevealTiming;
use crate::palette::Palette;
use crate::stroke::{self, Stroke};
use crate::surface::Surface;

/// Turns pointer movement into spiral strokes while drawing is enabled
#[derive(Debug, Clone)]
pub struct DrawingEngine {
    drawing_enabled: bool,
    rng: StdRng,
    palette: Palette,
    reveal: RevealTiming,
}

impl Default for DrawingEngine {
    fn default() -> Self {
        Self::new(Palette::default(), RevealTiming::default())
    }
}

impl DrawingEngine {
    pub fn new(palette: Palette, reveal: RevealTiming) -> Self {
        Self::with_rng(StdRng::seed_from_u64(rand::random()), palette, reveal)
    }

    pub fn with_rng(rng: StdRng, palette: Palette, reveal: RevealTiming) -> Self {
        Self {
            drawing_enabled: false,
            rng,
            palette,
            reveal,
        }
    }

    pub fn is_drawing_enabled(&self) -> bool {
        self.drawing_enabled
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Canvas click: flips between idle and drawing
    pub fn toggle_drawing(&mut self) {
        self.drawing_enabled = !self.drawing_enabled;
        log::debug!("Drawing {}", if self.drawing_enabled { "enabled" } else { "disabled" });
    }

    /// Handles one pointer movement over the surface. Moves the cursor and,
    /// when drawing is enabled, adds a stroke at `position` and returns its id.
    pub fn on_pointer_move<S: Surface>(&mut self, surface: &mut S, position: Option<Pos2>, now: f64) -> Option<Uuid> {
        let position = position.filter(|p| p.x.is_finite() && p.y.is_finite())?;

        surface.update_cursor_position(position, now);
        if !self.drawing_enabled {
            return None;
        }

        let shape = stroke::generate_spiral(&mut self.rng);
        let fill = self.fill_color(surface);
        let stroke = Stroke::new(position, shape, fill, now, self.reveal);
        let id = stroke.id();
        log::trace!("Stroke {} at {:?} with {} points", id, position, stroke.shape().len());
        surface.add_stroke(stroke);
        Some(id)
    }

    /// Eraser paints the background, brush draws from the palette
    fn fill_color<S: Surface>(&mut self, surface: &S) -> Color32 {
        if surface.tool_state().using_rubber() {
            surface.background_color()
        } else {
            self.palette.pick(&mut self.rng)
        }
    }
}
