use std::fmt::Write as _;

use egui::{Color32, Pos2};
use rand::Rng;
use uuid::Uuid;

use crate::animation::{RevealTiming, StrokeReveal};

/// Upper bound (exclusive) on the number of points in one spiral
pub const MAX_SPIRAL_POINTS: usize = 100;

/// One point of a radial shape, relative to the stroke origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    /// Angle in radians, clockwise from twelve o'clock
    pub angle: f32,
    pub radius: f32,
}

impl PolarPoint {
    pub fn new(angle: f32, radius: f32) -> Self {
        Self { angle, radius }
    }

    /// Offset from the origin in screen space (y grows downwards)
    pub fn offset(&self) -> egui::Vec2 {
        egui::vec2(self.radius * self.angle.sin(), -self.radius * self.angle.cos())
    }
}

/// Random, irregular spiral: both angle and radius grow with the point index.
pub fn generate_spiral<R: Rng>(rng: &mut R) -> Vec<PolarPoint> {
    let len = (rng.random::<f32>() * MAX_SPIRAL_POINTS as f32) as usize;
    (0..len)
        .map(|i| {
            let i = i as f32;
            let angle = (rng.random::<f32>() / 4.0) * i;
            let radius = rng.random::<f32>() * i;
            PolarPoint::new(angle, radius)
        })
        .collect()
}

/// A filled radial area painted by one pointer movement
#[derive(Debug, Clone)]
pub struct Stroke {
    id: Uuid,
    origin: Pos2,
    shape: Vec<PolarPoint>,
    fill: Color32,
    reveal: StrokeReveal,
}

impl Stroke {
    pub fn new(origin: Pos2, shape: Vec<PolarPoint>, fill: Color32, created_at: f64, timing: RevealTiming) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            shape,
            fill,
            reveal: StrokeReveal::new(created_at, timing),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn shape(&self) -> &[PolarPoint] {
        &self.shape
    }

    pub fn fill(&self) -> Color32 {
        self.fill
    }

    pub fn reveal(&self) -> &StrokeReveal {
        &self.reveal
    }

    /// Closed outline in surface coordinates: the outer curve followed by
    /// the origin, where the zero inner radius collapses.
    pub fn outline(&self) -> Vec<Pos2> {
        if self.shape.is_empty() {
            return Vec::new();
        }
        let mut points: Vec<Pos2> = self.shape.iter().map(|p| self.origin + p.offset()).collect();
        points.push(self.origin);
        points
    }

    /// Perimeter of the closed outline
    pub fn total_length(&self) -> f32 {
        let outline = self.outline();
        if outline.len() < 2 {
            return 0.0;
        }
        let open: f32 = outline.windows(2).map(|w| w[0].distance(w[1])).sum();
        open + outline[outline.len() - 1].distance(outline[0])
    }

    /// SVG path data relative to the origin, `None` for an empty shape
    pub fn svg_path_data(&self) -> Option<String> {
        let (first, rest) = self.shape.split_first()?;
        let mut data = String::new();
        let start = first.offset();
        let _ = write!(data, "M{},{}", start.x, start.y);
        for point in rest {
            let offset = point.offset();
            let _ = write!(data, "L{},{}", offset.x, offset.y);
        }
        data.push_str("L0,0Z");
        Some(data)
    }
}

/// Leading part of the closed `outline` with the given arc length
pub fn revealed_polyline(outline: &[Pos2], length: f32) -> Vec<Pos2> {
    let mut revealed = Vec::new();
    let Some(&first) = outline.first() else {
        return revealed;
    };
    if length <= 0.0 {
        return revealed;
    }
    revealed.push(first);

    let closing = std::iter::once(first);
    let mut remaining = length;
    let mut previous = first;
    for point in outline.iter().copied().skip(1).chain(closing) {
        let segment = previous.distance(point);
        if segment >= remaining {
            let t = if segment > 0.0 { remaining / segment } else { 0.0 };
            revealed.push(previous.lerp(point, t));
            return revealed;
        }
        revealed.push(point);
        remaining -= segment;
        previous = point;
    }
    revealed
}
