// src/renderer.rs
use eframe::egui::{self, Color32, Mesh, Painter, Pos2, Rect, Shape, Vec2};
use lyon::math::point;
use lyon::path::Path as LyonPath;
use lyon::tessellation::{BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, VertexBuffers};

use crate::cursor::{CURSOR_SIZE, CursorIcons, CursorIndicator};
use crate::stroke::{self, Stroke};
use crate::surface::CanvasSurface;

/// Paints the surface into an egui painter
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Outline drawn by the reveal animation; `None` keeps outlines invisible
    outline: Option<egui::Stroke>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Renderer {
    pub fn new(outline: Option<egui::Stroke>) -> Self {
        Self { outline }
    }

    pub fn outline(&self) -> Option<egui::Stroke> {
        self.outline
    }

    /// Whether frames are still needed to finish outline animations
    pub fn needs_animation_frames(&self, surface: &CanvasSurface, now: f64) -> bool {
        self.outline.is_some() && surface.has_active_reveals(now)
    }

    /// Renders the background and every stroke, offset to `rect`
    ///
    /// Args:
    ///     painter (Painter): The painter to draw with
    ///     rect (Rect): Screen rectangle of the surface
    ///     surface (CanvasSurface): The scene to draw
    ///     now (f64): Frame time driving the reveal animations
    pub fn paint_surface(&self, painter: &Painter, rect: Rect, surface: &CanvasSurface, now: f64) {
        painter.rect_filled(rect, 0.0, surface.state().mode.background());

        let offset = rect.min.to_vec2();
        for stroke in surface.strokes() {
            if let Some(mesh) = stroke_mesh(stroke, offset) {
                painter.add(Shape::mesh(mesh));
            }
            if let Some(outline) = self.outline {
                self.paint_reveal(painter, stroke, offset, outline, now);
            }
        }
    }

    fn paint_reveal(&self, painter: &Painter, stroke: &Stroke, offset: Vec2, outline: egui::Stroke, now: f64) {
        let total = stroke.total_length();
        if total <= 0.0 {
            return;
        }
        let shown = total - stroke.reveal().dash_offset(total, now);
        let points: Vec<Pos2> = stroke.outline().into_iter().map(|p| p + offset).collect();
        let revealed = stroke::revealed_polyline(&points, shown);
        if revealed.len() >= 2 {
            painter.add(Shape::line(revealed, outline));
        }
    }

    /// Draws the cursor image at its position, fading in on first appearance.
    /// Draws nothing when the icon texture is missing.
    pub fn paint_cursor(&self, painter: &Painter, rect: Rect, cursor: &CursorIndicator, icons: &CursorIcons, now: f64) {
        let Some(position) = cursor.position() else {
            return;
        };
        let opacity = cursor.opacity(now);
        let Some(texture) = icons.texture(cursor.image()) else {
            return;
        };
        let icon_rect = Rect::from_min_size(rect.min + position.to_vec2(), Vec2::splat(CURSOR_SIZE));
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        painter.image(texture.id(), icon_rect, uv, Color32::WHITE.gamma_multiply(opacity));
    }
}

/// Fill mesh of the stroke outline, tessellated with the nonzero winding
/// rule so overlapping turns of the spiral match the exported image
fn stroke_mesh(stroke: &Stroke, offset: Vec2) -> Option<Mesh> {
    let fill = stroke.fill();
    if fill.a() == 0 || stroke.shape().len() < 2 {
        return None;
    }
    let outline = stroke.outline();
    let (first, rest) = outline.split_first()?;

    let mut builder = LyonPath::builder();
    builder.begin(point(first.x + offset.x, first.y + offset.y));
    for p in rest {
        builder.line_to(point(p.x + offset.x, p.y + offset.y));
    }
    builder.end(true);
    let path = builder.build();

    let mut buffers: VertexBuffers<Pos2, u32> = VertexBuffers::new();
    let options = FillOptions::default().with_fill_rule(FillRule::NonZero);
    let result = FillTessellator::new().tessellate_path(
        &path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
            let p = vertex.position();
            Pos2::new(p.x, p.y)
        }),
    );
    if let Err(err) = result {
        log::warn!("Failed to tessellate stroke {}: {:?}", stroke.id(), err);
        return None;
    }
    if buffers.indices.is_empty() {
        return None;
    }

    let mut mesh = Mesh::default();
    for pos in buffers.vertices {
        mesh.colored_vertex(pos, fill);
    }
    mesh.indices = buffers.indices;
    Some(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::RevealTiming;
    use crate::raster;
    use crate::stroke::PolarPoint;
    use crate::surface::Surface;

    fn test_painter(ctx: &egui::Context) -> (Painter, Rect) {
        let layer_id = egui::LayerId::background();
        let rect = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        (Painter::new(ctx.clone(), layer_id, rect), rect)
    }

    fn covers(mesh: &Mesh, p: Pos2) -> bool {
        mesh.indices.chunks_exact(3).any(|tri| {
            let [a, b, c] = [0, 1, 2].map(|k| mesh.vertices[tri[k] as usize].pos);
            let side = |u: Pos2, v: Pos2| (v - u).x * (p - u).y - (v - u).y * (p - u).x;
            let (d1, d2, d3) = (side(a, b), side(b, c), side(c, a));
            let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            !(has_neg && has_pos)
        })
    }

    #[test]
    fn test_stroke_mesh_is_offset() {
        let shape = vec![
            PolarPoint::new(0.0, 5.0),
            PolarPoint::new(0.5, 8.0),
            PolarPoint::new(1.0, 11.0),
        ];
        let stroke = Stroke::new(Pos2::new(10.0, 10.0), shape, Color32::RED, 0.0, RevealTiming::default());
        let mesh = stroke_mesh(&stroke, Vec2::new(0.0, 67.0)).unwrap();

        assert_eq!(mesh.indices.len() % 3, 0);
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertices.len()));
        assert!(mesh.vertices.iter().all(|v| v.color == Color32::RED));
        assert!(mesh.vertices.iter().any(|v| v.pos.distance(Pos2::new(10.0, 77.0)) < 1e-3));
        // Inside the first wedge, just past the origin
        assert!(covers(&mesh, Pos2::new(11.0, 72.0)));
    }

    #[test]
    fn test_overlapping_turns_match_export() {
        // The third point folds back inside the wedge of the first two; the
        // overlap has winding 0 and stays unpainted on screen and in the PNG
        let shape = vec![
            PolarPoint::new(0.0, 40.0),
            PolarPoint::new(1.2, 40.0),
            PolarPoint::new(0.6, 40.0),
        ];
        let stroke = Stroke::new(Pos2::new(50.0, 60.0), shape, Color32::RED, 0.0, RevealTiming::default());
        let mesh = stroke_mesh(&stroke, Vec2::ZERO).unwrap();

        let mut pixmap = raster::blank_canvas(120, 120, Color32::BLACK).unwrap();
        raster::paint_strokes(&mut pixmap, std::slice::from_ref(&stroke));
        let exported = raster::to_rgba_image(&pixmap);

        assert_eq!(exported.get_pixel(69, 44).0, [0, 0, 0, 255]);
        assert!(!covers(&mesh, Pos2::new(69.5, 44.5)));

        let mut painted = 0;
        for y in 1..119 {
            for x in 1..119 {
                let pixel = exported.get_pixel(x, y).0;
                let neighbours = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)];
                if neighbours.iter().any(|&(nx, ny)| exported.get_pixel(nx, ny).0 != pixel) {
                    continue; // edge
                }
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                match pixel {
                    [255, 0, 0, 255] => {
                        painted += 1;
                        assert!(covers(&mesh, center), "({x}, {y}) painted only in the PNG");
                    }
                    [0, 0, 0, 255] => assert!(!covers(&mesh, center), "({x}, {y}) painted only on screen"),
                    _ => {}
                }
            }
        }
        assert!(painted > 100);
    }

    #[test]
    fn test_degenerate_stroke_has_no_mesh() {
        let single = Stroke::new(Pos2::ZERO, vec![PolarPoint::new(0.0, 3.0)], Color32::RED, 0.0, RevealTiming::default());
        assert!(stroke_mesh(&single, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_render_basics() {
        let ctx = egui::Context::default();
        let (painter, rect) = test_painter(&ctx);
        let mut surface = CanvasSurface::default();
        surface.add_stroke(Stroke::new(
            Pos2::new(50.0, 50.0),
            vec![PolarPoint::new(0.0, 5.0), PolarPoint::new(1.0, 9.0)],
            Color32::BLUE,
            0.0,
            RevealTiming::default(),
        ));

        let renderer = Renderer::new(Some(egui::Stroke::new(1.0, Color32::WHITE)));
        renderer.paint_surface(&painter, rect, &surface, 0.3);
        renderer.paint_cursor(&painter, rect, surface.cursor(), &CursorIcons::default(), 0.3);
    }

    #[test]
    fn test_animation_frames_only_with_outline() {
        let mut surface = CanvasSurface::default();
        surface.add_stroke(Stroke::new(Pos2::ZERO, Vec::new(), Color32::RED, 1.0, RevealTiming::default()));

        assert!(!Renderer::default().needs_animation_frames(&surface, 1.2));
        let outlined = Renderer::new(Some(egui::Stroke::new(1.0, Color32::WHITE)));
        assert!(outlined.needs_animation_frames(&surface, 1.2));
        assert!(!outlined.needs_animation_frames(&surface, 5.0));
    }
}
