use egui::{Color32, Pos2};
use image::RgbaImage;
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

use crate::stroke::Stroke;

fn to_skia(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

/// New pixmap filled with `background`. `None` when either side is zero or
/// the size cannot be allocated.
pub fn blank_canvas(width: u32, height: u32, background: Color32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.fill(to_skia(background));
    Some(pixmap)
}

/// Paints `strokes` in order, later strokes on top
pub fn paint_strokes(pixmap: &mut Pixmap, strokes: &[Stroke]) {
    for stroke in strokes {
        fill_outline(pixmap, &stroke.outline(), stroke.fill());
    }
}

/// Closed path through `vertices`, `None` for fewer than three points
pub fn outline_path(vertices: &[Pos2]) -> Option<Path> {
    let (first, rest) = vertices.split_first()?;
    if rest.len() < 2 {
        return None;
    }
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in rest {
        builder.line_to(point.x, point.y);
    }
    builder.close();
    builder.finish()
}

/// Fills the closed outline with the nonzero winding rule
pub fn fill_outline(pixmap: &mut Pixmap, vertices: &[Pos2], color: Color32) {
    if color.a() == 0 {
        return;
    }
    let Some(path) = outline_path(vertices) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}

/// Straight-alpha copy of the pixmap for encoding
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        dst.0 = [color.red(), color.green(), color.blue(), color.alpha()];
    }
    image
}
