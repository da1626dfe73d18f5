use std::path::Path;

use egui::{ColorImage, Context, Pos2, TextureHandle, TextureOptions};

use crate::state::ToolState;

/// Edge length of the cursor image, in points
pub const CURSOR_SIZE: f32 = 30.0;

/// Duration of the fade-in when the cursor first appears
pub const CURSOR_FADE_SECS: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorImage {
    #[default]
    Brush,
    Eraser,
}

impl CursorImage {
    pub fn for_tool(tool: ToolState) -> Self {
        if tool.using_rubber() { Self::Eraser } else { Self::Brush }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Brush => "brush.png",
            Self::Eraser => "rubber-icon.png",
        }
    }

    /// PNG shipped inside the binary
    pub fn bundled_bytes(self) -> &'static [u8] {
        match self {
            Self::Brush => BUNDLED_BRUSH,
            Self::Eraser => BUNDLED_ERASER,
        }
    }
}

/// The floating pointer overlay. One per surface, moved rather than recreated.
#[derive(Debug, Clone, Default)]
pub struct CursorIndicator {
    position: Option<Pos2>,
    image: CursorImage,
    shown_at: Option<f64>,
}

impl CursorIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, position: Pos2, tool: ToolState, now: f64) {
        self.position = Some(position);
        self.image = CursorImage::for_tool(tool);
        if self.shown_at.is_none() {
            self.shown_at = Some(now);
        }
    }

    pub fn position(&self) -> Option<Pos2> {
        self.position
    }

    pub fn image(&self) -> CursorImage {
        self.image
    }

    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }

    /// Fade-in progress since the cursor first appeared
    pub fn opacity(&self, now: f64) -> f32 {
        match self.shown_at {
            Some(shown_at) => ((now - shown_at) as f32 / CURSOR_FADE_SECS).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}

const BUNDLED_BRUSH: &[u8] = include_bytes!("../assets/images/brush.png");
const BUNDLED_ERASER: &[u8] = include_bytes!("../assets/images/rubber-icon.png");

/// Cursor textures. A missing or unreadable file leaves its slot empty and
/// the cursor draws blank.
#[derive(Default)]
pub struct CursorIcons {
    brush: Option<TextureHandle>,
    eraser: Option<TextureHandle>,
}

impl CursorIcons {
    /// Reads the icons from `asset_dir`
    pub fn load(ctx: &Context, asset_dir: &Path) -> Self {
        Self {
            brush: load_icon_file(ctx, asset_dir, CursorImage::Brush),
            eraser: load_icon_file(ctx, asset_dir, CursorImage::Eraser),
        }
    }

    /// The icons compiled into the binary, for targets without a filesystem
    pub fn bundled(ctx: &Context) -> Self {
        Self {
            brush: load_icon(ctx, CursorImage::Brush, CursorImage::Brush.bundled_bytes(), "bundled"),
            eraser: load_icon(ctx, CursorImage::Eraser, CursorImage::Eraser.bundled_bytes(), "bundled"),
        }
    }

    pub fn texture(&self, image: CursorImage) -> Option<&TextureHandle> {
        match image {
            CursorImage::Brush => self.brush.as_ref(),
            CursorImage::Eraser => self.eraser.as_ref(),
        }
    }
}

impl std::fmt::Debug for CursorIcons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorIcons")
            .field("brush", &self.brush.is_some())
            .field("eraser", &self.eraser.is_some())
            .finish()
    }
}

fn load_icon_file(ctx: &Context, asset_dir: &Path, icon: CursorImage) -> Option<TextureHandle> {
    let path = asset_dir.join(icon.file_name());
    match std::fs::read(&path) {
        Ok(bytes) => load_icon(ctx, icon, &bytes, &path.display().to_string()),
        Err(err) => {
            log::warn!("Cursor icon {} unavailable: {}", path.display(), err);
            None
        }
    }
}

fn load_icon(ctx: &Context, icon: CursorImage, bytes: &[u8], source: &str) -> Option<TextureHandle> {
    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded.to_rgba8(),
        Err(err) => {
            log::warn!("Failed to decode cursor icon {} ({}): {}", icon.file_name(), source, err);
            return None;
        }
    };
    let size = [decoded.width() as usize, decoded.height() as usize];
    let color_image = ColorImage::from_rgba_unmultiplied(size, decoded.as_raw());
    log::debug!("Loaded cursor icon {} from {} ({}x{})", icon.file_name(), source, size[0], size[1]);
    Some(ctx.load_texture(icon.file_name(), color_image, TextureOptions::LINEAR))
}
