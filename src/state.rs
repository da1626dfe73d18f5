use egui::Color32;
use serde::{Deserialize, Serialize};

/// Light/dark presentation of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Dark,
    Light,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Color painted behind the strokes, and used by the eraser
    pub fn background(self) -> Color32 {
        match self {
            Self::Dark => Color32::BLACK,
            Self::Light => Color32::WHITE,
        }
    }

    /// Class name applied to the root container
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Self::Dark => egui::Visuals::dark(),
            Self::Light => egui::Visuals::light(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
}

/// Active tool selection. Holding a single `Tool` keeps brush and
/// rubber mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolState {
    active: Tool,
}

impl ToolState {
    pub fn brush() -> Self {
        Self { active: Tool::Brush }
    }

    pub fn rubber() -> Self {
        Self { active: Tool::Eraser }
    }

    pub fn active(&self) -> Tool {
        self.active
    }

    pub fn using_brush(&self) -> bool {
        self.active == Tool::Brush
    }

    pub fn using_rubber(&self) -> bool {
        self.active == Tool::Eraser
    }
}

/// Mode and tool shared between the toolbar dispatcher and the drawing engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceState {
    pub mode: DisplayMode,
    pub tool: ToolState,
}

impl SurfaceState {
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            mode,
            tool: ToolState::brush(),
        }
    }
}
