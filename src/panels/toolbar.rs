use egui::{Color32, RichText};
use serde::{Deserialize, Serialize};

use crate::components::ToolbarButton;
use crate::state::Tool;

pub const TOOLBAR_HEIGHT: f32 = 67.0;
pub const USAGE_HINT: &str = "Note: Click and start dragging to draw, click again to stop drawing!";

/// Receives the label of every clicked toolbar item, synchronously
pub trait ActionHandler {
    fn handle_action(&mut self, label: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Brush,
    Rubber,
    ClearAll,
    SaveAsPng,
    Mode,
}

impl ToolbarAction {
    pub const ALL: [ToolbarAction; 5] = [
        ToolbarAction::Brush,
        ToolbarAction::Rubber,
        ToolbarAction::ClearAll,
        ToolbarAction::SaveAsPng,
        ToolbarAction::Mode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Brush => "Brush",
            Self::Rubber => "Rubber",
            Self::ClearAll => "Clear All",
            Self::SaveAsPng => "Save as PNG",
            Self::Mode => "Mode",
        }
    }

    /// Exact, case-sensitive label lookup
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.label() == label)
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Brush => "🖌",
            Self::Rubber => "⌫",
            Self::ClearAll => "🗑",
            Self::SaveAsPng => "💾",
            Self::Mode => "◐",
        }
    }

    /// Tool this item selects, if any
    pub fn tool(self) -> Option<Tool> {
        match self {
            Self::Brush => Some(Tool::Brush),
            Self::Rubber => Some(Tool::Eraser),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    pub height: f32,
    /// Render a "Mode" item after "Save as PNG"
    pub show_mode_toggle: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            height: TOOLBAR_HEIGHT,
            show_mode_toggle: false,
        }
    }
}

/// Fixed top bar with the drawing actions
#[derive(Debug, Clone)]
pub struct Toolbar {
    height: f32,
    items: Vec<ToolbarAction>,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new(&ToolbarConfig::default())
    }
}

impl Toolbar {
    pub fn new(config: &ToolbarConfig) -> Self {
        let mut items = vec![
            ToolbarAction::Brush,
            ToolbarAction::Rubber,
            ToolbarAction::ClearAll,
            ToolbarAction::SaveAsPng,
        ];
        if config.show_mode_toggle {
            items.push(ToolbarAction::Mode);
        }
        Self {
            height: config.height,
            items,
        }
    }

    pub fn items(&self) -> &[ToolbarAction] {
        &self.items
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Delivers `label` to `handler` the same way a click on the item would
    pub fn click(&self, label: &str, handler: &mut dyn ActionHandler) {
        log::debug!("Toolbar item clicked: {}", label);
        handler.handle_action(label);
    }

    /// Renders the bar across the top of the window. Clicks are handed to
    /// `handler` within the same frame.
    pub fn show(&self, ctx: &egui::Context, selected: Tool, handler: &mut dyn ActionHandler) {
        egui::TopBottomPanel::top("toolbar")
            .exact_height(self.height)
            .resizable(false)
            .show_separator_line(false)
            .frame(egui::Frame::none().fill(Color32::BLACK).inner_margin(egui::Margin::symmetric(12.0, 8.0)))
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    for &action in &self.items {
                        let is_selected = action.tool() == Some(selected);
                        if ToolbarButton::new(action, is_selected).show(ui).clicked() {
                            self.click(action.label(), handler);
                        }
                    }
                    ui.add_space(16.0);
                    ui.label(RichText::new(USAGE_HINT).color(Color32::from_gray(200)));
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        labels: Vec<String>,
    }

    impl ActionHandler for Recorder {
        fn handle_action(&mut self, label: &str) {
            self.labels.push(label.to_owned());
        }
    }

    #[test]
    fn test_default_items_match_rendered_bar() {
        let toolbar = Toolbar::default();
        let labels: Vec<_> = toolbar.items().iter().map(|a| a.label()).collect();
        assert_eq!(labels, ["Brush", "Rubber", "Clear All", "Save as PNG"]);
        assert_eq!(toolbar.height(), 67.0);
    }

    #[test]
    fn test_mode_item_is_opt_in() {
        let toolbar = Toolbar::new(&ToolbarConfig {
            show_mode_toggle: true,
            ..Default::default()
        });
        assert_eq!(toolbar.items().last(), Some(&ToolbarAction::Mode));
    }

    #[test]
    fn test_label_lookup_is_exact() {
        for action in ToolbarAction::ALL {
            assert_eq!(ToolbarAction::from_label(action.label()), Some(action));
        }
        assert_eq!(ToolbarAction::from_label("clear all"), None);
        assert_eq!(ToolbarAction::from_label(" Brush"), None);
    }

    #[test]
    fn test_click_dispatches_synchronously() {
        let toolbar = Toolbar::default();
        let mut recorder = Recorder::default();
        toolbar.click("Rubber", &mut recorder);
        toolbar.click("Save as PNG", &mut recorder);
        assert_eq!(recorder.labels, ["Rubber", "Save as PNG"]);
    }

    #[test]
    fn test_show_renders_without_clicks() {
        let ctx = egui::Context::default();
        let toolbar = Toolbar::default();
        let mut recorder = Recorder::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            toolbar.show(ctx, Tool::Brush, &mut recorder);
        });
        assert!(recorder.labels.is_empty());
    }
}
