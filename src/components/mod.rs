pub mod toolbar_button;

pub use toolbar_button::ToolbarButton;
