pub mod toolbar;

pub use toolbar::{ActionHandler, Toolbar, ToolbarAction};
