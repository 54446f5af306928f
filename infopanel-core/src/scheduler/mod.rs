//! Content scheduler
//!
//! Decides once per tick whether the screen needs redrawing and renders the
//! clock or weather content through a [`TextDisplay`](infopanel_display::TextDisplay).

pub mod panel;
pub mod render;
pub mod timing;

pub use panel::ContentPanel;
pub use render::PLACEHOLDER;
pub use timing::{MinuteStamp, SchedulerState, DEFAULT_SWITCH_PERIOD};
