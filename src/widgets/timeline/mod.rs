//! Timeline widget - memories along a vertical line
//!
//! Cards alternate sides of the line; one card at a time can be expanded.

mod timeline;
pub mod timeline_events;
pub mod timeline_helpers;
mod timeline_ui;

pub use timeline::{CardSide, TimelineConfig, TimelineState};
pub use timeline_events::{CollapseAllEvent, EditMemoryEvent, EnhanceMemoryEvent, ToggleMemoryEvent};
pub use timeline_ui::render_timeline;
