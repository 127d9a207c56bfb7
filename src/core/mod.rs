//! Core engine modules - frame scheduling, events, collaborators
//!
//! These modules are independent of the UI toolkit.

pub mod enhance;
pub mod event_bus;
pub mod frame_loop;

// Re-exports for convenience
pub use enhance::{MemoryEnhancer, NoEnhancer};
pub use event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};
pub use frame_loop::{FrameHandle, FrameScheduler, FrameTime, wall_clock_seconds};
