//! MEMLANE - animated memory timeline library
//!
//! Re-exports all modules for use by the binary target.

// Core engine (frame scheduling, events, collaborators)
pub mod core;

// Procedural card animations
pub mod animation;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod dialogs;
pub mod entities;
pub mod widgets;

// Re-export commonly used types from core
pub use core::event_bus::{BoxedEvent, EventBus, EventEmitter, downcast_event};
pub use core::frame_loop::{FrameHandle, FrameScheduler};

// Re-export entities
pub use entities::{MemoryId, MemoryRecord, sample_memories};

pub use animation::{AnimationKind, AnimationRenderer};
pub use app::MemlaneApp;
