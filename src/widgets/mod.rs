//! UI Widgets - timeline, loading skeleton, status bar
//!
//! Widgets draw from state passed in and report interactions as events.

pub mod skeleton;
pub mod status;
pub mod timeline;
