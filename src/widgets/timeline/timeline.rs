//! Timeline widget - state and configuration.
//!
//! `TimelineState` is owned by the app and passed into the renderer
//! read-only; the renderer emits `ToggleMemoryEvent`s and the app applies
//! them with `toggle()`. At most one memory is expanded at a time.

use crate::entities::MemoryId;

/// Configuration for timeline widget
#[derive(Clone, Debug)]
pub struct TimelineConfig {
    /// Max width of the centered content column
    pub column_width: f32,
    /// Card width as a fraction of the column
    pub card_fraction: f32,
    pub card_max_width: f32,
    pub preview_height: f32,
    /// Vertical gap between rows
    pub row_gap: f32,
    /// Entrance reveal on first show
    pub reveal: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            column_width: 768.0,
            card_fraction: 0.9,
            card_max_width: 448.0,
            preview_height: 160.0,
            row_gap: 96.0,
            reveal: true,
        }
    }
}

/// Timeline state (persistent between frames)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimelineState {
    expanded: Option<MemoryId>,
}

impl TimelineState {
    pub fn with_expanded(id: Option<MemoryId>) -> Self {
        Self { expanded: id }
    }

    /// Same id collapses, a different id takes over the expansion.
    pub fn toggle(&mut self, id: MemoryId) {
        self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
    }

    pub fn collapse(&mut self) {
        self.expanded = None;
    }

    pub fn is_expanded(&self, id: MemoryId) -> bool {
        self.expanded == Some(id)
    }

    pub fn expanded(&self) -> Option<MemoryId> {
        self.expanded
    }
}

/// Horizontal card placement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSide {
    Left,
    Right,
}

impl CardSide {
    /// Even rows sit right of the line, odd rows left.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 { CardSide::Right } else { CardSide::Left }
    }
}
