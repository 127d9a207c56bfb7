//! Application module - MemlaneApp and related functionality.
//!
//! - `run` - eframe::App implementation and per-frame layout
//! - `events` - event handling (timeline events, keyboard input, loader)

mod events;
mod run;

use anyhow::Result;
use eframe::egui::Rect;
use log::info;

use crate::animation::TimelineAnimations;
use crate::core::enhance::{MemoryEnhancer, NoEnhancer};
use crate::core::event_bus::EventBus;
use crate::core::frame_loop::FrameScheduler;
use crate::dialogs::prefs::AppSettings;
use crate::entities::{MemoryId, MemoryLoader, MemoryRecord, MemorySource};
use crate::widgets::status::StatusBar;
use crate::widgets::timeline::{TimelineConfig, TimelineState};

/// Main application state.
///
/// Owns the memory list, the single expansion state, one animation slot per
/// card and the frame scheduler driving them. Nothing here is persisted.
pub struct MemlaneApp {
    pub memories: Vec<MemoryRecord>,
    /// Background load in flight; `None` once memories are in
    loader: Option<MemoryLoader>,
    pub timeline_state: TimelineState,
    timeline_config: TimelineConfig,
    pub settings: AppSettings,
    settings_applied: bool,
    pub animations: TimelineAnimations,
    pub scheduler: FrameScheduler,
    pub event_bus: EventBus,
    enhancer: Box<dyn MemoryEnhancer>,
    pub status_bar: StatusBar,
    pub show_settings: bool,
    /// egui time at which the current memories were first shown
    reveal_started: Option<f64>,
    /// Card to expand once memories arrive (--expand)
    pending_expand: Option<MemoryId>,
    /// Scroll the expanded card into view on the next frame
    scroll_to_expanded: bool,
    /// Card header rects from the last frame, in list order
    pub card_headers: Vec<(MemoryId, Rect)>,
}

impl MemlaneApp {
    /// Start loading from `source` in the background.
    pub fn new(source: MemorySource, settings: AppSettings, expand: Option<MemoryId>) -> Result<Self> {
        info!("Loading memories from {}", source);
        let loader = MemoryLoader::spawn(source)?;
        let mut app = Self::with_memories(Vec::new(), settings);
        app.loader = Some(loader);
        app.pending_expand = expand;
        Ok(app)
    }

    /// App with memories already in place (no loading phase).
    pub fn with_memories(memories: Vec<MemoryRecord>, settings: AppSettings) -> Self {
        Self {
            memories,
            loader: None,
            timeline_state: TimelineState::default(),
            timeline_config: settings.timeline_config(),
            settings,
            settings_applied: false,
            animations: TimelineAnimations::default(),
            scheduler: FrameScheduler::new(),
            event_bus: EventBus::new(),
            enhancer: Box::new(NoEnhancer),
            status_bar: StatusBar::new(),
            show_settings: false,
            reveal_started: None,
            pending_expand: None,
            scroll_to_expanded: false,
            card_headers: Vec::new(),
        }
    }

    /// Swap the enhancement collaborator.
    pub fn set_enhancer(&mut self, enhancer: Box<dyn MemoryEnhancer>) {
        info!("Memory enhancer: {}", enhancer.name());
        self.enhancer = enhancer;
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    pub fn memory(&self, id: MemoryId) -> Option<&MemoryRecord> {
        self.memories.iter().find(|m| m.id == id)
    }

    /// Header rect of `id` as laid out last frame.
    pub fn card_header(&self, id: MemoryId) -> Option<Rect> {
        self.card_headers.iter().find(|(card, _)| *card == id).map(|(_, rect)| *rect)
    }

    pub fn expanded_memory(&self) -> Option<&MemoryRecord> {
        self.timeline_state.expanded().and_then(|id| self.memory(id))
    }

    /// Replace the memory list; cards that disappeared are unmounted.
    pub fn set_memories(&mut self, memories: Vec<MemoryRecord>) {
        self.animations.retain_memories(&memories);
        if let Some(id) = self.timeline_state.expanded() {
            if !memories.iter().any(|m| m.id == id) {
                self.timeline_state.collapse();
            }
        }
        self.memories = memories;
        self.reveal_started = None;
        self.card_headers.clear();

        if let Some(id) = self.pending_expand.take() {
            if self.memory(id).is_some() {
                self.timeline_state = TimelineState::with_expanded(Some(id));
                self.scroll_to_expanded = true;
            } else {
                log::warn!("--expand {}: no such memory", id);
            }
        }
    }
}
