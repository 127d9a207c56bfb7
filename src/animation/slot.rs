//! Per-card animation mount point.
//!
//! A `MemoryAnimation` lives as long as its card. `sync()` is called every UI
//! frame: the first call with a drawable size starts a renderer, a changed
//! tag replaces it (the old loop is cancelled first), anything else is a
//! no-op. Dropping the slot cancels its loop.

use eframe::egui::{Color32, Painter, Rect, Vec2};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::overlay::{paint_overlay, paint_placeholder};
use super::renderer::AnimationRenderer;
use super::surface::Canvas;
use crate::core::frame_loop::FrameScheduler;
use crate::entities::{MemoryId, MemoryRecord};

const PLACEHOLDER_COLOR: Color32 = Color32::from_gray(160);

#[derive(Debug, Default)]
pub struct MemoryAnimation {
    tag: String,
    renderer: Option<AnimationRenderer<Canvas>>,
}

impl MemoryAnimation {
    pub fn sync(&mut self, tag: &str, size: Vec2, scheduler: &FrameScheduler) {
        if self.renderer.is_some() && self.tag == tag {
            return;
        }
        if let Some(old) = self.renderer.take() {
            debug!("MemoryAnimation: tag changed '{}' -> '{}'", self.tag, tag);
            old.stop();
        }
        self.tag = tag.to_string();
        let canvas = Arc::new(Mutex::new(Canvas::new(size)));
        self.renderer = AnimationRenderer::start(tag, canvas, scheduler);
    }

    pub fn unmount(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.renderer.as_ref().is_some_and(|r| r.is_running())
    }

    pub fn renderer(&self) -> Option<&AnimationRenderer<Canvas>> {
        self.renderer.as_ref()
    }

    /// Paint the latest frame plus the kind's overlay into `rect`, or an
    /// empty outline while no renderer could start.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let Some(renderer) = &self.renderer else {
            paint_placeholder(painter, rect, PLACEHOLDER_COLOR);
            return;
        };
        renderer
            .surface()
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .paint(painter, rect);
        // Fallback animations get no decoration
        let kind = renderer.kind();
        if kind.tag() == self.tag {
            paint_overlay(painter, rect, kind.overlay());
        }
    }
}

/// All card animations, keyed by memory id.
#[derive(Debug, Default)]
pub struct TimelineAnimations {
    slots: HashMap<MemoryId, MemoryAnimation>,
}

impl TimelineAnimations {
    pub fn slot(&mut self, id: MemoryId) -> &mut MemoryAnimation {
        self.slots.entry(id).or_default()
    }

    pub fn get(&self, id: MemoryId) -> Option<&MemoryAnimation> {
        self.slots.get(&id)
    }

    /// Unmount slots whose memory is no longer listed.
    pub fn retain_memories(&mut self, memories: &[MemoryRecord]) {
        self.slots
            .retain(|id, _| memories.iter().any(|memory| memory.id == *id));
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn running(&self) -> usize {
        self.slots.values().filter(|s| s.is_running()).count()
    }
}
