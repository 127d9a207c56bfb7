//! Event handling for MemlaneApp.
//!
//! Widgets only emit; every state change happens here, once per frame,
//! after the UI pass.

use eframe::egui;
use log::{debug, error, info, warn};

use super::MemlaneApp;
use crate::core::event_bus::downcast_event;
use crate::entities::sample_memories;
use crate::widgets::timeline::{CollapseAllEvent, EditMemoryEvent, EnhanceMemoryEvent, ToggleMemoryEvent};

impl MemlaneApp {
    /// Apply all queued events. Returns true if anything was handled.
    pub fn handle_events(&mut self, now: f64) -> bool {
        let events = self.event_bus.poll();
        let handled = !events.is_empty();

        for event in events {
            if let Some(e) = downcast_event::<ToggleMemoryEvent>(&event) {
                self.timeline_state.toggle(e.0);
                debug!("Toggle memory {} -> expanded {:?}", e.0, self.timeline_state.expanded());
            } else if downcast_event::<CollapseAllEvent>(&event).is_some() {
                self.timeline_state.collapse();
            } else if let Some(e) = downcast_event::<EditMemoryEvent>(&event) {
                let title = self.memory(e.0).map(|m| m.title.clone()).unwrap_or_default();
                info!("Edit requested for memory {} ({})", e.0, title);
                self.status_bar
                    .set_message(format!("Editing \"{}\" is not available yet", title), now);
            } else if let Some(e) = downcast_event::<EnhanceMemoryEvent>(&event) {
                self.enhance_memory(e.0, now);
            } else {
                warn!("Unhandled event: {}", (*event).type_name());
            }
        }
        handled
    }

    fn enhance_memory(&mut self, id: u32, now: f64) {
        let Some(memory) = self.memory(id) else {
            warn!("Enhance requested for unknown memory {}", id);
            return;
        };
        match self.enhancer.enhance(memory) {
            Ok(text) => {
                info!("Enhanced memory {}: {}", id, text);
                self.status_bar.set_message(text, now);
            }
            Err(e) => {
                warn!("Enhance failed: {:#}", e);
                self.status_bar.set_message(format!("{}", e), now);
            }
        }
    }

    /// Escape collapses, F2 toggles settings.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (escape, f2) = ctx.input(|i| (i.key_pressed(egui::Key::Escape), i.key_pressed(egui::Key::F2)));
        if escape {
            self.event_bus.emit(CollapseAllEvent);
        }
        if f2 {
            self.show_settings = !self.show_settings;
        }
    }

    /// Pick up the background load result, if it's ready.
    pub fn poll_loader(&mut self, now: f64) {
        let Some(result) = self.loader.as_ref().and_then(|l| l.try_recv()) else {
            return;
        };
        let source = self
            .loader
            .take()
            .map(|l| l.source().to_string())
            .unwrap_or_default();

        match result {
            Ok(memories) => {
                info!("{} memories ready from {}", memories.len(), source);
                self.set_memories(memories);
            }
            Err(e) => {
                error!("Failed to load memories: {:#}", e);
                self.status_bar
                    .set_message(format!("Could not load {}; showing samples", source), now);
                self.set_memories(sample_memories());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::MemlaneApp;
    use crate::core::enhance::MemoryEnhancer;
    use crate::dialogs::prefs::AppSettings;
    use crate::entities::{MemoryRecord, MemorySource, sample_memories};
    use crate::widgets::timeline::{CollapseAllEvent, EditMemoryEvent, EnhanceMemoryEvent, ToggleMemoryEvent};
    use std::path::PathBuf;

    fn app() -> MemlaneApp {
        MemlaneApp::with_memories(sample_memories(), AppSettings::default())
    }

    #[test]
    fn test_graduation_expand_and_collapse() {
        let mut app = app();
        app.event_bus.emitter().emit(ToggleMemoryEvent(3));
        assert!(app.handle_events(0.0));

        let expanded = app.expanded_memory().unwrap();
        assert_eq!(expanded.title, "Graduation Day");
        assert_eq!(expanded.location, "University Auditorium");
        assert_eq!(expanded.sentiment, "Pride");
        for id in [1, 2, 4, 5] {
            assert!(!app.timeline_state.is_expanded(id));
        }

        app.event_bus.emit(ToggleMemoryEvent(3));
        app.handle_events(0.1);
        assert_eq!(app.timeline_state.expanded(), None);
    }

    #[test]
    fn test_switching_and_collapse_all() {
        let mut app = app();
        app.event_bus.emit(ToggleMemoryEvent(1));
        app.event_bus.emit(ToggleMemoryEvent(5));
        app.handle_events(0.0);
        assert_eq!(app.timeline_state.expanded(), Some(5));

        app.event_bus.emit(CollapseAllEvent);
        app.handle_events(0.0);
        assert_eq!(app.timeline_state.expanded(), None);
        assert!(!app.handle_events(0.0));
    }

    #[test]
    fn test_enhance_reports_not_configured() {
        let mut app = app();
        app.event_bus.emit(EnhanceMemoryEvent(2));
        app.handle_events(5.0);
        let message = app.status_bar.message(5.0).unwrap();
        assert!(message.contains("not configured"));
    }

    struct EchoEnhancer;

    impl MemoryEnhancer for EchoEnhancer {
        fn name(&self) -> &str {
            "echo"
        }
        fn enhance(&self, memory: &MemoryRecord) -> anyhow::Result<String> {
            Ok(format!("{} (enhanced)", memory.title))
        }
    }

    #[test]
    fn test_enhancer_is_pluggable() {
        let mut app = app();
        app.set_enhancer(Box::new(EchoEnhancer));
        app.event_bus.emit(EnhanceMemoryEvent(4));
        app.handle_events(1.0);
        assert_eq!(app.status_bar.message(1.0), Some("Ocean Sunrise (enhanced)"));
        // State is untouched
        assert_eq!(app.memory(4).unwrap().description, sample_memories()[3].description);
    }

    #[test]
    fn test_edit_is_inert() {
        let mut app = app();
        app.event_bus.emit(EditMemoryEvent(1));
        app.handle_events(0.0);
        assert!(app.status_bar.message(0.0).unwrap().contains("Summer in Paris"));
        assert_eq!(app.memories, sample_memories());
    }

    fn wait_for_load(app: &mut MemlaneApp) {
        for _ in 0..500 {
            app.poll_loader(0.0);
            if !app.is_loading() {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("loader did not finish");
    }

    #[test]
    fn test_loader_with_pending_expand() {
        let mut app = MemlaneApp::new(MemorySource::Builtin, AppSettings::default(), Some(3)).unwrap();
        assert!(app.is_loading());
        wait_for_load(&mut app);
        assert_eq!(app.memories.len(), 5);
        assert_eq!(app.timeline_state.expanded(), Some(3));
    }

    #[test]
    fn test_failed_load_falls_back_to_samples() {
        let missing = PathBuf::from("/nonexistent/memlane/memories.json");
        let mut app = MemlaneApp::new(MemorySource::File(missing), AppSettings::default(), Some(42)).unwrap();
        wait_for_load(&mut app);
        assert_eq!(app.memories, sample_memories());
        assert_eq!(app.timeline_state.expanded(), None);
        assert!(app.status_bar.message(0.0).unwrap().contains("showing samples"));
    }

    #[test]
    fn test_set_memories_drops_stale_expansion() {
        let mut app = app();
        app.timeline_state.toggle(5);
        app.set_memories(sample_memories()[..3].to_vec());
        assert_eq!(app.timeline_state.expanded(), None);
    }
}
