//! Main application loop - eframe::App implementation.
//!
//! Contains the per-frame flow:
//! - Loader polling and keyboard input
//! - Frame scheduler tick (card animations)
//! - UI rendering (status bar, settings, timeline)
//! - Event processing

use eframe::egui;
use log::{debug, trace};

use crate::app::MemlaneApp;
use crate::core::frame_loop::wall_clock_seconds;
use crate::dialogs::prefs::render_settings_window;
use crate::widgets::skeleton::render_loading_timeline;
use crate::widgets::status::StatusInfo;
use crate::widgets::timeline::render_timeline;

const TITLE: &str = "Memory Timeline";
const SUBTITLE: &str = "Your personal journey visualized with AI-enhanced memories";

impl eframe::App for MemlaneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_frame(ctx);
    }
}

impl MemlaneApp {
    /// One frame, independent of the native window.
    ///
    /// Flow:
    /// 1. Apply theme and font settings (first frame only)
    /// 2. Pick up loaded memories, handle keys
    /// 3. Tick the frame scheduler so every card canvas holds a fresh frame
    /// 4. Render status bar, settings window, timeline
    /// 5. Apply events emitted during rendering
    /// 6. Keep repainting while any animation loop is armed
    pub fn render_frame(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);

        if !self.settings_applied {
            self.settings.apply(ctx);
            self.settings_applied = true;
        }

        self.poll_loader(now);
        self.handle_keyboard_input(ctx);

        let invoked = self.scheduler.tick(wall_clock_seconds());
        trace!("Frame {}: {} animation callbacks", self.scheduler.ticks(), invoked);

        let info = StatusInfo {
            memory_count: self.memories.len(),
            expanded_title: self.expanded_memory().map(|m| m.title.as_str()),
            active_loops: self.scheduler.active_loops(),
            loading: self.is_loading(),
        };
        self.status_bar.render(ctx, &info);

        if self.show_settings && render_settings_window(ctx, &mut self.show_settings, &mut self.settings) {
            self.settings = self.settings.clone().sanitized();
            self.settings.apply(ctx);
            self.timeline_config = self.settings.timeline_config();
            debug!("Settings changed: {:?}", self.settings);
        }

        if !self.is_loading() && self.reveal_started.is_none() {
            self.reveal_started = Some(now);
        }
        let reveal_elapsed = self.reveal_started.map_or(0.0, |start| now - start);
        let revealing = self.timeline_config.reveal && reveal_elapsed < self.reveal_duration();

        // Header rects are known once the timeline has been laid out
        let scroll_target = if self.scroll_to_expanded {
            self.timeline_state.expanded().and_then(|id| self.card_header(id))
        } else {
            None
        };
        if scroll_target.is_some() {
            self.scroll_to_expanded = false;
        }

        let emitter = self.event_bus.emitter();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(24.0);
                    ui.vertical_centered(|ui| {
                        ui.heading(egui::RichText::new(TITLE).size(32.0).strong());
                        ui.add_space(4.0);
                        ui.label(egui::RichText::new(SUBTITLE).weak());
                    });
                    ui.add_space(48.0);

                    if let Some(rect) = scroll_target {
                        ui.scroll_to_rect(rect, Some(egui::Align::TOP));
                    }

                    if self.loader.is_some() {
                        render_loading_timeline(ui, now);
                    } else {
                        self.card_headers = render_timeline(
                            ui,
                            &self.memories,
                            &self.timeline_state,
                            &self.timeline_config,
                            &mut self.animations,
                            &self.scheduler,
                            reveal_elapsed,
                            |event| emitter.emit_boxed(event),
                        );
                    }
                    ui.add_space(48.0);
                });
        });

        if self.handle_events(now) || revealing || self.scheduler.active_loops() > 0 {
            ctx.request_repaint();
        }
    }

    /// Time until the last card has finished its reveal.
    fn reveal_duration(&self) -> f64 {
        self.memories.len() as f64 * 0.3 + 0.6
    }
}

#[cfg(test)]
mod tests {
    use crate::app::MemlaneApp;
    use crate::dialogs::prefs::AppSettings;
    use crate::entities::{MemorySource, sample_memories};
    use eframe::egui;

    fn raw_input() -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(1024.0, 2400.0))),
            ..Default::default()
        }
    }

    fn app() -> MemlaneApp {
        let settings = AppSettings {
            reveal_animations: false,
            ..Default::default()
        };
        MemlaneApp::with_memories(sample_memories(), settings)
    }

    #[test]
    fn test_every_card_mounts_one_loop() {
        let ctx = egui::Context::default();
        let mut app = app();
        for _ in 0..3 {
            let _ = ctx.run(raw_input(), |ctx| app.render_frame(ctx));
        }
        assert_eq!(app.animations.running(), 5);
        assert_eq!(app.scheduler.active_loops(), 5);
        for memory in sample_memories() {
            let slot = app.animations.get(memory.id).unwrap();
            assert!(slot.renderer().unwrap().frames_drawn() >= 1);
        }
    }

    fn frames(ctx: &egui::Context, app: &mut MemlaneApp, count: usize) -> egui::FullOutput {
        let mut output = egui::FullOutput::default();
        for _ in 0..count {
            output = ctx.run(raw_input(), |ctx| app.render_frame(ctx));
        }
        output
    }

    /// Press and release the primary button at `pos`, one frame each.
    fn click(ctx: &egui::Context, app: &mut MemlaneApp, pos: egui::Pos2) {
        for pressed in [true, false] {
            let mut input = raw_input();
            input.events.push(egui::Event::PointerMoved(pos));
            input.events.push(egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                modifiers: egui::Modifiers::NONE,
            });
            let _ = ctx.run(input, |ctx| app.render_frame(ctx));
        }
    }

    fn shows_text(output: &egui::FullOutput, needle: &str) -> bool {
        output.shapes.iter().any(|clipped| match &clipped.shape {
            egui::Shape::Text(text) => text.galley.text().contains(needle),
            _ => false,
        })
    }

    #[test]
    fn test_cards_laid_out_in_order() {
        let ctx = egui::Context::default();
        let mut app = app();
        frames(&ctx, &mut app, 2);

        let ids: Vec<_> = app.card_headers.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let center = 512.0;
        for (index, window) in app.card_headers.windows(2).enumerate() {
            assert!(window[0].1.top() < window[1].1.top(), "row {} not above row {}", index, index + 1);
        }
        for (index, (_, header)) in app.card_headers.iter().enumerate() {
            if index % 2 == 0 {
                assert!(header.center().x > center, "card {} should sit right of the line", index);
            } else {
                assert!(header.center().x < center, "card {} should sit left of the line", index);
            }
        }
    }

    #[test]
    fn test_clicking_header_expands_only_that_card() {
        let ctx = egui::Context::default();
        let mut app = app();
        let output = frames(&ctx, &mut app, 2);
        assert!(!shows_text(&output, "University Auditorium"));

        let header = app.card_header(3).unwrap();
        click(&ctx, &mut app, header.center());
        assert_eq!(app.timeline_state.expanded(), Some(3));
        for id in [1, 2, 4, 5] {
            assert!(!app.timeline_state.is_expanded(id));
        }

        // Let the body finish opening
        let output = frames(&ctx, &mut app, 40);
        let expanded = app.expanded_memory().unwrap();
        assert_eq!(expanded.title, "Graduation Day");
        assert!(shows_text(&output, "University Auditorium"));
        assert!(shows_text(&output, "Pride"));

        // Card 3's header doesn't move when its own body opens
        let header = app.card_header(3).unwrap();
        click(&ctx, &mut app, header.center());
        assert_eq!(app.timeline_state.expanded(), None);
    }

    #[test]
    fn test_expand_flag_scrolls_once_laid_out() {
        let ctx = egui::Context::default();
        let settings = AppSettings {
            reveal_animations: false,
            ..Default::default()
        };
        let mut app = MemlaneApp::new(MemorySource::Builtin, settings, Some(5)).unwrap();
        for _ in 0..500 {
            let _ = ctx.run(raw_input(), |ctx| app.render_frame(ctx));
            if !app.is_loading() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(app.scroll_to_expanded);
        frames(&ctx, &mut app, 2);
        assert!(!app.scroll_to_expanded);
        assert_eq!(app.timeline_state.expanded(), Some(5));
    }

    #[test]
    fn test_removing_memories_releases_loops() {
        let ctx = egui::Context::default();
        let mut app = app();
        let _ = ctx.run(raw_input(), |ctx| app.render_frame(ctx));
        assert_eq!(app.scheduler.active_loops(), 5);

        app.set_memories(sample_memories()[..2].to_vec());
        assert_eq!(app.scheduler.active_loops(), 2);
        app.set_memories(Vec::new());
        assert_eq!(app.scheduler.active_loops(), 0);

        let _ = ctx.run(raw_input(), |ctx| app.render_frame(ctx));
        assert_eq!(app.animations.running(), 0);
    }

    #[test]
    fn test_escape_collapses() {
        let ctx = egui::Context::default();
        let mut app = app();
        app.timeline_state.toggle(2);

        let mut input = raw_input();
        input.events.push(egui::Event::Key {
            key: egui::Key::Escape,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        });
        let _ = ctx.run(input, |ctx| app.render_frame(ctx));
        assert_eq!(app.timeline_state.expanded(), None);
    }

    #[test]
    fn test_reveal_holds_back_cards() {
        let ctx = egui::Context::default();
        let mut app = MemlaneApp::with_memories(sample_memories(), AppSettings::default());
        let _ = ctx.run(raw_input(), |ctx| app.render_frame(ctx));
        // First frame: no card has started fading in yet
        assert_eq!(app.animations.running(), 0);
        assert!(app.scheduler.active_loops() < 5);
    }
}
