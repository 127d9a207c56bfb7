use eframe::egui;
use log::debug;

/// How long a message stays visible
const MESSAGE_SECONDS: f64 = 6.0;

/// Snapshot of what the status bar shows this frame
#[derive(Clone, Debug, Default)]
pub struct StatusInfo<'a> {
    pub memory_count: usize,
    pub expanded_title: Option<&'a str>,
    pub active_loops: usize,
    pub loading: bool,
}

/// Status bar component
#[derive(Default)]
pub struct StatusBar {
    current_message: String,
    /// egui time the message was set
    message_time: f64,
}

impl StatusBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: impl Into<String>, now: f64) {
        self.current_message = message.into();
        self.message_time = now;
        debug!("Status: {}", self.current_message);
    }

    /// Current message, if it hasn't expired yet
    pub fn message(&self, now: f64) -> Option<&str> {
        (!self.current_message.is_empty() && now - self.message_time < MESSAGE_SECONDS)
            .then_some(self.current_message.as_str())
    }

    /// Render status bar at bottom of screen
    pub fn render(&self, ctx: &egui::Context, info: &StatusInfo<'_>) {
        let now = ctx.input(|i| i.time);
        let dt = ctx.input(|i| i.stable_dt).max(1e-4);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if info.loading {
                    ui.spinner();
                    ui.monospace("Loading memories...");
                } else {
                    ui.monospace(format!("{} memories", info.memory_count));
                }

                ui.separator();

                ui.monospace(info.expanded_title.unwrap_or("---"));

                ui.separator();

                ui.monospace(format!("{} anim", info.active_loops));

                ui.separator();

                ui.monospace(format!("{:>3.0} fps", 1.0 / dt));

                if let Some(message) = self.message(now) {
                    ui.separator();
                    ui.label(message);
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let mut bar = StatusBar::new();
        assert_eq!(bar.message(0.0), None);

        bar.set_message("Enhancement not configured", 10.0);
        assert_eq!(bar.message(11.0), Some("Enhancement not configured"));
        assert_eq!(bar.message(10.0 + MESSAGE_SECONDS + 0.1), None);
    }
}
