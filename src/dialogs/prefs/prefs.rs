use anyhow::{Context, Result};
use eframe::egui;
use log::{info, warn};
use std::path::Path;

use crate::widgets::timeline::TimelineConfig;

/// Application settings
///
/// Read from `memlane.json` in the config directory when present. The
/// settings window edits them for the running session only; nothing is
/// written back.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AppSettings {
    // UI
    pub dark_mode: bool,
    pub font_size: f32,

    // Timeline
    pub card_max_width: f32,
    pub preview_height: f32,
    pub reveal_animations: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: 14.0,
            card_max_width: 448.0,
            preview_height: 160.0,
            reveal_animations: true,
        }
    }
}

impl AppSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        Ok(settings.sanitized())
    }

    /// Defaults when the file is missing; a broken file is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                info!("Settings loaded from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("{:#}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Clamp values into the ranges the UI offers.
    pub fn sanitized(mut self) -> Self {
        self.font_size = self.font_size.clamp(10.0, 24.0);
        self.card_max_width = self.card_max_width.clamp(280.0, 720.0);
        self.preview_height = self.preview_height.clamp(80.0, 320.0);
        self
    }

    pub fn timeline_config(&self) -> TimelineConfig {
        TimelineConfig {
            card_max_width: self.card_max_width,
            preview_height: self.preview_height,
            reveal: self.reveal_animations,
            ..TimelineConfig::default()
        }
    }

    /// Push theme and font sizes into the egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_theme(if self.dark_mode {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        });

        let size = self.font_size;
        ctx.style_mut(|style| {
            use egui::{FontId, TextStyle};
            style.text_styles.insert(TextStyle::Heading, FontId::proportional(size * 2.2));
            style.text_styles.insert(TextStyle::Body, FontId::proportional(size));
            style.text_styles.insert(TextStyle::Button, FontId::proportional(size));
            style.text_styles.insert(TextStyle::Small, FontId::proportional(size * 0.8));
            style.text_styles.insert(TextStyle::Monospace, FontId::monospace(size * 0.9));
        });
    }
}

/// Settings window. Returns true when a value changed this frame.
pub fn render_settings_window(ctx: &egui::Context, show_settings: &mut bool, settings: &mut AppSettings) -> bool {
    let before = settings.clone();

    egui::Window::new("Settings")
        .id(egui::Id::new("settings_window"))
        .open(show_settings)
        .default_size([360.0, 300.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.heading("Appearance");
            ui.add_space(8.0);

            ui.checkbox(&mut settings.dark_mode, "Dark Mode");
            ui.label("Font Size:");
            ui.add(
                egui::Slider::new(&mut settings.font_size, 10.0..=24.0)
                    .suffix(" px")
                    .step_by(0.5),
            );

            ui.add_space(16.0);
            ui.heading("Timeline");
            ui.add_space(8.0);

            ui.label("Card Width:");
            ui.add(
                egui::Slider::new(&mut settings.card_max_width, 280.0..=720.0)
                    .suffix(" px")
                    .step_by(8.0),
            );
            ui.label("Preview Height:");
            ui.add(
                egui::Slider::new(&mut settings.preview_height, 80.0..=320.0)
                    .suffix(" px")
                    .step_by(8.0),
            );
            ui.checkbox(&mut settings.reveal_animations, "Reveal cards on load");

            ui.add_space(8.0);
            ui.small("Preview size applies to cards shown after the change.");
        });

    *settings != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings(name: &str, contents: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("memlane_prefs_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_settings("partial.json", r#"{ "dark_mode": true }"#);
        let settings = AppSettings::load(&path).unwrap();
        assert!(settings.dark_mode);
        assert_eq!(settings.font_size, 14.0);
        assert!(settings.reveal_animations);
    }

    #[test]
    fn test_values_are_clamped() {
        let path = temp_settings("wild.json", r#"{ "font_size": 300.0, "preview_height": 1.0 }"#);
        let settings = AppSettings::load(&path).unwrap();
        assert_eq!(settings.font_size, 24.0);
        assert_eq!(settings.preview_height, 80.0);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let path = temp_settings("broken.json", "dark_mode = true");
        assert!(AppSettings::load(&path).is_err());
        assert_eq!(AppSettings::load_or_default(&path), AppSettings::default());

        let missing = std::env::temp_dir().join("memlane_prefs_test/none.json");
        assert_eq!(AppSettings::load_or_default(&missing), AppSettings::default());
    }

    #[test]
    fn test_timeline_config() {
        let settings = AppSettings {
            preview_height: 200.0,
            reveal_animations: false,
            ..AppSettings::default()
        };
        let config = settings.timeline_config();
        assert_eq!(config.preview_height, 200.0);
        assert!(!config.reveal);
        assert_eq!(config.column_width, TimelineConfig::default().column_width);
    }
}
