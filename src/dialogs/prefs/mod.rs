//! Preferences - settings file and settings window

mod prefs;

pub use prefs::{AppSettings, render_settings_window};
