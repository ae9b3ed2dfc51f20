//! App Core for ReadEscape.
//!
//! Central struct holding the settings engine and the reading mode
//! controller, managing startup.

use crate::dom::PageDocument;
use crate::services::reading_mode::{ReadingModeController, ReadingModeTrait};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub controller: ReadingModeController,
}

impl App {
    /// Creates a new App, loading settings from `config_path` (or the
    /// platform config dir when `None`). A missing or unreadable settings
    /// file leaves the defaults in place.
    pub fn new(config_path: Option<String>) -> Self {
        let mut settings_engine = SettingsEngine::new(config_path);
        let _ = settings_engine.load();

        let controller = ReadingModeController::new(settings_engine.get_settings().clone());
        Self {
            settings_engine,
            controller,
        }
    }

    /// Per-page startup: pushes the CSS custom properties and lets the
    /// grayout capture the pristine background.
    pub fn initialize(&mut self, page: &mut PageDocument) {
        self.controller.initialize(page);
    }
}
