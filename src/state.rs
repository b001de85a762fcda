use std::sync::Arc;

use crate::overlay::{ComponentPanel, ControllerConfig, WindowController};
use crate::runtime::OverlayRuntime;
use crate::session::SessionStore;
use crate::settings::{CogniSettings, SettingsManager};

/// Application context shared by IPC commands, shortcuts and the tray.
pub struct AppState {
    pub window: Arc<WindowController>,
    pub sessions: Arc<dyn SessionStore>,
    pub settings_manager: Arc<SettingsManager>,
    pub components: Arc<ComponentPanel>,
    pub runtime: Arc<dyn OverlayRuntime>,
}

impl AppState {
    pub fn new(
        settings: &CogniSettings,
        settings_manager: Arc<SettingsManager>,
        sessions: Arc<dyn SessionStore>,
        runtime: Arc<dyn OverlayRuntime>,
    ) -> Self {
        Self {
            window: Arc::new(WindowController::new(
                Arc::clone(&runtime),
                ControllerConfig::from(&settings.window),
            )),
            sessions,
            settings_manager,
            components: Arc::new(ComponentPanel::new(Arc::clone(&runtime))),
            runtime,
        }
    }
}
