//! Global keyboard shortcuts.
//!
//! Accelerators come from `[shortcuts]` in settings. Each is bound once at
//! startup to an [`ShortcutAction`]; presses are routed through
//! [`dispatch`] to the overlay controls.

use crate::overlay::OverlayControl;
use crate::settings::ShortcutSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShortcutAction {
    ToggleWindow,
    ToggleEditMode,
    ExitEditMode,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    TakeScreenshot,
}

impl ShortcutAction {
    pub const ALL: [ShortcutAction; 8] = [
        ShortcutAction::ToggleWindow,
        ShortcutAction::ToggleEditMode,
        ShortcutAction::ExitEditMode,
        ShortcutAction::MoveLeft,
        ShortcutAction::MoveRight,
        ShortcutAction::MoveUp,
        ShortcutAction::MoveDown,
        ShortcutAction::TakeScreenshot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShortcutAction::ToggleWindow => "toggle-window",
            ShortcutAction::ToggleEditMode => "toggle-edit-mode",
            ShortcutAction::ExitEditMode => "exit-edit-mode",
            ShortcutAction::MoveLeft => "move-window-left",
            ShortcutAction::MoveRight => "move-window-right",
            ShortcutAction::MoveUp => "move-window-up",
            ShortcutAction::MoveDown => "move-window-down",
            ShortcutAction::TakeScreenshot => "take-screenshot",
        }
    }

    /// Accelerator configured for this action.
    pub fn accelerator<'a>(&self, settings: &'a ShortcutSettings) -> &'a str {
        match self {
            ShortcutAction::ToggleWindow => &settings.toggle_window,
            ShortcutAction::ToggleEditMode => &settings.toggle_edit_mode,
            ShortcutAction::ExitEditMode => &settings.exit_edit_mode,
            ShortcutAction::MoveLeft => &settings.move_left,
            ShortcutAction::MoveRight => &settings.move_right,
            ShortcutAction::MoveUp => &settings.move_up,
            ShortcutAction::MoveDown => &settings.move_down,
            ShortcutAction::TakeScreenshot => &settings.take_screenshot,
        }
    }
}

/// Actions with a non-empty accelerator. An empty string disables a binding.
pub fn bindings(settings: &ShortcutSettings) -> Vec<(ShortcutAction, String)> {
    ShortcutAction::ALL
        .into_iter()
        .filter_map(|action| {
            let accelerator = action.accelerator(settings).trim();
            if accelerator.is_empty() {
                tracing::debug!("Shortcut {} disabled", action.name());
                None
            } else {
                Some((action, accelerator.to_string()))
            }
        })
        .collect()
}

pub fn dispatch(action: ShortcutAction, control: &dyn OverlayControl) {
    tracing::debug!("Shortcut fired: {}", action.name());
    match action {
        ShortcutAction::ToggleWindow => control.toggle_visibility(),
        ShortcutAction::ToggleEditMode => control.toggle_edit_mode(),
        ShortcutAction::ExitEditMode => control.exit_edit_mode(),
        ShortcutAction::MoveLeft => control.move_left(),
        ShortcutAction::MoveRight => control.move_right(),
        ShortcutAction::MoveUp => control.move_up(),
        ShortcutAction::MoveDown => control.move_down(),
        ShortcutAction::TakeScreenshot => control.request_capture(),
    }
}

#[cfg(feature = "tauri")]
pub use self::tauri::{register_all, unregister_all};

#[cfg(feature = "tauri")]
mod tauri {
    use std::sync::Arc;

    use tauri::AppHandle;
    use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

    use super::{bindings, dispatch};
    use crate::overlay::OverlayControl;
    use crate::settings::ShortcutSettings;

    /// Bind every configured accelerator. Invalid or taken accelerators are
    /// logged and skipped. Returns how many were bound.
    pub fn register_all(
        app: &AppHandle,
        settings: &ShortcutSettings,
        control: Arc<dyn OverlayControl>,
    ) -> usize {
        let mut registered = 0;

        for (action, accelerator) in bindings(settings) {
            let shortcut = match accelerator.parse::<Shortcut>() {
                Ok(shortcut) => shortcut,
                Err(e) => {
                    tracing::warn!(
                        "Invalid accelerator '{}' for {}: {}",
                        accelerator,
                        action.name(),
                        e
                    );
                    continue;
                }
            };

            let control = Arc::clone(&control);
            let result = app
                .global_shortcut()
                .on_shortcut(shortcut, move |_app, _shortcut, event| {
                    // The backend fires on press and release
                    if event.state == ShortcutState::Pressed {
                        dispatch(action, control.as_ref());
                    }
                });

            match result {
                Ok(()) => {
                    tracing::debug!("Registered {} -> {}", accelerator, action.name());
                    registered += 1;
                }
                Err(e) => tracing::warn!(
                    "Failed to register '{}' for {}: {}",
                    accelerator,
                    action.name(),
                    e
                ),
            }
        }

        tracing::info!("Registered {} global shortcuts", registered);
        registered
    }

    pub fn unregister_all(app: &AppHandle) {
        if let Err(e) = app.global_shortcut().unregister_all() {
            tracing::warn!("Failed to unregister global shortcuts: {}", e);
        } else {
            tracing::debug!("Global shortcuts unregistered");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingControl {
        calls: Mutex<Vec<&'static str>>,
    }

    impl RecordingControl {
        fn record(&self, call: &'static str) {
            self.calls.lock().push(call);
        }
    }

    impl OverlayControl for RecordingControl {
        fn toggle_visibility(&self) {
            self.record("toggle_visibility");
        }
        fn toggle_edit_mode(&self) {
            self.record("toggle_edit_mode");
        }
        fn exit_edit_mode(&self) {
            self.record("exit_edit_mode");
        }
        fn move_left(&self) {
            self.record("move_left");
        }
        fn move_right(&self) {
            self.record("move_right");
        }
        fn move_up(&self) {
            self.record("move_up");
        }
        fn move_down(&self) {
            self.record("move_down");
        }
        fn show_settings(&self) {
            self.record("show_settings");
        }
        fn request_capture(&self) {
            self.record("request_capture");
        }
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bound = bindings(&ShortcutSettings::default());
        assert_eq!(bound.len(), ShortcutAction::ALL.len());
        assert!(bound.contains(&(ShortcutAction::ToggleWindow, "CommandOrControl+B".to_string())));
        assert!(bound.contains(&(ShortcutAction::ExitEditMode, "Escape".to_string())));
    }

    #[test]
    fn test_empty_accelerator_disables_binding() {
        let settings = ShortcutSettings {
            take_screenshot: "  ".to_string(),
            ..Default::default()
        };
        let bound = bindings(&settings);
        assert!(bound.iter().all(|(a, _)| *a != ShortcutAction::TakeScreenshot));
        assert_eq!(bound.len(), ShortcutAction::ALL.len() - 1);
    }

    #[test]
    fn test_dispatch_routes_each_action() {
        let control = RecordingControl::default();
        for action in ShortcutAction::ALL {
            dispatch(action, &control);
        }
        assert_eq!(
            *control.calls.lock(),
            vec![
                "toggle_visibility",
                "toggle_edit_mode",
                "exit_edit_mode",
                "move_left",
                "move_right",
                "move_up",
                "move_down",
                "request_capture",
            ]
        );
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ShortcutAction::ALL.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ShortcutAction::ALL.len());
    }
}
