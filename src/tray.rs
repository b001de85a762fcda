//! System tray menu: one checkbox per overlay widget, then Settings and Quit.

use crate::overlay::OverlayComponent;
use crate::state::AppState;

pub const SETTINGS_ID: &str = "settings";
pub const QUIT_ID: &str = "quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    ToggleComponent(OverlayComponent),
    OpenSettings,
    Quit,
}

impl TrayAction {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            SETTINGS_ID => Some(TrayAction::OpenSettings),
            QUIT_ID => Some(TrayAction::Quit),
            other => OverlayComponent::from_id(other).map(TrayAction::ToggleComponent),
        }
    }
}

/// Apply a tray action. `Quit` is left to the caller, which owns the app.
/// Returns the new checkbox state for component toggles.
pub fn apply(action: TrayAction, state: &AppState) -> Option<bool> {
    match action {
        TrayAction::ToggleComponent(component) => Some(state.components.toggle(component)),
        TrayAction::OpenSettings => {
            state.window.show_settings();
            None
        }
        TrayAction::Quit => None,
    }
}

#[cfg(feature = "tauri")]
pub use self::tauri::build_tray;

#[cfg(feature = "tauri")]
mod tauri {
    use tauri::menu::{CheckMenuItem, CheckMenuItemBuilder, MenuBuilder, MenuItemBuilder};
    use tauri::tray::{TrayIcon, TrayIconBuilder};
    use tauri::{AppHandle, Manager};

    use super::{apply, TrayAction, QUIT_ID, SETTINGS_ID};
    use crate::overlay::OverlayComponent;
    use crate::state::AppState;

    pub fn build_tray(app: &AppHandle) -> tauri::Result<TrayIcon> {
        let visibility = app.state::<AppState>().components.visibility();

        let mut checks: Vec<(OverlayComponent, CheckMenuItem<tauri::Wry>)> = Vec::new();
        for component in OverlayComponent::ALL {
            let item = CheckMenuItemBuilder::with_id(component.id(), component.label())
                .checked(visibility.get(component))
                .build(app)?;
            checks.push((component, item));
        }

        let settings_item = MenuItemBuilder::with_id(SETTINGS_ID, "Settings").build(app)?;
        let quit_item = MenuItemBuilder::with_id(QUIT_ID, "Quit").build(app)?;

        let mut menu = MenuBuilder::new(app);
        for (_, item) in &checks {
            menu = menu.item(item);
        }
        let menu = menu
            .separator()
            .item(&settings_item)
            .separator()
            .item(&quit_item)
            .build()?;

        let mut builder = TrayIconBuilder::new()
            .menu(&menu)
            .tooltip("Cogni")
            .on_menu_event(move |app, event| {
                let Some(action) = TrayAction::from_id(event.id.as_ref()) else {
                    return;
                };
                if action == TrayAction::Quit {
                    tracing::info!("Quit requested from tray");
                    app.exit(0);
                    return;
                }

                let state = app.state::<AppState>();
                if let (TrayAction::ToggleComponent(component), Some(visible)) =
                    (action, apply(action, &state))
                {
                    // Keep the checkbox in step with the panel, whatever the OS did
                    if let Some((_, item)) = checks.iter().find(|(c, _)| *c == component) {
                        if let Err(e) = item.set_checked(visible) {
                            tracing::warn!("Failed to update tray checkbox: {}", e);
                        }
                    }
                }
            });

        if let Some(icon) = app.default_window_icon() {
            builder = builder.icon(icon.clone());
        }

        builder.build(app)
    }
}
