//! The overlay window: a single transparent, always-on-top window whose
//! visibility, click-through and edit mode are driven by [`WindowController`].
//!
//! Window-manager calls go through the [`OverlayWindow`] capability so the
//! controller can run against a real Tauri window or a recording mock.
//!
//! ```text
//! shortcuts / tray / IPC --> WindowController --> dyn OverlayWindow
//!                                   |
//!                                   +--> dyn OverlayRuntime (edit-mode-changed, ...)
//! ```

pub mod components;
pub mod controller;
pub mod geometry;
#[cfg(feature = "tauri")]
pub mod tauri;
#[cfg(test)]
pub(crate) mod testing;

pub use components::{ComponentPanel, ComponentVisibility, OverlayComponent};
pub use controller::{ControllerConfig, WindowController, WindowState};
pub use geometry::{Bounds, Position, ScreenMetrics, Size};

use crate::error::Result;

/// Window-manager operations the controller needs from the platform.
///
/// Implementations report failures as errors; the controller logs them and
/// carries on, since there is nothing to retry against a local window.
pub trait OverlayWindow: Send + Sync + 'static {
    /// `true` once the platform window is gone. Terminal.
    fn is_destroyed(&self) -> bool;

    fn bounds(&self) -> Result<Bounds>;

    /// Work area of the display hosting the window.
    fn work_area(&self) -> Result<ScreenMetrics>;

    fn set_bounds(&self, bounds: Bounds) -> Result<()>;

    fn set_position(&self, position: Position) -> Result<()>;

    /// `ignore = true` lets clicks fall through to whatever is underneath.
    /// With `forward`, hover events still reach the webview so widgets can
    /// claim the mouse back.
    fn set_ignore_mouse_events(&self, ignore: bool, forward: bool) -> Result<()>;

    fn set_opacity(&self, opacity: f64) -> Result<()>;

    /// Show without taking keyboard focus.
    fn show_inactive(&self) -> Result<()>;

    fn hide(&self) -> Result<()>;

    fn focus(&self) -> Result<()>;

    fn set_always_on_top(&self, on_top: bool) -> Result<()>;

    fn set_visible_on_all_workspaces(&self, visible: bool) -> Result<()>;

    /// Exclude the window from screen capture.
    fn set_content_protection(&self, enabled: bool) -> Result<()>;
}

/// Window events the controller subscribes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSignal {
    Moved(Position),
    Resized(Size),
    Destroyed,
}

/// Operations bound to global shortcuts and the tray menu.
pub trait OverlayControl: Send + Sync {
    fn toggle_visibility(&self);
    fn toggle_edit_mode(&self);
    fn exit_edit_mode(&self);
    fn move_left(&self);
    fn move_right(&self);
    fn move_up(&self);
    fn move_down(&self);
    fn show_settings(&self);
    fn request_capture(&self);
}
