//! Visibility, click-through and edit-mode state machine for the overlay.
//!
//! ```text
//! Uninitialized --attach--> Visible <--show/hide--> Hidden
//!                               x
//!                  Overlay (click-through) <--> Edit (interactive)
//! ```
//!
//! Every operation is a logged no-op while no live window is attached.
//! Destruction is terminal: the handle is dropped and never replaced.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use super::geometry::{
    clamp_horizontal, fit_to_content, is_meaningful_content, within_vertical_band, Bounds,
    Position, ScreenMetrics, Size,
};
use super::{OverlayControl, OverlayWindow, WindowSignal};
use crate::error::{CogniError, Result};
use crate::runtime::{OverlayEvent, OverlayRuntime};
use crate::settings::WindowSettings;

/// Opacity at or below which the overlay starts hidden.
const HIDDEN_OPACITY_THRESHOLD: f64 = 0.1;

const SIGNAL_LOCK_TIMEOUT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub full_screen_overlay: bool,
    pub move_step: f64,
    pub reveal_delay: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::from(&WindowSettings::default())
    }
}

impl From<&WindowSettings> for ControllerConfig {
    fn from(settings: &WindowSettings) -> Self {
        Self {
            full_screen_overlay: settings.full_screen_overlay,
            move_step: settings.move_step,
            reveal_delay: Duration::from_millis(settings.reveal_delay_ms),
        }
    }
}

/// Snapshot of the overlay window as the UI sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub is_visible: bool,
    pub is_edit_mode: bool,
    pub is_overlay_mode: bool,
    pub opacity: f64,
    pub has_content: bool,
    pub screen: Option<ScreenMetrics>,
}

struct Inner {
    window: Option<Arc<dyn OverlayWindow>>,
    state: WindowState,
    current_x: f64,
    current_y: f64,
    /// Bumped by every show/hide/destroy; a pending reveal only applies if
    /// the epoch it was scheduled under is still current.
    reveal_epoch: u64,
}

impl Inner {
    /// The attached window, if it is still alive.
    fn live(&self, op: &str) -> Option<Arc<dyn OverlayWindow>> {
        match &self.window {
            Some(window) if !window.is_destroyed() => Some(Arc::clone(window)),
            _ => {
                tracing::warn!("Cannot {}: window not initialized or destroyed", op);
                None
            }
        }
    }

    fn window_height(&self) -> f64 {
        self.state.size.map(|s| s.height as f64).unwrap_or(0.0)
    }

    fn window_width(&self) -> f64 {
        self.state.size.map(|s| s.width as f64).unwrap_or(0.0)
    }

    fn record_bounds(&mut self, bounds: Bounds) {
        self.state.position = Some(bounds.position());
        self.state.size = Some(bounds.size());
        self.current_x = bounds.x as f64;
        self.current_y = bounds.y as f64;
    }

    fn current_position(&self) -> Position {
        Position {
            x: self.current_x.round() as i32,
            y: self.current_y.round() as i32,
        }
    }

    /// Apply the click-through setting implied by the current mode.
    fn apply_click_through(&self, window: &dyn OverlayWindow) {
        if self.state.is_edit_mode {
            check("make window interactive", window.set_ignore_mouse_events(false, false));
            tracing::debug!("Edit mode - window fully interactive");
        } else {
            check("enable click-through", window.set_ignore_mouse_events(true, true));
            tracing::debug!("Overlay mode - click-through enabled");
        }
    }
}

/// Log a failed window-manager call; the operation carries on.
fn check(what: &str, result: Result<()>) {
    if let Err(e) = result {
        tracing::warn!("Failed to {}: {}", what, e);
    }
}

/// Owner of the single overlay window and its interactive state.
pub struct WindowController {
    inner: Arc<Mutex<Inner>>,
    runtime: Arc<dyn OverlayRuntime>,
    config: ControllerConfig,
}

impl WindowController {
    pub fn new(runtime: Arc<dyn OverlayRuntime>, config: ControllerConfig) -> Self {
        let state = WindowState {
            position: None,
            size: None,
            is_visible: false,
            is_edit_mode: false,
            is_overlay_mode: config.full_screen_overlay,
            opacity: 0.0,
            has_content: false,
            screen: None,
        };

        Self {
            inner: Arc::new(Mutex::new(Inner {
                window: None,
                state,
                current_x: 0.0,
                current_y: 0.0,
                reveal_epoch: 0,
            })),
            runtime,
            config,
        }
    }

    /// Take ownership of the overlay window. Called once at startup.
    ///
    /// In overlay mode the window is stretched over the work area. An initial
    /// opacity at or below 0.1 leaves the window transparent and marked hidden.
    pub fn attach(&self, window: Arc<dyn OverlayWindow>, initial_opacity: f64) -> Result<()> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        if inner.window.is_some() {
            return Err(CogniError::InvalidRequest(
                "overlay window already attached".to_string(),
            ));
        }

        let screen = window.work_area()?;
        if inner.state.is_overlay_mode {
            window.set_bounds(screen.bounds())?;
        }
        let bounds = window.bounds()?;

        inner.state.screen = Some(screen);
        inner.record_bounds(bounds);

        check("set always-on-top", window.set_always_on_top(true));
        check(
            "set visible on all workspaces",
            window.set_visible_on_all_workspaces(true),
        );
        check("enable content protection", window.set_content_protection(true));
        check("show window", window.show_inactive());

        let opacity = initial_opacity.clamp(0.0, 1.0);
        if opacity <= HIDDEN_OPACITY_THRESHOLD {
            tracing::info!("Initial opacity {} too low, starting hidden", opacity);
            check("set opacity", window.set_opacity(0.0));
            inner.state.opacity = 0.0;
            inner.state.is_visible = false;
        } else {
            check("set opacity", window.set_opacity(opacity));
            inner.state.opacity = opacity;
            inner.state.is_visible = true;
        }

        inner.apply_click_through(window.as_ref());
        inner.window = Some(window);

        tracing::info!(
            "Overlay window attached at {:?} (screen {}x{})",
            bounds,
            screen.width,
            screen.height
        );
        Ok(())
    }

    pub fn state(&self) -> WindowState {
        self.inner.lock().state.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.lock().state.is_visible
    }

    pub fn is_edit_mode(&self) -> bool {
        self.inner.lock().state.is_edit_mode
    }

    /// Restore the last known bounds and bring the window back, fading in
    /// after the reveal delay.
    pub fn show(&self) {
        let epoch = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            let Some(window) = inner.live("show window") else {
                return;
            };

            if let (Some(position), Some(size)) = (inner.state.position, inner.state.size) {
                check("restore bounds", window.set_bounds(Bounds::new(position, size)));
            }

            check("set always-on-top", window.set_always_on_top(true));
            check(
                "set visible on all workspaces",
                window.set_visible_on_all_workspaces(true),
            );
            check("enable content protection", window.set_content_protection(true));

            // Transparent until the reveal to avoid a flash of stale content
            check("set opacity", window.set_opacity(0.0));
            inner.state.opacity = 0.0;
            check("show window", window.show_inactive());

            inner.state.is_visible = true;
            inner.reveal_epoch += 1;
            inner.reveal_epoch
        };

        self.schedule_reveal(epoch);
        tracing::debug!("Window shown");
    }

    /// Record the current bounds, make the window click-through and hide it.
    pub fn hide(&self) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let Some(window) = inner.live("hide window") else {
            return;
        };

        match window.bounds() {
            Ok(bounds) => inner.record_bounds(bounds),
            Err(e) => tracing::warn!("Failed to read bounds before hiding: {}", e),
        }

        check("enable click-through", window.set_ignore_mouse_events(true, true));
        check("set opacity", window.set_opacity(0.0));
        inner.state.opacity = 0.0;
        check("hide window", window.hide());

        inner.state.is_visible = false;
        inner.reveal_epoch += 1;
        tracing::debug!("Window hidden");
    }

    pub fn toggle_visibility(&self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
        tracing::debug!("Visibility now {}", self.is_visible());
    }

    /// Make the window fully interactive so widgets can be dragged.
    pub fn enter_edit_mode(&self) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let Some(window) = inner.live("enter edit mode") else {
            return;
        };
        if inner.state.is_edit_mode {
            return;
        }

        inner.state.is_edit_mode = true;
        check("make window interactive", window.set_ignore_mouse_events(false, false));
        check("focus window", window.focus());
        self.push(OverlayEvent::EditModeChanged { edit_mode: true });
        tracing::info!("Entered edit mode");
    }

    /// Return to click-through. No-op outside edit mode.
    pub fn exit_edit_mode(&self) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let Some(window) = inner.live("exit edit mode") else {
            return;
        };
        if !inner.state.is_edit_mode {
            return;
        }

        inner.state.is_edit_mode = false;
        check("enable click-through", window.set_ignore_mouse_events(true, true));
        self.push(OverlayEvent::EditModeChanged { edit_mode: false });
        tracing::info!("Exited edit mode");
    }

    pub fn toggle_edit_mode(&self) {
        if self.is_edit_mode() {
            self.exit_edit_mode();
        } else {
            self.enter_edit_mode();
        }
    }

    /// Let a widget claim or release the mouse. Edit mode always stays
    /// interactive.
    pub fn set_mouse_ignore(&self, ignore: bool) {
        let guard = self.inner.lock();
        let Some(window) = guard.live("set mouse ignore") else {
            return;
        };

        if guard.state.is_edit_mode {
            check("make window interactive", window.set_ignore_mouse_events(false, false));
        } else if ignore {
            check("enable click-through", window.set_ignore_mouse_events(true, true));
        } else {
            check("make window interactive", window.set_ignore_mouse_events(false, false));
        }
    }

    pub fn set_has_content(&self, has_content: bool) {
        let mut guard = self.inner.lock();
        Self::update_has_content(&mut guard, has_content);
    }

    fn update_has_content(inner: &mut Inner, has_content: bool) {
        let previous = inner.state.has_content;
        inner.state.has_content = has_content;

        if previous != has_content {
            tracing::debug!("Content state changed: {}", has_content);
            if let Some(window) = inner.live("update click-through") {
                inner.apply_click_through(window.as_ref());
            }
        }
    }

    /// Move the left edge by applying `update` to the current x, clamped so at
    /// most half the window leaves the screen.
    pub fn move_horizontal(&self, update: impl FnOnce(f64) -> f64) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let Some(window) = inner.live("move window") else {
            return;
        };

        let screen = inner.state.screen.unwrap_or_default();
        inner.current_x = clamp_horizontal(update(inner.current_x), inner.window_width(), &screen);

        let position = inner.current_position();
        check("move window", window.set_position(position));
        inner.state.position = Some(position);
    }

    /// Move the top edge by applying `update` to the current y. Targets
    /// outside the vertical band are rejected.
    pub fn move_vertical(&self, update: impl FnOnce(f64) -> f64) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let Some(window) = inner.live("move window") else {
            return;
        };

        let new_y = update(inner.current_y);
        let screen = inner.state.screen.unwrap_or_default();
        if !within_vertical_band(new_y, inner.window_height(), &screen) {
            tracing::debug!(
                "Rejected vertical move to {} (window height {}, work area {}+{})",
                new_y,
                inner.window_height(),
                screen.y,
                screen.height
            );
            return;
        }

        inner.current_y = new_y;
        let position = inner.current_position();
        check("move window", window.set_position(position));
        inner.state.position = Some(position);
    }

    pub fn move_left(&self) {
        let step = self.config.move_step;
        self.move_horizontal(|x| x - step);
    }

    pub fn move_right(&self) {
        let step = self.config.move_step;
        self.move_horizontal(|x| x + step);
    }

    pub fn move_up(&self) {
        let step = self.config.move_step;
        self.move_vertical(|y| y - step);
    }

    pub fn move_down(&self) {
        let step = self.config.move_step;
        self.move_vertical(|y| y + step);
    }

    /// Fit the window to content reported by the UI. Ignored in overlay mode,
    /// where the window always covers the work area.
    pub fn set_dimensions(&self, width: f64, height: f64) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        let Some(window) = inner.live("resize window") else {
            return;
        };
        if inner.state.is_overlay_mode {
            tracing::trace!("Ignoring content dimensions in overlay mode");
            return;
        }

        let screen = match inner.state.screen {
            Some(screen) => screen,
            None => match window.work_area() {
                Ok(screen) => screen,
                Err(e) => {
                    tracing::warn!("Cannot resize window without screen metrics: {}", e);
                    return;
                }
            },
        };
        let current = window
            .bounds()
            .map(|b| b.position())
            .unwrap_or_else(|_| inner.current_position());

        let bounds = fit_to_content(width, height, current, &screen);
        check("resize window", window.set_bounds(bounds));
        inner.record_bounds(bounds);

        Self::update_has_content(inner, is_meaningful_content(width, height));
    }

    /// Switch between the full-screen overlay and a content-sized panel.
    pub fn set_overlay_mode(&self, enabled: bool) {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;
        if inner.state.is_overlay_mode == enabled {
            return;
        }
        inner.state.is_overlay_mode = enabled;
        tracing::info!("Overlay mode: {}", enabled);

        if !enabled {
            return;
        }
        if let (Some(window), Some(screen)) = (inner.live("fill work area"), inner.state.screen) {
            check("fill work area", window.set_bounds(screen.bounds()));
            inner.record_bounds(screen.bounds());
        }
    }

    /// Show the settings dialog: the window must be visible and interactive.
    pub fn show_settings(&self) {
        if !self.is_visible() {
            self.show();
        }

        let guard = self.inner.lock();
        let Some(window) = guard.live("show settings") else {
            return;
        };
        check("make window interactive", window.set_ignore_mouse_events(false, false));
        self.push(OverlayEvent::ShowSettingsDialog);
    }

    /// Ask the capture collaborator in the UI layer for a screenshot.
    pub fn request_capture(&self) {
        self.push(OverlayEvent::CaptureRequested);
    }

    /// Track platform window events.
    pub fn handle_window_event(&self, signal: WindowSignal) {
        // Some platforms raise move/resize synchronously from inside our own
        // window calls, while the lock is held. Those bounds are recorded by
        // the operation itself.
        let Some(mut guard) = self.inner.try_lock_for(SIGNAL_LOCK_TIMEOUT) else {
            tracing::trace!("Dropping {:?} raised during a window operation", signal);
            return;
        };
        let inner = &mut *guard;

        match signal {
            WindowSignal::Moved(position) => {
                inner.state.position = Some(position);
                inner.current_x = position.x as f64;
                inner.current_y = position.y as f64;
            }
            WindowSignal::Resized(size) => {
                inner.state.size = Some(size);
            }
            WindowSignal::Destroyed => {
                inner.window = None;
                inner.state.is_visible = false;
                inner.state.position = None;
                inner.state.size = None;
                inner.reveal_epoch += 1;
                tracing::info!("Overlay window destroyed");
            }
        }
    }

    fn push(&self, event: OverlayEvent) {
        if let Err(e) = self.runtime.emit(event) {
            tracing::warn!("Failed to push event to UI: {}", e);
        }
    }

    /// Restore full opacity after the reveal delay, unless the window was
    /// hidden or destroyed in the meantime.
    fn schedule_reveal(&self, epoch: u64) {
        let inner = Arc::clone(&self.inner);
        let delay = self.config.reveal_delay;

        let reveal = move || {
            let mut guard = inner.lock();
            let inner = &mut *guard;
            if inner.reveal_epoch != epoch || !inner.state.is_visible {
                return;
            }
            match &inner.window {
                Some(window) if !window.is_destroyed() => {
                    check("restore opacity", window.set_opacity(1.0));
                    inner.state.opacity = 1.0;
                }
                _ => tracing::debug!("Skipping reveal, window is gone"),
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    reveal();
                });
            }
            Err(_) => {
                std::thread::spawn(move || {
                    std::thread::sleep(delay);
                    reveal();
                });
            }
        }
    }
}

impl OverlayControl for WindowController {
    fn toggle_visibility(&self) {
        WindowController::toggle_visibility(self);
    }

    fn toggle_edit_mode(&self) {
        WindowController::toggle_edit_mode(self);
    }

    fn exit_edit_mode(&self) {
        WindowController::exit_edit_mode(self);
    }

    fn move_left(&self) {
        WindowController::move_left(self);
    }

    fn move_right(&self) {
        WindowController::move_right(self);
    }

    fn move_up(&self) {
        WindowController::move_up(self);
    }

    fn move_down(&self) {
        WindowController::move_down(self);
    }

    fn show_settings(&self) {
        WindowController::show_settings(self);
    }

    fn request_capture(&self) {
        WindowController::request_capture(self);
    }
}
