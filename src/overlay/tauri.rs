//! [`OverlayWindow`] backed by a Tauri webview window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tauri::{PhysicalPosition, PhysicalSize, WebviewWindow, WindowEvent};

use super::geometry::{Bounds, Position, ScreenMetrics, Size};
use super::{OverlayWindow, WindowSignal};
use crate::error::{CogniError, Result};
use crate::runtime::{OverlayEvent, OverlayRuntime};

fn window_err(e: tauri::Error) -> CogniError {
    CogniError::Window(e.to_string())
}

pub struct TauriOverlayWindow {
    window: WebviewWindow,
    destroyed: AtomicBool,
    /// Opacity is applied by the webview itself; Tauri has no window alpha.
    runtime: Arc<dyn OverlayRuntime>,
}

impl TauriOverlayWindow {
    pub fn new(window: WebviewWindow, runtime: Arc<dyn OverlayRuntime>) -> Self {
        Self {
            window,
            destroyed: AtomicBool::new(false),
            runtime,
        }
    }

    /// Translate a platform window event, marking the handle dead on destroy.
    pub fn signal(&self, event: &WindowEvent) -> Option<WindowSignal> {
        let signal = to_signal(event)?;
        if signal == WindowSignal::Destroyed {
            self.destroyed.store(true, Ordering::SeqCst);
        }
        Some(signal)
    }
}

pub fn to_signal(event: &WindowEvent) -> Option<WindowSignal> {
    match event {
        WindowEvent::Moved(p) => Some(WindowSignal::Moved(Position { x: p.x, y: p.y })),
        WindowEvent::Resized(s) => Some(WindowSignal::Resized(Size {
            width: s.width,
            height: s.height,
        })),
        WindowEvent::Destroyed => Some(WindowSignal::Destroyed),
        _ => None,
    }
}

impl OverlayWindow for TauriOverlayWindow {
    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn bounds(&self) -> Result<Bounds> {
        let position = self.window.outer_position().map_err(window_err)?;
        let size = self.window.outer_size().map_err(window_err)?;
        Ok(Bounds {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        })
    }

    fn work_area(&self) -> Result<ScreenMetrics> {
        let monitor = match self.window.current_monitor().map_err(window_err)? {
            Some(monitor) => monitor,
            None => self
                .window
                .primary_monitor()
                .map_err(window_err)?
                .ok_or_else(|| CogniError::Window("no display available".to_string()))?,
        };

        // Excludes the taskbar, dock and menu bar
        let area = monitor.work_area();
        Ok(ScreenMetrics {
            x: area.position.x,
            y: area.position.y,
            width: area.size.width,
            height: area.size.height,
        })
    }

    fn set_bounds(&self, bounds: Bounds) -> Result<()> {
        self.window
            .set_size(PhysicalSize::new(bounds.width, bounds.height))
            .map_err(window_err)?;
        self.window
            .set_position(PhysicalPosition::new(bounds.x, bounds.y))
            .map_err(window_err)
    }

    fn set_position(&self, position: Position) -> Result<()> {
        self.window
            .set_position(PhysicalPosition::new(position.x, position.y))
            .map_err(window_err)
    }

    fn set_ignore_mouse_events(&self, ignore: bool, forward: bool) -> Result<()> {
        // Hover forwarding is not exposed by Tauri; widgets re-enable the
        // mouse through set_mouse_ignore instead.
        tracing::trace!("ignore cursor events: {} (forward requested: {})", ignore, forward);
        self.window.set_ignore_cursor_events(ignore).map_err(window_err)
    }

    fn set_opacity(&self, opacity: f64) -> Result<()> {
        self.runtime
            .emit(OverlayEvent::Opacity { value: opacity })
            .map_err(|e| CogniError::Window(e.to_string()))
    }

    fn show_inactive(&self) -> Result<()> {
        self.window.show().map_err(window_err)
    }

    fn hide(&self) -> Result<()> {
        self.window.hide().map_err(window_err)
    }

    fn focus(&self) -> Result<()> {
        self.window.set_focus().map_err(window_err)
    }

    fn set_always_on_top(&self, on_top: bool) -> Result<()> {
        self.window.set_always_on_top(on_top).map_err(window_err)
    }

    fn set_visible_on_all_workspaces(&self, visible: bool) -> Result<()> {
        self.window
            .set_visible_on_all_workspaces(visible)
            .map_err(window_err)
    }

    fn set_content_protection(&self, enabled: bool) -> Result<()> {
        self.window.set_content_protected(enabled).map_err(window_err)
    }
}
