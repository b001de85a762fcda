//! Recording window used by controller, shortcut and tray tests.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::geometry::{Bounds, Position, ScreenMetrics};
use super::OverlayWindow;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum WindowCall {
    SetBounds(Bounds),
    SetPosition(Position),
    IgnoreMouse { ignore: bool, forward: bool },
    Opacity(f64),
    ShowInactive,
    Hide,
    Focus,
    AlwaysOnTop(bool),
    AllWorkspaces(bool),
    ContentProtection(bool),
}

/// Work area reported by [`MockWindow::new`].
pub const DEFAULT_SCREEN: ScreenMetrics = ScreenMetrics {
    x: 0,
    y: 0,
    width: 1920,
    height: 1080,
};

pub struct MockWindow {
    bounds: Mutex<Bounds>,
    screen: ScreenMetrics,
    destroyed: AtomicBool,
    calls: Mutex<Vec<WindowCall>>,
}

impl MockWindow {
    pub fn new(bounds: Bounds) -> Self {
        Self::on_screen(bounds, DEFAULT_SCREEN)
    }

    /// A window on a display with the given work area.
    pub fn on_screen(bounds: Bounds, screen: ScreenMetrics) -> Self {
        Self {
            bounds: Mutex::new(bounds),
            screen,
            destroyed: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<WindowCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn last_call(&self) -> Option<WindowCall> {
        self.calls.lock().last().cloned()
    }

    /// Last click-through setting applied, if any.
    pub fn last_ignore(&self) -> Option<(bool, bool)> {
        self.calls.lock().iter().rev().find_map(|c| match c {
            WindowCall::IgnoreMouse { ignore, forward } => Some((*ignore, *forward)),
            _ => None,
        })
    }

    pub fn last_opacity(&self) -> Option<f64> {
        self.calls.lock().iter().rev().find_map(|c| match c {
            WindowCall::Opacity(v) => Some(*v),
            _ => None,
        })
    }

    /// Simulate the user or OS moving the window behind our back.
    pub fn force_bounds(&self, bounds: Bounds) {
        *self.bounds.lock() = bounds;
    }

    pub fn current_bounds(&self) -> Bounds {
        *self.bounds.lock()
    }

    pub fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: WindowCall) -> Result<()> {
        self.calls.lock().push(call);
        Ok(())
    }
}

impl OverlayWindow for MockWindow {
    fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    fn bounds(&self) -> Result<Bounds> {
        Ok(*self.bounds.lock())
    }

    fn work_area(&self) -> Result<ScreenMetrics> {
        Ok(self.screen)
    }

    fn set_bounds(&self, bounds: Bounds) -> Result<()> {
        *self.bounds.lock() = bounds;
        self.record(WindowCall::SetBounds(bounds))
    }

    fn set_position(&self, position: Position) -> Result<()> {
        {
            let mut bounds = self.bounds.lock();
            bounds.x = position.x;
            bounds.y = position.y;
        }
        self.record(WindowCall::SetPosition(position))
    }

    fn set_ignore_mouse_events(&self, ignore: bool, forward: bool) -> Result<()> {
        self.record(WindowCall::IgnoreMouse { ignore, forward })
    }

    fn set_opacity(&self, opacity: f64) -> Result<()> {
        self.record(WindowCall::Opacity(opacity))
    }

    fn show_inactive(&self) -> Result<()> {
        self.record(WindowCall::ShowInactive)
    }

    fn hide(&self) -> Result<()> {
        self.record(WindowCall::Hide)
    }

    fn focus(&self) -> Result<()> {
        self.record(WindowCall::Focus)
    }

    fn set_always_on_top(&self, on_top: bool) -> Result<()> {
        self.record(WindowCall::AlwaysOnTop(on_top))
    }

    fn set_visible_on_all_workspaces(&self, visible: bool) -> Result<()> {
        self.record(WindowCall::AllWorkspaces(visible))
    }

    fn set_content_protection(&self, enabled: bool) -> Result<()> {
        self.record(WindowCall::ContentProtection(enabled))
    }
}
