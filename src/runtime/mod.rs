// Runtime abstraction for pushing events to the UI layer
//
// The Tauri runtime emits on the webview's event bus; the channel runtime feeds
// a tokio mpsc receiver and backs headless use and tests.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::overlay::components::OverlayComponent;

/// Runtime-specific errors
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Failed to emit event: {0}")]
    EmitFailed(String),

    #[error("Event receiver closed")]
    ReceiverClosed,
}

/// Events pushed from the controllers to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayEvent {
    /// A widget was shown or hidden from the tray menu
    ComponentVisibilityChanged {
        component: OverlayComponent,
        visible: bool,
    },

    /// Open the settings dialog
    ShowSettingsDialog,

    /// Edit mode was entered (`true`) or left (`false`)
    EditModeChanged { edit_mode: bool },

    /// Webview opacity to apply
    Opacity { value: f64 },

    /// The take-screenshot shortcut fired; the capture collaborator takes over
    CaptureRequested,

    /// Clear all transient view state
    ResetView,
}

impl OverlayEvent {
    /// Channel name on the UI event bus.
    pub fn channel(&self) -> &'static str {
        match self {
            OverlayEvent::ComponentVisibilityChanged { .. } => "component-visibility-changed",
            OverlayEvent::ShowSettingsDialog => "show-settings-dialog",
            OverlayEvent::EditModeChanged { .. } => "edit-mode-changed",
            OverlayEvent::Opacity { .. } => "overlay-opacity",
            OverlayEvent::CaptureRequested => "capture-requested",
            OverlayEvent::ResetView => "reset-view",
        }
    }

    /// Payload carried on the channel, in the shape the UI listeners expect.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            OverlayEvent::ComponentVisibilityChanged { component, visible } => {
                serde_json::json!({ "component": component, "visible": visible })
            }
            OverlayEvent::EditModeChanged { edit_mode } => serde_json::json!(edit_mode),
            OverlayEvent::Opacity { value } => serde_json::json!(value),
            OverlayEvent::ShowSettingsDialog
            | OverlayEvent::CaptureRequested
            | OverlayEvent::ResetView => serde_json::Value::Null,
        }
    }
}

/// Event sink for the UI layer.
///
/// # Object Safety
/// This trait is object-safe and intended to be used as `Arc<dyn OverlayRuntime>`.
#[async_trait]
pub trait OverlayRuntime: Send + Sync + 'static {
    /// Emit an event to the frontend
    ///
    /// # Errors
    /// Returns `RuntimeError::EmitFailed` if the event cannot be delivered.
    fn emit(&self, event: OverlayEvent) -> Result<(), RuntimeError>;

    /// Graceful shutdown - flush events, close channels, etc.
    async fn shutdown(&self) -> Result<(), RuntimeError>;
}

pub mod channel;
#[cfg(feature = "tauri")]
pub mod tauri;

pub use channel::ChannelRuntime;
#[cfg(feature = "tauri")]
pub use self::tauri::TauriRuntime;
