use super::{OverlayEvent, OverlayRuntime, RuntimeError};
use async_trait::async_trait;
use tauri::{AppHandle, Emitter};

pub struct TauriRuntime {
    app_handle: AppHandle,
}

impl TauriRuntime {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

#[async_trait]
impl OverlayRuntime for TauriRuntime {
    fn emit(&self, event: OverlayEvent) -> Result<(), RuntimeError> {
        tracing::trace!("emit {}", event.channel());
        self.app_handle
            .emit(event.channel(), event.payload())
            .map_err(|e| RuntimeError::EmitFailed(e.to_string()))
    }

    async fn shutdown(&self) -> Result<(), RuntimeError> {
        Ok(())
    }
}
