use super::{OverlayEvent, OverlayRuntime, RuntimeError};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Runtime that forwards every event into an unbounded channel.
pub struct ChannelRuntime {
    event_tx: mpsc::UnboundedSender<OverlayEvent>,
}

impl ChannelRuntime {
    pub fn new(event_tx: mpsc::UnboundedSender<OverlayEvent>) -> Self {
        Self { event_tx }
    }

    /// Build a runtime together with the receiving end.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<OverlayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl OverlayRuntime for ChannelRuntime {
    fn emit(&self, event: OverlayEvent) -> Result<(), RuntimeError> {
        self.event_tx
            .send(event)
            .map_err(|_| RuntimeError::ReceiverClosed)?;
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), RuntimeError> {
        // No cleanup needed - channel drop handles it
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_receiver() {
        let (runtime, mut rx) = ChannelRuntime::pair();
        runtime.emit(OverlayEvent::ResetView).unwrap();
        assert_eq!(rx.try_recv().unwrap(), OverlayEvent::ResetView);
    }

    #[test]
    fn test_emit_after_receiver_dropped() {
        let (runtime, rx) = ChannelRuntime::pair();
        drop(rx);
        assert!(matches!(
            runtime.emit(OverlayEvent::ShowSettingsDialog),
            Err(RuntimeError::ReceiverClosed)
        ));
    }
}
