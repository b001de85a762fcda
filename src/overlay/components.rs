//! Which overlay widgets are currently shown.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::runtime::{OverlayEvent, OverlayRuntime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayComponent {
    ControlBar,
    SuggestionArea,
    NotesComponent,
}

impl OverlayComponent {
    pub const ALL: [OverlayComponent; 3] = [
        OverlayComponent::ControlBar,
        OverlayComponent::SuggestionArea,
        OverlayComponent::NotesComponent,
    ];

    /// Stable identifier, also used for tray menu item ids.
    pub fn id(&self) -> &'static str {
        match self {
            OverlayComponent::ControlBar => "controlBar",
            OverlayComponent::SuggestionArea => "suggestionArea",
            OverlayComponent::NotesComponent => "notesComponent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverlayComponent::ControlBar => "Control Bar",
            OverlayComponent::SuggestionArea => "Suggestion Area",
            OverlayComponent::NotesComponent => "Notes Component",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVisibility {
    pub control_bar: bool,
    pub suggestion_area: bool,
    pub notes_component: bool,
}

impl Default for ComponentVisibility {
    fn default() -> Self {
        Self {
            control_bar: true,
            suggestion_area: true,
            notes_component: true,
        }
    }
}

impl ComponentVisibility {
    pub fn get(&self, component: OverlayComponent) -> bool {
        match component {
            OverlayComponent::ControlBar => self.control_bar,
            OverlayComponent::SuggestionArea => self.suggestion_area,
            OverlayComponent::NotesComponent => self.notes_component,
        }
    }

    fn slot(&mut self, component: OverlayComponent) -> &mut bool {
        match component {
            OverlayComponent::ControlBar => &mut self.control_bar,
            OverlayComponent::SuggestionArea => &mut self.suggestion_area,
            OverlayComponent::NotesComponent => &mut self.notes_component,
        }
    }
}

/// Visibility state shared between the tray menu and IPC.
pub struct ComponentPanel {
    visibility: RwLock<ComponentVisibility>,
    runtime: Arc<dyn OverlayRuntime>,
}

impl ComponentPanel {
    pub fn new(runtime: Arc<dyn OverlayRuntime>) -> Self {
        Self {
            visibility: RwLock::new(ComponentVisibility::default()),
            runtime,
        }
    }

    pub fn visibility(&self) -> ComponentVisibility {
        *self.visibility.read()
    }

    /// Flip one widget and notify the UI. Returns the new visibility.
    pub fn toggle(&self, component: OverlayComponent) -> bool {
        let visible = {
            let mut visibility = self.visibility.write();
            let slot = visibility.slot(component);
            *slot = !*slot;
            *slot
        };

        if let Err(e) = self.runtime.emit(OverlayEvent::ComponentVisibilityChanged {
            component,
            visible,
        }) {
            tracing::warn!("Failed to push visibility change: {}", e);
        }

        tracing::info!("{} visibility toggled to: {}", component.id(), visible);
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::ChannelRuntime;

    #[test]
    fn test_toggle_flips_and_notifies() {
        let (runtime, mut rx) = ChannelRuntime::pair();
        let panel = ComponentPanel::new(Arc::new(runtime));

        assert!(!panel.toggle(OverlayComponent::SuggestionArea));
        assert!(!panel.visibility().suggestion_area);
        assert!(panel.visibility().control_bar);

        assert_eq!(
            rx.try_recv().unwrap(),
            OverlayEvent::ComponentVisibilityChanged {
                component: OverlayComponent::SuggestionArea,
                visible: false,
            }
        );

        assert!(panel.toggle(OverlayComponent::SuggestionArea));
        assert!(panel.visibility().suggestion_area);
    }

    #[test]
    fn test_ids_round_trip_and_serialize_camel_case() {
        for component in OverlayComponent::ALL {
            assert_eq!(OverlayComponent::from_id(component.id()), Some(component));
        }
        assert_eq!(OverlayComponent::from_id("quit"), None);

        let json = serde_json::to_value(ComponentVisibility::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"controlBar": true, "suggestionArea": true, "notesComponent": true})
        );
    }
}
