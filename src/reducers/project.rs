//! Project data reducer: installs the adapter snapshot fetched at editor
//! mount.

use crate::messages::{Command, Message};
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::ProjectDataLoaded { models, indexes } => {
            crate::debug_log!(
                "project data loaded: {} models, {} indexes",
                models.len(),
                indexes.len()
            );
            state.project_models = models.clone();
            state.project_indexes = indexes.clone();

            // Picklist sources changed; rebuild the panel if a node is
            // showing.
            if state.graph.selected_node_id().is_some() {
                cmds.push(Command::UpdateUI(Box::new(|| {
                    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                        let _ = crate::components::config_panel::refresh(&doc);
                    }
                })));
            }
            true
        }
        _ => false,
    }
}
