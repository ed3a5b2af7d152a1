//! Top-level update function: routes each message to the reducer that
//! owns it and returns the side-effect commands to execute afterwards.

use crate::messages::{Command, Message};
use crate::reducers;
use crate::state::AppState;

pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut cmds = Vec::new();

    if reducers::project::update(state, &msg, &mut cmds) {
        return cmds;
    }
    if reducers::canvas::update(state, &msg, &mut cmds) {
        return cmds;
    }

    crate::debug_log!("unhandled message: {:?}", msg);
    cmds
}
