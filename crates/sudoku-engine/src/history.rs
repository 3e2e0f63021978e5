use serde::{Deserialize, Serialize};

use crate::board::{Grid, Position};

/// One committed edit to a cell's value. `0` stands for "empty" on both
/// sides of the edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub position: Position,
    pub old_value: u8,
    pub new_value: u8,
}

/// Append-only edit log with single-step linear undo. Cleared whenever
/// the grid is reset or a new puzzle is loaded; no redo stack, no cap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    actions: Vec<Action>,
}

impl History {
    pub fn new() -> History {
        History { actions: Vec::new() }
    }

    /// Append an action, unless it is identical to the latest entry.
    /// Re-applying an edit with no net effect must not pollute the log.
    pub fn record(&mut self, action: Action) {
        if self.actions.last() == Some(&action) {
            return;
        }
        self.actions.push(action);
    }

    /// Pop the latest edit and restore its old value on the grid.
    /// Returns whether an undo occurred. Given and revealed cells never
    /// appear in the log, so no cell-kind check is needed here.
    pub fn undo(&mut self, grid: &mut Grid) -> bool {
        let Some(action) = self.actions.pop() else {
            return false;
        };
        let value = (action.old_value != 0).then_some(action.old_value);
        grid.cell_mut(action.position).set_value(value);
        true
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
