use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Grid, Position, SolvedBoard};
use crate::difficulty::Difficulty;
use crate::history::{Action, History};
use crate::puzzle::generate_puzzle;
use crate::validation::{is_solved, revalidate};

/// How a digit (or clear) passed to [`Game::apply_edit`] is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
    /// Ordinary play: writes the player's value, journaled for undo.
    Value,
    /// Author mode: writes the puzzle clue itself, never journaled.
    Given,
    /// Toggles a digit in the cell's row-hint annotations.
    RowHint,
    /// Toggles a digit in the cell's block-hint annotations.
    BlockHint,
    /// Copies the solution's digit into the cell and freezes it.
    Reveal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

/// One puzzle session: the grid, the solution backing it, and the edit
/// log. Grid, solution, and history are created together on new-game and
/// replaced wholesale.
pub struct Game {
    grid: Grid,
    solution: SolvedBoard,
    difficulty: Difficulty,
    history: History,
}

impl Game {
    pub fn new(difficulty: Difficulty) -> Game {
        let (grid, solution) = generate_puzzle(difficulty);
        Game { grid, solution, difficulty, history: History::new() }
    }

    /// Restores a session from externally persisted parts. The caller is
    /// responsible for handing over a grid that satisfies the cell
    /// invariants; the history always starts empty on load.
    pub fn from_parts(grid: Grid, solution: SolvedBoard, difficulty: Difficulty) -> Game {
        Game { grid, solution, difficulty, history: History::new() }
    }

    /// Replaces grid, solution, and history wholesale.
    pub fn new_game(&mut self, difficulty: Difficulty) {
        let (grid, solution) = generate_puzzle(difficulty);
        self.grid = grid;
        self.solution = solution;
        self.difficulty = difficulty;
        self.history.clear();
        debug!("started new {} game", difficulty.label());
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Applies one edit command and returns whether it was accepted.
    ///
    /// Rejected outright, with no state mutation: digits outside 1-9,
    /// value edits on given or revealed cells, and given/reveal edits on
    /// revealed cells. Entering a digit equal to the cell's current value
    /// (or clue, in author mode) clears it instead. Error flags are
    /// recomputed after every accepted edit that changes an effective
    /// value; hint edits touch neither the history nor the flags.
    pub fn apply_edit(&mut self, pos: Position, digit: Option<u8>, mode: EditMode) -> bool {
        if let Some(d) = digit {
            if !(1..=9).contains(&d) {
                return false;
            }
        }

        let cell = self.grid.cell_mut(pos);
        match mode {
            EditMode::Value => {
                if cell.is_given() || cell.is_revealed() {
                    return false;
                }
                let old = cell.value().unwrap_or(0);
                let new = match digit {
                    Some(d) if cell.value() == Some(d) => None,
                    other => other,
                };
                cell.set_value(new);
                self.history.record(Action {
                    position: pos,
                    old_value: old,
                    new_value: new.unwrap_or(0),
                });
                revalidate(&mut self.grid);
            }
            EditMode::Given => {
                if cell.is_revealed() {
                    return false;
                }
                let new = match digit {
                    Some(d) if cell.given() == Some(d) => None,
                    other => other,
                };
                cell.set_given(new);
                revalidate(&mut self.grid);
            }
            EditMode::RowHint => match digit {
                Some(d) => cell.toggle_row_hint(d),
                None => cell.clear_row_hints(),
            },
            EditMode::BlockHint => match digit {
                Some(d) => cell.toggle_block_hint(d),
                None => cell.clear_block_hints(),
            },
            EditMode::Reveal => {
                if cell.is_given() || cell.is_revealed() {
                    return false;
                }
                let digit = self.solution[pos.row()][pos.col()];
                cell.set_revealed(digit);
                revalidate(&mut self.grid);
            }
        }
        true
    }

    /// Undoes the latest value edit. Returns whether an undo occurred.
    pub fn undo(&mut self) -> bool {
        if !self.history.undo(&mut self.grid) {
            return false;
        }
        revalidate(&mut self.grid);
        true
    }

    pub fn is_solved(&self) -> bool {
        is_solved(&self.grid)
    }

    pub fn revalidate(&mut self) {
        revalidate(&mut self.grid);
    }

    /// Moves the selection one cell, wrapping to the opposite edge.
    /// Up/Down stay in the same column; Left/Right stay in the same row.
    pub fn move_selection(&mut self, direction: MoveDirection) {
        let pos = self.grid.selected();
        let (row, col) = match direction {
            MoveDirection::Up => ((pos.row() + 8) % 9, pos.col()),
            MoveDirection::Down => ((pos.row() + 1) % 9, pos.col()),
            MoveDirection::Left => (pos.row(), (pos.col() + 8) % 9),
            MoveDirection::Right => (pos.row(), (pos.col() + 1) % 9),
        };
        self.grid.select(Position::new(row, col));
    }

    pub fn select(&mut self, pos: Position) {
        self.grid.select(pos);
    }

    /// Clears all player state back to the givens and empties the
    /// history. Revealed cells become editable again.
    pub fn reset(&mut self) {
        self.grid.reset_player_state();
        self.history.clear();
    }
}
