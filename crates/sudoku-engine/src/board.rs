use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Cells per row, column, or 3x3 block.
pub const BLOCK_SIZE: usize = 9;
/// Total number of cells on the board.
pub const GRID_SIZE: usize = BLOCK_SIZE * BLOCK_SIZE;

/// A complete solution backing a generated puzzle. Never shown to the
/// player; consulted only for reveals and the solved check.
pub type SolvedBoard = [[u8; 9]; 9];

/// A cell index in `[0, 80]`, row-major. Row, column, and block membership
/// are derived, not stored. Deserialization goes through the same range
/// check as the constructors, so an invalid persisted index is an error,
/// not a latent panic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Position(u8);

/// A raw cell index outside `[0, 80]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
#[display("cell index {_0} is out of range")]
pub struct InvalidPosition(#[error(not(source))] u8);

impl TryFrom<u8> for Position {
    type Error = InvalidPosition;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        ((index as usize) < GRID_SIZE)
            .then_some(Position(index))
            .ok_or(InvalidPosition(index))
    }
}

impl Position {
    pub const FIRST: Position = Position(0);

    /// Builds a position from a raw index, rejecting anything past the
    /// last cell.
    pub fn from_index(index: usize) -> Option<Position> {
        (index < GRID_SIZE).then(|| Position(index as u8))
    }

    /// Builds a position from row/column coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is 9 or more.
    pub fn new(row: usize, col: usize) -> Position {
        assert!(row < BLOCK_SIZE && col < BLOCK_SIZE, "cell coordinates out of range");
        Position((row * BLOCK_SIZE + col) as u8)
    }

    /// Cell `offset` (0..9, row-major within the block) of 3x3 block
    /// `block` (0..9, row-major across the board).
    ///
    /// # Panics
    ///
    /// Panics if `block` or `offset` is 9 or more.
    pub fn in_block(block: usize, offset: usize) -> Position {
        assert!(block < BLOCK_SIZE && offset < BLOCK_SIZE, "block coordinates out of range");
        let row = (block / 3) * 3 + offset / 3;
        let col = (block % 3) * 3 + offset % 3;
        Position::new(row, col)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.0 as usize / BLOCK_SIZE
    }

    pub fn col(self) -> usize {
        self.0 as usize % BLOCK_SIZE
    }

    pub fn block(self) -> usize {
        (self.row() / 3) * 3 + self.col() / 3
    }

    /// All 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE as u8).map(Position)
    }
}

/// Per-position state: the puzzle clue, the player's entry, hint
/// annotations, and the transient error/selection flags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    given: Option<u8>,
    value: Option<u8>,
    revealed: Option<u8>,
    row_hints: Vec<u8>,
    block_hints: Vec<u8>,
    is_error: bool,
    is_selected: bool,
}

impl Cell {
    pub fn given(&self) -> Option<u8> {
        self.given
    }

    pub fn value(&self) -> Option<u8> {
        self.value
    }

    pub fn revealed(&self) -> Option<u8> {
        self.revealed
    }

    /// The digit considered "in" this cell for validation and solved
    /// checks: the player's entry if present, else the given clue.
    pub fn effective_value(&self) -> Option<u8> {
        self.value.or(self.given)
    }

    /// Hints read as empty while a value is committed.
    pub fn row_hints(&self) -> &[u8] {
        if self.value.is_some() { &[] } else { &self.row_hints }
    }

    /// Hints read as empty while a value is committed.
    pub fn block_hints(&self) -> &[u8] {
        if self.value.is_some() { &[] } else { &self.block_hints }
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn is_given(&self) -> bool {
        self.given.is_some()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed.is_some()
    }

    /// A clue supersedes whatever the player had entered.
    pub(crate) fn set_given(&mut self, given: Option<u8>) {
        self.given = given;
        if given.is_some() {
            self.value = None;
        }
    }

    /// Ignored while a given is present.
    pub(crate) fn set_value(&mut self, value: Option<u8>) {
        if self.given.is_some() {
            return;
        }
        self.value = value;
    }

    /// Copies `digit` into the cell and freezes it until reset.
    pub(crate) fn set_revealed(&mut self, digit: u8) {
        self.revealed = Some(digit);
        self.set_value(Some(digit));
    }

    pub(crate) fn toggle_row_hint(&mut self, digit: u8) {
        Self::toggle_hint(&mut self.row_hints, digit);
    }

    pub(crate) fn toggle_block_hint(&mut self, digit: u8) {
        Self::toggle_hint(&mut self.block_hints, digit);
    }

    pub(crate) fn clear_row_hints(&mut self) {
        self.row_hints.clear();
    }

    pub(crate) fn clear_block_hints(&mut self) {
        self.block_hints.clear();
    }

    fn toggle_hint(hints: &mut Vec<u8>, digit: u8) {
        if hints.contains(&digit) {
            hints.retain(|&v| v != digit);
        } else {
            hints.push(digit);
            hints.sort();
        }
    }

    pub(crate) fn set_error(&mut self, is_error: bool) {
        self.is_error = is_error;
    }

    pub(crate) fn set_selected(&mut self, is_selected: bool) {
        self.is_selected = is_selected;
    }

    /// Back to the puzzle's initial state: the clue survives, everything
    /// the player did does not.
    pub(crate) fn reset_player_state(&mut self) {
        self.value = None;
        self.revealed = None;
        self.row_hints.clear();
        self.block_hints.clear();
        self.is_error = false;
    }
}

/// The 81-cell board plus the selection cursor. Exactly one cell carries
/// the selected flag at all times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Cell; 9]; 9],
    selected: Position,
}

impl Grid {
    pub fn new() -> Grid {
        let mut grid = Grid {
            cells: std::array::from_fn(|_| std::array::from_fn(|_| Cell::default())),
            selected: Position::FIRST,
        };
        grid.cell_mut(Position::FIRST).set_selected(true);
        grid
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row()][pos.col()]
    }

    pub(crate) fn cell_mut(&mut self, pos: Position) -> &mut Cell {
        &mut self.cells[pos.row()][pos.col()]
    }

    pub fn selected(&self) -> Position {
        self.selected
    }

    /// Moves the selection flag from the previous cell to `pos`.
    pub fn select(&mut self, pos: Position) {
        let prev = self.selected;
        self.cell_mut(prev).set_selected(false);
        self.cell_mut(pos).set_selected(true);
        self.selected = pos;
    }

    pub fn effective_value(&self, pos: Position) -> Option<u8> {
        self.cell(pos).effective_value()
    }

    pub fn given_count(&self) -> usize {
        Position::all().filter(|&pos| self.cell(pos).is_given()).count()
    }

    pub fn clear_errors(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.set_error(false);
            }
        }
    }

    /// Clears all player state back to the givens and moves the selection
    /// to the first cell.
    pub(crate) fn reset_player_state(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.reset_player_state();
            }
        }
        self.select(Position::FIRST);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, Error)]
pub enum ParseGridError {
    #[display("expected 9 rows, found {_0}")]
    RowCount(#[error(not(source))] usize),
    #[display("row {row} has {len} cells, expected 9")]
    RowLength { row: usize, len: usize },
    #[display("invalid character {ch:?} at row {row}, column {col}")]
    InvalidChar { ch: char, row: usize, col: usize },
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses a puzzle from 9 lines of 9 characters. Digits become givens;
    /// `-`, `.`, and `0` are empty cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().collect();
        if rows.len() != BLOCK_SIZE {
            return Err(ParseGridError::RowCount(rows.len()));
        }

        let mut grid = Grid::new();
        for (row, line) in rows.iter().enumerate() {
            let mut len = 0;
            for (col, ch) in line.chars().enumerate() {
                len += 1;
                if len > BLOCK_SIZE {
                    continue;
                }
                match ch {
                    '-' | '.' | '0' => {}
                    '1'..='9' => {
                        grid.cells[row][col].set_given(Some(ch as u8 - b'0'));
                    }
                    _ => return Err(ParseGridError::InvalidChar { ch, row, col }),
                }
            }
            if len != BLOCK_SIZE {
                return Err(ParseGridError::RowLength { row, len });
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_derives_row_col_block() {
        let pos = Position::from_index(40).unwrap();
        assert_eq!(pos.row(), 4);
        assert_eq!(pos.col(), 4);
        assert_eq!(pos.block(), 4);

        let pos = Position::new(8, 0);
        assert_eq!(pos.index(), 72);
        assert_eq!(pos.block(), 6);
    }

    #[test]
    fn position_rejects_out_of_range_index() {
        assert!(Position::from_index(80).is_some());
        assert!(Position::from_index(81).is_none());
    }

    #[test]
    fn deserialized_positions_are_range_checked() {
        let pos: Position = serde_json::from_str("42").unwrap();
        assert_eq!(pos.index(), 42);
        assert_eq!(serde_json::to_string(&pos).unwrap(), "42");

        assert!(serde_json::from_str::<Position>("81").is_err());
        assert!(serde_json::from_str::<Position>("200").is_err());
    }

    #[test]
    fn block_offsets_cover_the_block() {
        // block 4 is the centre 3x3: rows 3..6, cols 3..6
        for offset in 0..9 {
            let pos = Position::in_block(4, offset);
            assert!((3..6).contains(&pos.row()));
            assert!((3..6).contains(&pos.col()));
            assert_eq!(pos.block(), 4);
        }
    }

    #[test]
    fn value_is_ignored_while_given_present() {
        let mut cell = Cell::default();
        cell.set_given(Some(4));
        cell.set_value(Some(7));
        assert_eq!(cell.value(), None);
        assert_eq!(cell.effective_value(), Some(4));
    }

    #[test]
    fn setting_given_clears_player_value() {
        let mut cell = Cell::default();
        cell.set_value(Some(7));
        cell.set_given(Some(4));
        assert_eq!(cell.value(), None);
        assert_eq!(cell.effective_value(), Some(4));
    }

    #[test]
    fn value_shadows_given_in_effective_value() {
        let mut cell = Cell::default();
        cell.set_value(Some(2));
        assert_eq!(cell.effective_value(), Some(2));
    }

    #[test]
    fn hints_read_empty_under_committed_value() {
        let mut cell = Cell::default();
        cell.toggle_row_hint(3);
        cell.toggle_block_hint(5);
        assert_eq!(cell.row_hints(), &[3]);
        assert_eq!(cell.block_hints(), &[5]);

        cell.set_value(Some(1));
        assert!(cell.row_hints().is_empty());
        assert!(cell.block_hints().is_empty());

        // stored hints come back once the value is cleared
        cell.set_value(None);
        assert_eq!(cell.row_hints(), &[3]);
        assert_eq!(cell.block_hints(), &[5]);
    }

    #[test]
    fn hint_toggle_keeps_sorted_unique() {
        let mut cell = Cell::default();
        cell.toggle_row_hint(5);
        cell.toggle_row_hint(2);
        cell.toggle_row_hint(8);
        assert_eq!(cell.row_hints(), &[2, 5, 8]);

        cell.toggle_row_hint(5);
        assert_eq!(cell.row_hints(), &[2, 8]);
    }

    #[test]
    fn exactly_one_cell_selected() {
        let mut grid = Grid::new();
        let selected = |grid: &Grid| {
            Position::all().filter(|&p| grid.cell(p).is_selected()).count()
        };
        assert_eq!(selected(&grid), 1);
        assert!(grid.cell(Position::FIRST).is_selected());

        grid.select(Position::new(4, 7));
        assert_eq!(selected(&grid), 1);
        assert_eq!(grid.selected(), Position::new(4, 7));
    }

    #[test]
    fn parses_puzzle_text() {
        let grid: Grid = "\
-67----3-
1----67--
--9237--6
2---658--
3--7---1-
-98-2---5
6-1-4----
-4----6-1
---61---3"
            .parse()
            .unwrap();

        assert_eq!(grid.cell(Position::new(0, 1)).given(), Some(6));
        assert_eq!(grid.cell(Position::new(0, 0)).given(), None);
        assert_eq!(grid.cell(Position::new(8, 8)).given(), Some(3));
        assert_eq!(grid.given_count(), 31);
    }

    #[test]
    fn parse_rejects_bad_shapes() {
        assert_eq!("---".parse::<Grid>(), Err(ParseGridError::RowCount(1)));

        let short_row = "---------\n----\n---------\n---------\n---------\n\
                         ---------\n---------\n---------\n---------";
        assert_eq!(
            short_row.parse::<Grid>(),
            Err(ParseGridError::RowLength { row: 1, len: 4 })
        );

        let bad_char = "--x------\n---------\n---------\n---------\n---------\n\
                        ---------\n---------\n---------\n---------";
        assert_eq!(
            bad_char.parse::<Grid>(),
            Err(ParseGridError::InvalidChar { ch: 'x', row: 0, col: 2 })
        );
    }

    #[test]
    fn parse_errors_are_plain_errors() {
        let err: Box<dyn std::error::Error> = Box::new("---".parse::<Grid>().unwrap_err());
        assert_eq!(err.to_string(), "expected 9 rows, found 1");
        assert!(err.source().is_none());
    }
}
