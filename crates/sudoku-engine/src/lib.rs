pub mod board;
pub mod difficulty;
pub mod game;
pub mod history;
pub mod puzzle;
pub mod validation;

pub use board::{
    BLOCK_SIZE, Cell, GRID_SIZE, Grid, InvalidPosition, ParseGridError, Position, SolvedBoard,
};
pub use difficulty::{Difficulty, RevealProfile};
pub use game::{EditMode, Game, MoveDirection};
pub use history::{Action, History};
pub use puzzle::{generate_puzzle, generate_solution, mask};
pub use validation::{is_complete_solution, is_solved, revalidate};
