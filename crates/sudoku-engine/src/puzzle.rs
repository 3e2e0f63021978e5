use log::debug;
use rand::RngExt;
use rand::rng;
use rand::seq::SliceRandom;

use crate::board::{BLOCK_SIZE, GRID_SIZE, Grid, Position, SolvedBoard};
use crate::difficulty::{Difficulty, RevealProfile};

/// Check if placing `val` at (row, col) would leave the row, column, and
/// 3x3 block free of duplicates.
fn is_safe(grid: &SolvedBoard, row: usize, col: usize, val: u8) -> bool {
    for c in 0..9 {
        if grid[row][c] == val {
            return false;
        }
    }
    for r in 0..9 {
        if grid[r][col] == val {
            return false;
        }
    }
    let box_r = (row / 3) * 3;
    let box_c = (col / 3) * 3;
    for r in box_r..box_r + 3 {
        for c in box_c..box_c + 3 {
            if grid[r][c] == val {
                return false;
            }
        }
    }
    true
}

/// Fill the board by backtracking over cells in row-major order, with an
/// explicit stack instead of recursion: one frame per placed cell holding
/// the candidates not yet tried there. Candidates are shuffled so
/// successive runs produce different boards. Returns false only when the
/// first cell exhausts all nine digits.
fn fill(grid: &mut SolvedBoard) -> bool {
    let mut rng = rng();
    let mut stack: Vec<Vec<u8>> = Vec::with_capacity(GRID_SIZE);

    while stack.len() < GRID_SIZE {
        let mut candidates: Vec<u8> = (1..=9).collect();
        candidates.shuffle(&mut rng);
        stack.push(candidates);

        // place the next safe candidate at the deepest cell, unwinding
        // while none fits
        loop {
            let depth = stack.len() - 1;
            let (row, col) = (depth / BLOCK_SIZE, depth % BLOCK_SIZE);
            grid[row][col] = 0;

            let Some(candidates) = stack.last_mut() else {
                return false;
            };
            let mut placed = None;
            while let Some(val) = candidates.pop() {
                if is_safe(grid, row, col, val) {
                    placed = Some(val);
                    break;
                }
            }

            match placed {
                Some(val) => {
                    grid[row][col] = val;
                    break;
                }
                None => {
                    stack.pop();
                    if stack.is_empty() {
                        return false;
                    }
                }
            }
        }
    }
    true
}

/// Generate a complete valid solution board.
pub fn generate_solution() -> SolvedBoard {
    let mut grid: SolvedBoard = [[0u8; 9]; 9];
    let filled = fill(&mut grid);
    // An empty 9x9 grid is always completable, so the search cannot
    // exhaust at the top level.
    assert!(filled, "backtracking fill exhausted on an empty 9x9 grid");
    debug!("generated complete solution board");
    grid
}

/// Reveal solution digits block by block according to the profile: pick
/// `block_count` distinct random blocks, and in each one copy between
/// `min_reveal` and `max_reveal` solution digits into distinct cells
/// (re-drawing on collision with an already-revealed cell).
pub fn mask(solved: &SolvedBoard, profile: RevealProfile) -> Grid {
    let mut rng = rng();
    let mut grid = Grid::new();
    let mut processed = [false; BLOCK_SIZE];
    let mut blocks_done = 0;

    // only 9 blocks exist and each holds 9 cells; clamp caller-built
    // profiles so both sampling loops can terminate
    let block_count = profile.block_count.min(BLOCK_SIZE);
    let max_reveal = profile.max_reveal.min(BLOCK_SIZE);
    let min_reveal = profile.min_reveal.min(max_reveal);

    while blocks_done < block_count {
        let block: usize = rng.random_range(0..BLOCK_SIZE);
        if processed[block] {
            continue;
        }
        processed[block] = true;
        blocks_done += 1;

        let target = rng.random_range(min_reveal..=max_reveal);
        let mut revealed = 0;
        while revealed < target {
            let offset: usize = rng.random_range(0..BLOCK_SIZE);
            let pos = Position::in_block(block, offset);
            if grid.cell(pos).is_given() {
                continue;
            }
            grid.cell_mut(pos).set_given(Some(solved[pos.row()][pos.col()]));
            revealed += 1;
        }
    }

    debug!(
        "masked puzzle: {} givens across {} blocks",
        grid.given_count(),
        block_count
    );
    grid
}

/// Generate a puzzle with the given difficulty.
pub fn generate_puzzle(difficulty: Difficulty) -> (Grid, SolvedBoard) {
    let solution = generate_solution();
    let grid = mask(&solution, difficulty.profile());
    (grid, solution)
}
