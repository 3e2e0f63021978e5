use crate::board::{BLOCK_SIZE, Grid, Position, SolvedBoard};

fn row_group(row: usize) -> [Position; 9] {
    std::array::from_fn(|col| Position::new(row, col))
}

fn col_group(col: usize) -> [Position; 9] {
    std::array::from_fn(|row| Position::new(row, col))
}

fn block_group(block: usize) -> [Position; 9] {
    std::array::from_fn(|offset| Position::in_block(block, offset))
}

/// Tally effective values across one 9-cell group and flag every holder
/// of a duplicated digit. Flags are only ever set here, never cleared, so
/// passes over the three partition families compose in any order.
fn validate_group(grid: &mut Grid, group: &[Position; 9]) {
    let mut counts = [0u8; 10];
    for &pos in group {
        if let Some(v) = grid.cell(pos).effective_value() {
            counts[v as usize] += 1;
        }
    }

    for digit in 1..=9u8 {
        if counts[digit as usize] > 1 {
            for &pos in group {
                if grid.cell(pos).effective_value() == Some(digit) {
                    grid.cell_mut(pos).set_error(true);
                }
            }
        }
    }
}

/// Marks duplicate digits within each row. Additive; callers clear error
/// flags first (or use [`revalidate`]).
pub fn validate_rows(grid: &mut Grid) {
    for row in 0..BLOCK_SIZE {
        validate_group(grid, &row_group(row));
    }
}

/// Marks duplicate digits within each column.
pub fn validate_cols(grid: &mut Grid) {
    for col in 0..BLOCK_SIZE {
        validate_group(grid, &col_group(col));
    }
}

/// Marks duplicate digits within each 3x3 block.
pub fn validate_blocks(grid: &mut Grid) {
    for block in 0..BLOCK_SIZE {
        validate_group(grid, &block_group(block));
    }
}

/// Clears every error flag, then recomputes them from scratch across all
/// three partition families.
pub fn revalidate(grid: &mut Grid) {
    grid.clear_errors();
    validate_rows(grid);
    validate_cols(grid);
    validate_blocks(grid);
}

fn group_is_permutation(board: &SolvedBoard, group: &[Position; 9]) -> bool {
    let mut seen = [false; 10];
    for &pos in group {
        let v = board[pos.row()][pos.col()] as usize;
        if v < 1 || v > 9 || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Check that every row, column, and block is a permutation of 1-9.
pub fn is_complete_solution(board: &SolvedBoard) -> bool {
    for i in 0..BLOCK_SIZE {
        if !group_is_permutation(board, &row_group(i))
            || !group_is_permutation(board, &col_group(i))
            || !group_is_permutation(board, &block_group(i))
        {
            return false;
        }
    }
    true
}

/// Check whether the grid's effective values form a complete valid
/// solution. Pure query, no side effects.
pub fn is_solved(grid: &Grid) -> bool {
    let mut board: SolvedBoard = [[0u8; 9]; 9];
    for pos in Position::all() {
        board[pos.row()][pos.col()] = grid.effective_value(pos).unwrap_or(0);
    }
    is_complete_solution(&board)
}
