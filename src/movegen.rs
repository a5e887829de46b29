// Candidate move generation
//
// The search frontier is restricted to empty cells touching at least one stone,
// which keeps branching proportional to the stones on the board rather than to
// its fixed 225-cell area.

use crate::board::Board;
use crate::simple_profiler::{Category, ProfileGuard};
use crate::types::{GameError, Move};

/// Number of occupied cells among the up-to-8 neighbors of (row, col)
pub fn occupied_neighbors(board: &Board, row: usize, col: usize) -> Result<usize, GameError> {
    let at = Move::new(row, col)?;
    Ok(neighbors(at).filter(|&n| board.at(n).is_some()).count())
}

/// Every empty cell, row-major
pub fn all_empty_cells(board: &Board) -> Vec<Move> {
    Board::coordinates()
        .filter(|&m| board.at(m).is_none())
        .collect()
}

/// Empty cells with at least one occupied neighbor, row-major.
/// Falls back to every empty cell when there are none (only an empty board).
pub fn adjacent_empty_cells(board: &Board) -> Vec<Move> {
    let _guard = ProfileGuard::new(Category::Candidates);

    let moves: Vec<Move> = Board::coordinates()
        .filter(|&m| board.at(m).is_none() && has_occupied_neighbor(board, m))
        .collect();

    if moves.is_empty() {
        return all_empty_cells(board);
    }
    moves
}

#[inline]
fn has_occupied_neighbor(board: &Board, at: Move) -> bool {
    neighbors(at).any(|n| board.at(n).is_some())
}

/// The 8 surrounding cells, clipped at the board edges
fn neighbors(at: Move) -> impl Iterator<Item = Move> {
    (-1isize..=1)
        .flat_map(|dr| (-1isize..=1).map(move |dc| (dr, dc)))
        .filter(|&(dr, dc)| (dr, dc) != (0, 0))
        .filter_map(move |(dr, dc)| at.offset(dr, dc))
}
