// Line viability heuristic and whole-board evaluation
//
// A line through a stone is viable when its stones plus the empty room directly
// beyond both ends could still reach five. Viable lines score 2^stones, so long
// runs and stones sitting on several viable lines (forks) dominate.

use crate::board::Board;
use crate::config::ScoresConfig;
use crate::simple_profiler::{Category, ProfileGuard};
use crate::types::{Direction, GameError, Move, Player, WIN_LENGTH};

/// Stone count of the `player` run through (row, col) along `dir`, or 0 when the
/// run cannot grow to five before hitting an edge or an opposing stone.
pub fn viable_count(
    board: &Board,
    row: usize,
    col: usize,
    dir: Direction,
    player: Player,
) -> Result<u32, GameError> {
    Ok(viable_count_at(board, Move::new(row, col)?, dir, player))
}

/// Heuristic value of the stone at (row, col) for `player`
pub fn stone_score(
    board: &Board,
    row: usize,
    col: usize,
    player: Player,
    scores: &ScoresConfig,
) -> Result<i64, GameError> {
    Ok(stone_score_at(board, Move::new(row, col)?, player, scores))
}

/// True when the stone at (row, col) sits on a viable line of at least `target`
/// of its owner's stones along any axis. An empty cell is never on a line.
pub fn is_line_of_length(
    board: &Board,
    row: usize,
    col: usize,
    target: u32,
) -> Result<bool, GameError> {
    let at = Move::new(row, col)?;
    let Some(owner) = board.at(at) else {
        return Ok(false);
    };
    Ok(Direction::all()
        .iter()
        .any(|&dir| viable_count_at(board, at, dir, owner) >= target))
}

/// Signed advantage for `ai`: its stones' scores minus the opponent's
pub fn evaluate(board: &Board, ai: Player, scores: &ScoresConfig) -> f64 {
    let _guard = ProfileGuard::new(Category::Eval);

    let human = ai.opponent();
    let mut ai_score: i64 = 0;
    let mut human_score: i64 = 0;

    for at in Board::coordinates() {
        match board.at(at) {
            Some(p) if p == ai => ai_score += stone_score_at(board, at, ai, scores),
            Some(p) if p == human => human_score += stone_score_at(board, at, human, scores),
            _ => {}
        }
    }

    (ai_score - human_score) as f64
}

pub(crate) fn viable_count_at(board: &Board, at: Move, dir: Direction, player: Player) -> u32 {
    let forward = dir.delta();
    let backward = (-forward.0, -forward.1);

    let (ahead, ahead_end) = board.scan(at.offset(forward.0, forward.1), forward, Some(player));
    let (behind, behind_end) = board.scan(at.offset(backward.0, backward.1), backward, Some(player));
    let stones = 1 + ahead + behind;

    let (room_ahead, _) = board.scan(ahead_end, forward, None);
    let (room_behind, _) = board.scan(behind_end, backward, None);

    if stones + room_ahead + room_behind < WIN_LENGTH {
        return 0;
    }
    stones as u32
}

pub(crate) fn stone_score_at(board: &Board, at: Move, player: Player, scores: &ScoresConfig) -> i64 {
    Direction::all()
        .iter()
        .map(|&dir| viable_count_at(board, at, dir, player))
        .filter(|&count| count > 0)
        .map(|count| 1i64 << count.min(scores.max_line_exponent))
        .sum()
}
