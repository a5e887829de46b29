// Board state and win detection for the 15x15 grid
//
// The board is the single mutable resource shared by move selection and search.
// Public operations validate caller coordinates; the crate-internal accessors
// take an already-valid `Move` and index directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::types::{Direction, GameError, Move, Player, BOARD_SIZE, WIN_LENGTH};

/// 15x15 grid of cells plus the player to move
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "BoardSnapshot", into = "BoardSnapshot")]
pub struct Board {
    cells: [[Option<Player>; BOARD_SIZE]; BOARD_SIZE],
    current: Player,
    stones: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board with X to move
    pub fn new() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            current: Player::X,
            stones: 0,
        }
    }

    /// Builds a board from 15 rows of `.`/`X`/`O` characters
    pub fn from_rows<S: AsRef<str>>(rows: &[S], current: Player) -> Result<Self, GameError> {
        if rows.len() != BOARD_SIZE {
            return Err(GameError::InvalidSnapshot(format!(
                "expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut board = Board::new();
        board.current = current;

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            if line.chars().count() != BOARD_SIZE {
                return Err(GameError::InvalidSnapshot(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.chars().count(),
                    BOARD_SIZE
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    'X' => Some(Player::X),
                    'O' => Some(Player::O),
                    other => {
                        return Err(GameError::InvalidSnapshot(format!(
                            "unexpected character '{}' at ({}, {})",
                            other, row, col
                        )))
                    }
                };
                board.set(Move { row, col }, cell);
            }
        }

        Ok(board)
    }

    /// Player whose turn it is
    pub fn current_player(&self) -> Player {
        self.current
    }

    /// Hands the turn to the other player
    pub fn switch_player(&mut self) {
        self.current = self.current.opponent();
    }

    /// Clears every cell and gives the turn back to X
    pub fn reset(&mut self) {
        *self = Board::new();
    }

    /// Cell contents at a caller-supplied coordinate
    pub fn get(&self, row: usize, col: usize) -> Result<Option<Player>, GameError> {
        Ok(self.at(Move::new(row, col)?))
    }

    /// True iff the cell is empty
    pub fn is_legal(&self, row: usize, col: usize) -> Result<bool, GameError> {
        Ok(self.get(row, col)?.is_none())
    }

    /// Places `player` at (row, col).
    /// Returns Ok(false) and leaves the board untouched when the cell is occupied.
    /// Does not switch the current player.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<bool, GameError> {
        let at = Move::new(row, col)?;
        if self.at(at).is_some() {
            return Ok(false);
        }
        self.set(at, Some(player));
        Ok(true)
    }

    /// True iff no empty cell remains
    pub fn is_full(&self) -> bool {
        self.stones == BOARD_SIZE * BOARD_SIZE
    }

    /// Drawn position; only meaningful once no win has been detected
    pub fn is_tie(&self) -> bool {
        self.is_full()
    }

    /// True iff no stone has been placed
    pub fn is_empty(&self) -> bool {
        self.stones == 0
    }

    /// Number of stones on the board
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    /// Winner through (row, col): the owner of that cell if some axis through it
    /// holds at least five of their stones in a row. Overlines count.
    pub fn check_win(&self, row: usize, col: usize) -> Result<Option<Player>, GameError> {
        Ok(self.winner_at(Move::new(row, col)?))
    }

    /// Iterates over every coordinate in row-major order
    pub fn coordinates() -> impl Iterator<Item = Move> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Move { row, col }))
    }

    /// Temporarily occupies `at`; the cell is emptied again when the guard drops
    pub(crate) fn tentative(&mut self, at: Move, player: Player) -> Tentative<'_> {
        debug_assert!(self.at(at).is_none(), "tentative placement on occupied cell {}", at);
        self.set(at, Some(player));
        Tentative { board: self, at }
    }

    #[inline]
    pub(crate) fn at(&self, at: Move) -> Option<Player> {
        self.cells[at.row][at.col]
    }

    #[inline]
    fn set(&mut self, at: Move, cell: Option<Player>) {
        let slot = &mut self.cells[at.row][at.col];
        match (slot.is_some(), cell.is_some()) {
            (false, true) => self.stones += 1,
            (true, false) => self.stones -= 1,
            _ => {}
        }
        *slot = cell;
    }

    pub(crate) fn winner_at(&self, at: Move) -> Option<Player> {
        let player = self.at(at)?;
        Direction::all()
            .iter()
            .any(|&dir| self.run_length(at, dir, player) >= WIN_LENGTH)
            .then_some(player)
    }

    /// Length of the contiguous run of `player` stones through `at` along `dir`.
    /// The cell at `at` itself counts once.
    pub(crate) fn run_length(&self, at: Move, dir: Direction, player: Player) -> usize {
        let (dr, dc) = dir.delta();
        let (forward, _) = self.scan(at.offset(dr, dc), (dr, dc), Some(player));
        let (backward, _) = self.scan(at.offset(-dr, -dc), (-dr, -dc), Some(player));
        1 + forward + backward
    }

    /// Counts consecutive cells equal to `owner` starting at `start` (inclusive)
    /// and stepping by `delta`. Returns the count and the first cell that did not
    /// match, or None if the scan ran off the board.
    #[inline]
    pub(crate) fn scan(
        &self,
        start: Option<Move>,
        delta: (isize, isize),
        owner: Option<Player>,
    ) -> (usize, Option<Move>) {
        let mut count = 0;
        let mut cursor = start;
        while let Some(cell) = cursor {
            if self.at(cell) != owner {
                break;
            }
            count += 1;
            cursor = cell.offset(delta.0, delta.1);
        }
        (count, cursor)
    }
}

/// A stone placed for the duration of a search probe.
///
/// Dereferences to the board so the probe can keep searching through it; the
/// cell is restored to empty on every exit path when the guard is dropped.
pub(crate) struct Tentative<'a> {
    board: &'a mut Board,
    at: Move,
}

impl Deref for Tentative<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Tentative<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Tentative<'_> {
    fn drop(&mut self) {
        self.board.set(self.at, None);
    }
}

/// Serialized form: current player plus 15 text rows
#[derive(Deserialize, Serialize)]
struct BoardSnapshot {
    current_player: Player,
    rows: Vec<String>,
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        let rows = board
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', Player::symbol))
                    .collect::<String>()
            })
            .collect();

        BoardSnapshot {
            current_player: board.current,
            rows,
        }
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        Board::from_rows(&snapshot.rows, snapshot.current_player)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{:2}", col)?;
        }
        writeln!(f)?;

        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{:2} ", row)?;
            for cell in cells {
                write!(f, " {}", cell.map_or('.', Player::symbol))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
