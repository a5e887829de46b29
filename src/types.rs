// Core game types: players, moves, axis directions and engine errors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board dimension (15x15)
pub const BOARD_SIZE: usize = 15;

/// Stones in a row required to win
pub const WIN_LENGTH: usize = 5;

/// One of the two participants
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the other participant
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Signed identity: X = +1, O = -1 (Empty is 0 and has no Player)
    #[inline]
    pub fn value(self) -> i8 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }

    /// Inverse of `value`; 0 and anything outside {+1, -1} yields None
    pub fn from_value(value: i8) -> Option<Player> {
        match value {
            1 => Some(Player::X),
            -1 => Some(Player::O),
            _ => None,
        }
    }

    /// Single-character board symbol
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl TryFrom<i8> for Player {
    type Error = GameError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Player::from_value(value).ok_or(GameError::InvalidPlayerValue(value))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A board coordinate
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// Validated constructor for caller-supplied coordinates
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Move { row, col })
        } else {
            Err(GameError::InvalidCoordinate { row, col })
        }
    }

    /// The board center, used as the opening move
    pub const fn center() -> Self {
        Move {
            row: BOARD_SIZE / 2,
            col: BOARD_SIZE / 2,
        }
    }

    /// Steps one cell along `(dr, dc)`, or None when that leaves the board
    #[inline]
    pub fn offset(self, dr: isize, dc: isize) -> Option<Move> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Move { row, col })
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Move {
    type Err = String;

    /// Parses `"row,col"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim()
            .split_once(',')
            .ok_or_else(|| format!("Invalid move '{}'. Expected 'row,col'", s))?;

        let row = row
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("Invalid row '{}': {}", row, e))?;
        let col = col
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("Invalid column '{}': {}", col, e))?;

        Move::new(row, col).map_err(|e| e.to_string())
    }
}

/// The four line axes through a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Vertical,
    Horizontal,
    Diagonal,
    AntiDiagonal,
}

impl Direction {
    /// Returns all four axes
    pub fn all() -> [Direction; 4] {
        [
            Direction::Vertical,
            Direction::Horizontal,
            Direction::Diagonal,
            Direction::AntiDiagonal,
        ]
    }

    /// Forward step (row delta, col delta) along this axis
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Vertical => (1, 0),
            Direction::Horizontal => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Failures surfaced by the engine's public surface
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinate ({row}, {col}) is outside the {size}x{size} board", size = BOARD_SIZE)]
    InvalidCoordinate { row: usize, col: usize },

    #[error("Player value {0} is not +1 or -1")]
    InvalidPlayerValue(i8),

    #[error("Invalid board snapshot: {0}")]
    InvalidSnapshot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_sign_encoding() {
        assert_eq!(Player::X.value(), 1);
        assert_eq!(Player::O.value(), -1);
        assert_eq!(Player::X.opponent().value(), -Player::X.value());
        assert_eq!(Player::from_value(1), Some(Player::X));
        assert_eq!(Player::from_value(-1), Some(Player::O));
        assert_eq!(Player::from_value(0), None);
        assert_eq!(Player::from_value(2), None);
        assert_eq!(Player::try_from(-1), Ok(Player::O));
        assert_eq!(Player::try_from(0), Err(GameError::InvalidPlayerValue(0)));
    }

    #[test]
    fn test_opponent_is_an_involution() {
        for p in [Player::X, Player::O] {
            assert_ne!(p, p.opponent());
            assert_eq!(p, p.opponent().opponent());
        }
    }

    #[test]
    fn test_move_new_rejects_out_of_range() {
        assert!(Move::new(0, 0).is_ok());
        assert!(Move::new(14, 14).is_ok());
        assert_eq!(
            Move::new(15, 3),
            Err(GameError::InvalidCoordinate { row: 15, col: 3 })
        );
        assert!(Move::new(3, 200).is_err());
    }

    #[test]
    fn test_move_offset_clips_at_edges() {
        let corner = Move { row: 0, col: 0 };
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Some(Move { row: 1, col: 1 }));

        let far = Move { row: 14, col: 14 };
        assert_eq!(far.offset(1, 0), None);
        assert_eq!(far.offset(1, -1), None);
    }

    #[test]
    fn test_parse_move() {
        assert_eq!("7,8".parse::<Move>().unwrap(), Move { row: 7, col: 8 });
        assert_eq!(" 0 , 14 ".parse::<Move>().unwrap(), Move { row: 0, col: 14 });
        assert!("7".parse::<Move>().is_err());
        assert!("a,b".parse::<Move>().is_err());
        assert!("15,0".parse::<Move>().is_err());
    }

    #[test]
    fn test_center_is_seven_seven() {
        assert_eq!(Move::center(), Move { row: 7, col: 7 });
    }
}
