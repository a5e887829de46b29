// Engine-vs-engine game driver
//
// Plays games through the public board API in the order a front end would:
// place, check for a win, check for a tie, switch player, ask for the next move.

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::bot::Bot;
use crate::config::{Config, SelfPlayConfig};
use crate::debug_logger::DebugLogger;
use crate::movegen::adjacent_empty_cells;
use crate::types::{Move, Player, BOARD_SIZE};

/// Half-width of the square around the center used for random first moves
const OPENING_RADIUS: usize = 2;

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win(Player),
    Tie,
    /// Stopped at `max_plies` with the game still open
    Unfinished,
}

/// Moves played in order and the final position
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub outcome: GameOutcome,
    pub board: Board,
}

pub struct SelfPlay {
    bot: Bot,
    settings: SelfPlayConfig,
    logger: DebugLogger,
    rng: StdRng,
}

impl SelfPlay {
    /// Builds a driver from configuration; the debug log follows `[debug]`
    pub fn new(config: Config) -> Self {
        let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path);
        Self::with_logger(config, logger)
    }

    pub fn with_logger(config: Config, logger: DebugLogger) -> Self {
        let rng = match config.selfplay.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        SelfPlay {
            settings: config.selfplay.clone(),
            bot: Bot::new(config),
            logger,
            rng,
        }
    }

    /// Plays `selfplay.games` games back to back
    pub fn run(&mut self) -> Vec<GameRecord> {
        (0..self.settings.games)
            .map(|game| {
                let record = self.play_game();
                info!(
                    "Game {}/{} finished after {} plies: {:?}",
                    game + 1,
                    self.settings.games,
                    record.moves.len(),
                    record.outcome
                );
                record
            })
            .collect()
    }

    /// Plays one game from the empty board, X moving first
    pub fn play_game(&mut self) -> GameRecord {
        let mut board = Board::new();
        let mut moves = Vec::new();

        let outcome = loop {
            if moves.len() >= self.settings.max_plies {
                break GameOutcome::Unfinished;
            }

            let ply = moves.len();
            let mover = board.current_player();

            let (mv, kind) = if ply < self.settings.random_opening_plies {
                match self.random_move(&board) {
                    Some(mv) => (mv, None),
                    None => break GameOutcome::Tie,
                }
            } else {
                let result = self
                    .bot
                    .best_move_with_stats(&mut board, mover, mover.opponent());
                match result.best_move {
                    Some(mv) => (mv, Some(result.kind)),
                    None => break GameOutcome::Tie,
                }
            };

            self.logger.log_move(ply, &board, mover, mv, kind);
            debug!("Ply {}: {} plays {}", ply, mover, mv);

            if !Self::apply(&mut board, mv, mover) {
                break GameOutcome::Unfinished;
            }
            moves.push(mv);

            if let Ok(Some(winner)) = board.check_win(mv.row, mv.col) {
                break GameOutcome::Win(winner);
            }
            if board.is_tie() {
                break GameOutcome::Tie;
            }
            board.switch_player();
        };

        GameRecord {
            moves,
            outcome,
            board,
        }
    }

    /// Places a chosen move; chosen moves always come from empty cells, so a
    /// rejected placement is an engine fault and is reported as such
    fn apply(board: &mut Board, mv: Move, mover: Player) -> bool {
        match board.place(mv.row, mv.col, mover) {
            Ok(true) => true,
            Ok(false) => {
                error!("{} chose occupied cell {}; abandoning game", mover, mv);
                false
            }
            Err(e) => {
                error!("{} chose invalid move {}: {}; abandoning game", mover, mv, e);
                false
            }
        }
    }

    /// Uniform pick among the center square on an empty board, else among the
    /// cells next to existing stones
    fn random_move(&mut self, board: &Board) -> Option<Move> {
        let pool: Vec<Move> = if board.is_empty() {
            let center = BOARD_SIZE / 2;
            let span = (center - OPENING_RADIUS)..=(center + OPENING_RADIUS);
            span.clone()
                .flat_map(|row| span.clone().map(move |col| Move { row, col }))
                .collect()
        } else {
            adjacent_empty_cells(board)
        };

        if pool.is_empty() {
            return None;
        }
        Some(pool[self.rng.random_range(0..pool.len())])
    }
}

impl GameOutcome {
    /// Whether the game reached a result inside the ply limit
    pub fn is_decided(&self) -> bool {
        !matches!(self, GameOutcome::Unfinished)
    }
}
