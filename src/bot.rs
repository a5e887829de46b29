// Move selection for the automated side
//
// The root short-circuits on the empty board and on any immediately winning
// candidate; every other candidate is scored by a fixed-depth minimax with
// alpha-beta pruning. All probing happens through tentative placements on the
// caller's board, so the board is handed back exactly as it came in.

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::board::Board;
use crate::config::Config;
use crate::heuristic::evaluate;
use crate::movegen::adjacent_empty_cells;
use crate::simple_profiler::{self, Category, ProfileGuard};
use crate::types::{Move, Player};

/// Execution strategy for scoring root candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExecutionStrategy {
    /// One candidate after another on the caller's board
    Sequential,
    /// Candidates spread over the rayon pool, each on its own board copy
    ParallelRoot,
}

/// How the returned move was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    /// Empty board: play the center
    Opening,
    /// A candidate completes five on the spot
    ImmediateWin,
    /// Best minimax value among candidates
    Search,
    /// Board is full
    NoMoves,
}

/// Outcome of a move search with statistics
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub best_move: Option<Move>,
    pub value: f64,
    pub kind: DecisionKind,
    pub nodes: u64,
    pub cutoffs: u64,
    pub time_ms: u64,
}

#[derive(Debug, Default, Clone, Copy)]
struct SearchStats {
    nodes: u64,
    cutoffs: u64,
}

impl SearchStats {
    fn absorb(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// What probing a single root candidate produced
#[derive(Debug, Clone, Copy)]
enum RootProbe {
    Win,
    Value(f64),
}

/// Gomoku engine with OOP-style API
/// Takes static configuration and exposes the move-selection entry points
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        if config.profiling.enabled {
            simple_profiler::enable();
        }
        Bot { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Best move for `ai` on `board`.
    ///
    /// `human` must be `ai.opponent()`. Returns None only for a full board, which
    /// a caller checking `is_tie` after every move never passes in. The board is
    /// mutated while searching and restored before returning.
    pub fn best_move(&self, board: &mut Board, ai: Player, human: Player) -> Option<Move> {
        self.best_move_with_stats(board, ai, human).best_move
    }

    /// Same as `best_move`, reporting the root value, decision kind and search effort
    pub fn best_move_with_stats(&self, board: &mut Board, ai: Player, human: Player) -> MoveResult {
        debug_assert_eq!(human, ai.opponent(), "human must be the AI's opponent");

        let start_time = Instant::now();

        if board.is_empty() {
            return Self::finish(
                ai,
                start_time,
                Some(Move::center()),
                0.0,
                DecisionKind::Opening,
                SearchStats::default(),
            );
        }

        let candidates = adjacent_empty_cells(board);
        if candidates.is_empty() {
            return Self::finish(
                ai,
                start_time,
                None,
                0.0,
                DecisionKind::NoMoves,
                SearchStats::default(),
            );
        }

        let strategy =
            Self::determine_strategy(candidates.len(), rayon::current_num_threads(), &self.config);
        debug!(
            "Scoring {} candidates for {} ({:?})",
            candidates.len(),
            ai,
            strategy
        );

        let mut stats = SearchStats::default();
        let (chosen, value, kind) = match strategy {
            ExecutionStrategy::Sequential => {
                let probes = candidates
                    .iter()
                    .map(|&mv| self.probe_root(board, mv, ai, &mut stats));
                self.pick(&candidates, probes)
            }
            ExecutionStrategy::ParallelRoot => {
                let shared: &Board = board;
                let results: Vec<(RootProbe, SearchStats)> = candidates
                    .par_iter()
                    .map(|&mv| {
                        let mut local = shared.clone();
                        let mut local_stats = SearchStats::default();
                        let probe = self.probe_root(&mut local, mv, ai, &mut local_stats);
                        simple_profiler::merge_thread_local();
                        (probe, local_stats)
                    })
                    .collect();

                for (_, s) in &results {
                    stats.absorb(*s);
                }
                self.pick(&candidates, results.into_iter().map(|(probe, _)| probe))
            }
        };

        simple_profiler::merge_thread_local();
        Self::finish(ai, start_time, Some(chosen), value, kind, stats)
    }

    /// Walks probes in candidate order: the first immediate win is taken outright,
    /// otherwise the first candidate with the strictly highest value.
    fn pick(
        &self,
        candidates: &[Move],
        probes: impl Iterator<Item = RootProbe>,
    ) -> (Move, f64, DecisionKind) {
        let search = &self.config.search;
        let mut best_move = None;
        let mut best_value = -search.initial_bound;

        for (&mv, probe) in candidates.iter().zip(probes) {
            match probe {
                RootProbe::Win => {
                    return (mv, search.win_value(search.depth + 1), DecisionKind::ImmediateWin);
                }
                RootProbe::Value(value) => {
                    debug!("  candidate {} -> {}", mv, value);
                    if value > best_value {
                        best_value = value;
                        best_move = Some(mv);
                    }
                }
            }
        }

        (best_move.unwrap_or(candidates[0]), best_value, DecisionKind::Search)
    }

    /// Places `ai` at `mv` and scores it; the opponent replies next
    fn probe_root(
        &self,
        board: &mut Board,
        mv: Move,
        ai: Player,
        stats: &mut SearchStats,
    ) -> RootProbe {
        let _guard = ProfileGuard::new(Category::RootCandidate);
        let search = &self.config.search;

        let mut probe = board.tentative(mv, ai);
        if probe.winner_at(mv) == Some(ai) {
            return RootProbe::Win;
        }

        RootProbe::Value(self.minimax(
            &mut probe,
            search.depth,
            false,
            -search.initial_bound,
            search.initial_bound,
            ai,
            stats,
        ))
    }

    /// Depth-limited minimax from `ai`'s perspective.
    /// With pruning disabled every branch is visited; the returned value is the same.
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: f64,
        mut beta: f64,
        ai: Player,
        stats: &mut SearchStats,
    ) -> f64 {
        stats.nodes += 1;
        simple_profiler::record_node();

        if depth == 0 {
            return evaluate(board, ai, &self.config.scores);
        }

        let moves = adjacent_empty_cells(board);
        if moves.is_empty() {
            return 0.0;
        }

        let search = &self.config.search;

        if maximizing {
            let mut max_eval = f64::NEG_INFINITY;
            for mv in moves {
                let mut probe = board.tentative(mv, ai);
                if probe.winner_at(mv) == Some(ai) {
                    return search.win_value(depth);
                }

                let eval = self.minimax(&mut probe, depth - 1, false, alpha, beta, ai, stats);
                drop(probe);

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if search.pruning && beta <= alpha {
                    stats.cutoffs += 1;
                    simple_profiler::record_alpha_beta_cutoff();
                    break;
                }
            }
            max_eval
        } else {
            let human = ai.opponent();
            let mut min_eval = f64::INFINITY;
            for mv in moves {
                let mut probe = board.tentative(mv, human);
                if probe.winner_at(mv) == Some(human) {
                    return -search.win_value(depth);
                }

                let eval = self.minimax(&mut probe, depth - 1, true, alpha, beta, ai, stats);
                drop(probe);

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if search.pruning && beta <= alpha {
                    stats.cutoffs += 1;
                    simple_profiler::record_alpha_beta_cutoff();
                    break;
                }
            }
            min_eval
        }
    }

    /// Determines the execution strategy based on candidate count and hardware
    fn determine_strategy(
        num_candidates: usize,
        num_cpus: usize,
        config: &Config,
    ) -> ExecutionStrategy {
        if config.search.parallel_root
            && num_cpus >= 2
            && num_candidates >= config.search.min_candidates_for_parallel
        {
            ExecutionStrategy::ParallelRoot
        } else {
            ExecutionStrategy::Sequential
        }
    }

    fn finish(
        ai: Player,
        start_time: Instant,
        best_move: Option<Move>,
        value: f64,
        kind: DecisionKind,
        stats: SearchStats,
    ) -> MoveResult {
        let time_ms = start_time.elapsed().as_millis() as u64;

        match best_move {
            Some(mv) => info!(
                "{} chose {} (value: {}, kind: {:?}, nodes: {}, cutoffs: {}, time: {}ms)",
                ai, mv, value, kind, stats.nodes, stats.cutoffs, time_ms
            ),
            None => info!("{} has no legal move: board is full", ai),
        }

        MoveResult {
            best_move,
            value,
            kind,
            nodes: stats.nodes,
            cutoffs: stats.cutoffs,
            time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bot() -> Bot {
        Bot::new(Config::default_hardcoded())
    }

    fn bot_with(mutate: impl FnOnce(&mut Config)) -> Bot {
        let mut config = Config::default_hardcoded();
        mutate(&mut config);
        Bot::new(config)
    }

    fn board_with(stones: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(row, col, player) in stones {
            board.place(row, col, player).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_opens_in_center() {
        let mut board = Board::new();
        let result = bot().best_move_with_stats(&mut board, Player::O, Player::X);
        assert_eq!(result.best_move, Some(Move { row: 7, col: 7 }));
        assert_eq!(result.kind, DecisionKind::Opening);
        assert!(board.is_empty());
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = Board::new();
        for m in Board::coordinates() {
            let player = if (m.col / 2 + m.row) % 2 == 0 { Player::X } else { Player::O };
            board.place(m.row, m.col, player).unwrap();
        }
        let result = bot().best_move_with_stats(&mut board, Player::O, Player::X);
        assert_eq!(result.best_move, None);
        assert_eq!(result.kind, DecisionKind::NoMoves);
    }

    #[test]
    fn test_immediate_win_short_circuits_search() {
        let mut board = board_with(&[
            (7, 3, Player::O),
            (7, 4, Player::O),
            (7, 5, Player::O),
            (7, 6, Player::O),
            (8, 4, Player::X),
            (8, 5, Player::X),
            (8, 6, Player::X),
        ]);
        let before = board.clone();
        let result = bot().best_move_with_stats(&mut board, Player::O, Player::X);
        assert_eq!(board, before);
        assert_eq!(result.kind, DecisionKind::ImmediateWin);
        // (7,2) precedes (7,7) in row-major candidate order
        assert_eq!(result.best_move, Some(Move { row: 7, col: 2 }));
    }

    #[test]
    fn test_blocks_single_open_end_of_four() {
        let mut board = board_with(&[
            (7, 2, Player::O),
            (7, 3, Player::X),
            (7, 4, Player::X),
            (7, 5, Player::X),
            (7, 6, Player::X),
        ]);
        let result = bot().best_move_with_stats(&mut board, Player::O, Player::X);
        assert_eq!(result.best_move, Some(Move { row: 7, col: 7 }));
        assert_eq!(result.kind, DecisionKind::Search);
        assert!(result.value > -1_000_000.0);
    }

    #[test]
    fn test_unavoidable_loss_reports_sentinel() {
        // X has an open four: two winning cells, O can only block one
        let mut board = board_with(&[
            (7, 4, Player::X),
            (7, 5, Player::X),
            (7, 6, Player::X),
            (7, 7, Player::X),
            (0, 0, Player::O),
        ]);
        let before = board.clone();
        let result = bot().best_move_with_stats(&mut board, Player::O, Player::X);
        assert_eq!(result.value, -1_000_002.0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let mut board = board_with(&[
            (7, 7, Player::X),
            (7, 8, Player::O),
            (8, 7, Player::X),
            (6, 6, Player::O),
        ]);
        board.switch_player();
        let before = board.clone();
        let chosen = bot().best_move(&mut board, Player::O, Player::X).unwrap();
        assert_eq!(board, before);
        assert!(board.is_legal(chosen.row, chosen.col).unwrap());
    }

    #[test]
    fn test_pruning_does_not_change_result() {
        let mut board = board_with(&[
            (6, 6, Player::X),
            (7, 7, Player::O),
            (7, 8, Player::X),
        ]);
        let pruned = bot().best_move_with_stats(&mut board, Player::O, Player::X);
        let exhaustive = bot_with(|c| c.search.pruning = false)
            .best_move_with_stats(&mut board, Player::O, Player::X);

        assert_eq!(pruned.best_move, exhaustive.best_move);
        assert_eq!(pruned.value, exhaustive.value);
        assert!(pruned.nodes < exhaustive.nodes);
        assert_eq!(exhaustive.cutoffs, 0);
    }

    #[test]
    fn test_parallel_root_matches_sequential() {
        let mut board = board_with(&[
            (7, 7, Player::X),
            (7, 8, Player::O),
            (8, 8, Player::X),
        ]);
        let sequential = bot().best_move_with_stats(&mut board, Player::O, Player::X);
        let parallel = bot_with(|c| {
            c.search.parallel_root = true;
            c.search.min_candidates_for_parallel = 1;
        })
        .best_move_with_stats(&mut board, Player::O, Player::X);

        assert_eq!(sequential.best_move, parallel.best_move);
        assert_eq!(sequential.value, parallel.value);
        assert_eq!(sequential.nodes, parallel.nodes);
    }

    #[test]
    fn test_win_sentinel_prefers_sooner_wins() {
        let search = Config::default_hardcoded().search;
        assert!(search.win_value(2) > search.win_value(1));
        assert!(-search.win_value(2) < -search.win_value(1));
    }

    #[test]
    fn test_determine_strategy() {
        let mut config = Config::default_hardcoded();
        assert_eq!(
            Bot::determine_strategy(100, 8, &config),
            ExecutionStrategy::Sequential
        );

        config.search.parallel_root = true;
        config.search.min_candidates_for_parallel = 10;
        assert_eq!(
            Bot::determine_strategy(100, 8, &config),
            ExecutionStrategy::ParallelRoot
        );
        assert_eq!(
            Bot::determine_strategy(5, 8, &config),
            ExecutionStrategy::Sequential
        );
        assert_eq!(
            Bot::determine_strategy(100, 1, &config),
            ExecutionStrategy::Sequential
        );
    }

    #[test]
    fn test_minimax_depth_zero_is_static_evaluation() {
        let mut board = board_with(&[(7, 7, Player::O), (3, 3, Player::X)]);
        let bot = bot();
        let mut stats = SearchStats::default();
        let value = bot.minimax(&mut board, 0, true, -1e8, 1e8, Player::O, &mut stats);
        assert_eq!(value, evaluate(&board, Player::O, &bot.config.scores));
        assert_eq!(stats.nodes, 1);
    }
}
