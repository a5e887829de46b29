// Replay module for analyzing logged games and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the engine on historical positions
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::board::Board;
use crate::bot::{Bot, DecisionKind, MoveResult};
use crate::config::Config;
use crate::types::{Move, Player};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub ply: usize,
    pub player: Player,
    pub chosen_move: Move,
    #[serde(default)]
    pub kind: Option<DecisionKind>,
    pub board: Board,
    pub timestamp: String,
}

/// Result of replaying a single ply
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub ply: usize,
    pub original_move: Move,
    pub replayed_move: Option<Move>,
    pub matches: bool,
    pub value: f64,
    pub kind: DecisionKind,
    pub nodes: u64,
    pub computation_time_ms: u64,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_plies: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Runs the engine for `player` on a copy of `board`
    pub fn replay_position(&self, board: &Board, player: Player) -> MoveResult {
        let mut board = board.clone();
        self.bot
            .best_move_with_stats(&mut board, player, player.opponent())
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> ReplayResult {
        if self.verbose {
            info!("Replaying ply {}...", entry.ply);
        }

        let outcome = self.replay_position(&entry.board, entry.player);
        let matches = outcome.best_move == Some(entry.chosen_move);

        let result = ReplayResult {
            ply: entry.ply,
            original_move: entry.chosen_move,
            replayed_move: outcome.best_move,
            matches,
            value: outcome.value,
            kind: outcome.kind,
            nodes: outcome.nodes,
            computation_time_ms: outcome.time_ms,
        };

        if self.verbose {
            if matches {
                info!(
                    "Ply {}: ✓ MATCH - {} (value: {}, kind: {:?}, time: {}ms)",
                    entry.ply, entry.chosen_move, result.value, result.kind, result.computation_time_ms
                );
            } else {
                warn!(
                    "Ply {}: ✗ MISMATCH - Original: {}, Replayed: {} (value: {}, kind: {:?}, time: {}ms)",
                    entry.ply,
                    entry.chosen_move,
                    Self::describe(result.replayed_move),
                    result.value,
                    result.kind,
                    result.computation_time_ms
                );
            }
        }

        result
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries.iter().map(|entry| self.replay_entry(entry)).collect()
    }

    /// Replays specific plies from a log file
    pub fn replay_plies(
        &self,
        entries: &[LogEntry],
        plies: &[usize],
    ) -> Result<Vec<ReplayResult>, String> {
        plies
            .iter()
            .map(|ply| {
                entries
                    .iter()
                    .find(|e| e.ply == *ply)
                    .map(|entry| self.replay_entry(entry))
                    .ok_or_else(|| format!("Ply {} not found in log file", ply))
            })
            .collect()
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_plies = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_plies - matches;
        let match_rate = if total_plies > 0 {
            (matches as f64 / total_plies as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_plies,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Plies:    {}", stats.total_plies);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;
            let avg_nodes: f64 =
                results.iter().map(|r| r.nodes as f64).sum::<f64>() / results.len() as f64;

            println!("Average Nodes Searched:     {:.0}", avg_nodes);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Ply {}: {} → {} (value: {}, kind: {:?}, time: {}ms)",
                    result.ply,
                    result.original_move,
                    Self::describe(result.replayed_move),
                    result.value,
                    result.kind,
                    result.computation_time_ms
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(usize, Vec<Move>)], // (ply, acceptable_moves)
    ) -> Result<(), String> {
        for (ply, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.ply == *ply)
                .ok_or_else(|| format!("Ply {} not found in log", ply))?;

            if !acceptable.contains(&entry.chosen_move) {
                return Err(format!(
                    "Ply {}: Expected one of {:?}, but got {}",
                    ply,
                    acceptable.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
                    entry.chosen_move
                ));
            }
        }

        Ok(())
    }

    fn describe(mv: Option<Move>) -> String {
        mv.map_or_else(|| "none".to_string(), |m| m.to_string())
    }
}
