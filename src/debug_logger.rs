// Debug logging module for move-by-move game state logging
//
// Each decided move is appended as one JSON line together with the board it was
// chosen on, so games can be replayed later. Failures are reported through the
// log facade and never interrupt play.

use log::error;
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Arc;

use crate::bot::DecisionKind;
use crate::board::Board;
use crate::types::{Move, Player};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry<'a> {
    ply: usize,
    player: Player,
    chosen_move: Move,
    kind: Option<DecisionKind>,
    board: &'a Board,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> so clones handed to several games append to one file
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision; `board` is the position before the move was played
    pub fn log_move(
        &self,
        ply: usize,
        board: &Board,
        player: Player,
        chosen_move: Move,
        kind: Option<DecisionKind>,
    ) {
        if !self.enabled {
            return;
        }

        let entry = DebugLogEntry {
            ply,
            player,
            chosen_move,
            kind,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let json_line = match serde_json::to_string(&entry) {
            Ok(json_line) => json_line,
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
                return;
            }
        };

        let mut file_guard = self.file.lock();
        if let Some(file) = file_guard.as_mut() {
            if let Err(e) = writeln!(file, "{}", json_line) {
                error!("Failed to write debug log entry: {}", e);
            } else if let Err(e) = file.flush() {
                error!("Failed to flush debug log: {}", e);
            }
        }
    }
}
