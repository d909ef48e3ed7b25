// Debug logging module for asynchronous turn logging
//
// Fire-and-forget JSONL logging so the decision path never blocks on disk.
// Each decided turn becomes one line; the replay tool consumes the file.

use log::error;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    game_id: Value,
    player_turn_id: u8,
    chosen_column: usize,
    board: Vec<Vec<u8>>,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<Option<File>>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger {
                file: Arc::new(Mutex::new(None)),
                enabled: false,
            };
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
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
                DebugLogger {
                    file: Arc::new(Mutex::new(None)),
                    enabled: false,
                }
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

    /// Logs a decided turn asynchronously (fire-and-forget)
    pub fn log_turn(
        &self,
        turn: i32,
        game_id: Value,
        player_turn_id: u8,
        chosen_column: usize,
        board: Vec<Vec<u8>>,
    ) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();

        tokio::spawn(async move {
            Self::log_turn_internal(
                file_handle,
                turn,
                game_id,
                player_turn_id,
                chosen_column,
                board,
            )
            .await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn log_turn_internal(
        file_handle: Arc<Mutex<Option<File>>>,
        turn: i32,
        game_id: Value,
        player_turn_id: u8,
        chosen_column: usize,
        board: Vec<Vec<u8>>,
    ) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            let entry = DebugLogEntry {
                turn,
                game_id,
                player_turn_id,
                chosen_column,
                board,
                timestamp: chrono::Utc::now().to_rfc3339(),
            };

            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
