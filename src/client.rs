// Coordinator session client
//
// The thin event-driven wrapper around the engine: connect, sign in, then
// answer `ready` events with `play` and `finish` events with `player_ready`.
// The handshake is a linear sequence, not a state machine; no decision
// logic lives here. The search itself runs on a blocking task so the
// connection stays responsive while the tree is explored.

use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;

use crate::board::{Board, Player};
use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::types::{event, Envelope, FinishPayload, PlayPayload, SigninPayload, TurnPayload};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("coordinator connection failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not encode outgoing envelope: {0}")]
    Json(#[from] serde_json::Error),

    #[error("coordinator closed the connection")]
    ConnectionClosed,
}

/// Connects to the coordinator and answers events until the connection
/// drops. Returns only on transport failure; a clean shutdown from the
/// coordinator side is reported as `ConnectionClosed`.
pub async fn run(bot: Bot, config: &Config) -> Result<(), ClientError> {
    let addr = &config.connection.server_addr;
    info!("Connecting to coordinator at {}", addr);

    let stream = TcpStream::connect(addr).await?;
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    info!("Connected to server");

    // Register identity, role, and tournament before play begins
    let signin = SigninPayload {
        user_name: config.connection.user_name.clone(),
        tournament_id: config.connection.tournament_id,
        user_role: config.connection.user_role.clone(),
    };
    send(&mut write_half, &Envelope::new(event::SIGNIN, &signin)?).await?;

    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let mut turn_counter: i32 = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let envelope: Envelope = match serde_json::from_str(&line) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Skipping malformed envelope: {}", e);
                continue;
            }
        };

        match envelope.event.as_str() {
            event::OK_SIGNIN => {
                info!("Login");
            }
            event::READY => {
                let turn: TurnPayload = match decode(envelope.data) {
                    Ok(turn) => turn,
                    Err(e) => {
                        warn!("Skipping malformed ready payload: {}", e);
                        continue;
                    }
                };

                if let Some(play) = decide(&bot, &turn, turn_counter, &debug_logger).await {
                    send(&mut write_half, &Envelope::new(event::PLAY, &play)?).await?;
                }
                turn_counter += 1;
            }
            event::FINISH => {
                let finish: FinishPayload = match decode(envelope.data) {
                    Ok(finish) => finish,
                    Err(e) => {
                        warn!("Skipping malformed finish payload: {}", e);
                        continue;
                    }
                };

                info!("Game over, winner: player {}", finish.winner_turn_id);

                // The coordinator expects a movement with player_ready even
                // though the game has ended; run the normal search once more
                // rather than special-casing the finished board.
                let turn = finish.as_turn();
                if let Some(play) = decide(&bot, &turn, turn_counter, &debug_logger).await {
                    send(&mut write_half, &Envelope::new(event::PLAYER_READY, &play)?).await?;
                }
                turn_counter += 1;
            }
            other => {
                warn!("Ignoring unknown event '{}'", other);
            }
        }
    }

    Err(ClientError::ConnectionClosed)
}

/// Validates a turn payload, runs the search off the reactor, and builds
/// the reply. Returns `None` when the payload or board is unusable; the
/// caller skips the event and keeps the session alive.
async fn decide(
    bot: &Bot,
    turn: &TurnPayload,
    turn_counter: i32,
    debug_logger: &DebugLogger,
) -> Option<PlayPayload> {
    let board = match turn.parse_board() {
        Ok(board) => board,
        Err(e) => {
            error!("Rejecting malformed board: {}", e);
            return None;
        }
    };
    let player = match turn.parse_player() {
        Ok(player) => player,
        Err(e) => {
            error!("Rejecting turn notification: {}", e);
            return None;
        }
    };

    info!("Playing as player {}", player.id());

    let column = match search_blocking(bot, board, player).await {
        Ok(column) => column,
        Err(e) => {
            error!("Search failed: {}", e);
            return None;
        }
    };

    debug_logger.log_turn(
        turn_counter,
        turn.game_id.clone(),
        turn.player_turn_id,
        column,
        turn.board.clone(),
    );

    Some(PlayPayload {
        tournament_id: bot.config().connection.tournament_id,
        player_turn_id: turn.player_turn_id,
        game_id: turn.game_id.clone(),
        movement: column,
    })
}

/// Runs the CPU-bound search on the blocking pool. The board is a small
/// Copy value, so moving it into the task costs nothing.
async fn search_blocking(bot: &Bot, board: Board, player: Player) -> Result<usize, String> {
    let bot = bot.clone();
    let handle = tokio::task::spawn_blocking(move || bot.choose_move(&board, player));

    match handle.await {
        Ok(Ok(column)) => Ok(column),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("search task panicked: {}", e)),
    }
}

async fn send(writer: &mut OwnedWriteHalf, envelope: &Envelope) -> Result<(), ClientError> {
    let mut line = serde_json::to_string(envelope)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    Ok(())
}

fn decode<T: serde::de::DeserializeOwned>(
    data: Option<serde_json::Value>,
) -> Result<T, String> {
    match data {
        Some(value) => serde_json::from_value(value).map_err(|e| e.to_string()),
        None => Err("missing data field".to_string()),
    }
}
