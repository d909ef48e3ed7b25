// Coordinator wire types
//
// Everything the bot sends to or receives from the tournament coordinator
// travels as a JSON envelope `{ "event": ..., "data": ... }`, one envelope
// per line. The payload shapes and event names below are the coordinator's
// contract; nothing outside this module and the client knows about them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::board::{Board, BoardError, Player};

/// Event names used on the coordinator channel
pub mod event {
    pub const SIGNIN: &str = "signin";
    pub const OK_SIGNIN: &str = "ok_signin";
    pub const READY: &str = "ready";
    pub const FINISH: &str = "finish";
    pub const PLAY: &str = "play";
    pub const PLAYER_READY: &str = "player_ready";
}

/// One line on the wire: an event name plus its optional payload
#[derive(Debug, Deserialize, Serialize)]
pub struct Envelope {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Wraps a payload into an envelope for the given event
    pub fn new<T: Serialize>(event: &str, data: &T) -> Result<Self, serde_json::Error> {
        Ok(Envelope {
            event: event.to_string(),
            data: Some(serde_json::to_value(data)?),
        })
    }
}

/// Identity registration sent once after connecting
#[derive(Debug, Deserialize, Serialize)]
pub struct SigninPayload {
    pub user_name: String,
    pub tournament_id: u32,
    pub user_role: String,
}

/// Turn notification: it is our move on this board.
/// `game_id` is opaque to the bot and echoed back verbatim.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TurnPayload {
    pub game_id: Value,
    pub player_turn_id: u8,
    pub board: Vec<Vec<u8>>,
}

impl TurnPayload {
    /// Validates and converts the wire grid into a board
    pub fn parse_board(&self) -> Result<Board, BoardError> {
        Board::from_grid(&self.board)
    }

    /// Resolves which player we are in this game
    pub fn parse_player(&self) -> Result<Player, BoardError> {
        Player::from_id(self.player_turn_id)
            .ok_or(BoardError::InvalidPlayer(self.player_turn_id))
    }
}

/// Terminal notification: same fields as a turn, plus the winner
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FinishPayload {
    pub game_id: Value,
    pub player_turn_id: u8,
    pub winner_turn_id: u8,
    pub board: Vec<Vec<u8>>,
}

impl FinishPayload {
    /// The turn-shaped part of this notification. The finish handler runs
    /// the same decision path as a normal turn, so it reuses TurnPayload.
    pub fn as_turn(&self) -> TurnPayload {
        TurnPayload {
            game_id: self.game_id.clone(),
            player_turn_id: self.player_turn_id,
            board: self.board.clone(),
        }
    }
}

/// Chosen move sent back to the coordinator, tagged with the tournament,
/// player, and game identifiers it arrived with
#[derive(Debug, Deserialize, Serialize)]
pub struct PlayPayload {
    pub tournament_id: u32,
    pub player_turn_id: u8,
    pub game_id: Value,
    pub movement: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_turn_payload_deserializes() {
        let raw = json!({
            "game_id": 57,
            "player_turn_id": 1,
            "board": [
                [0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 0, 0, 0, 0],
                [0, 0, 0, 2, 0, 0, 0],
                [0, 0, 1, 1, 0, 0, 0]
            ]
        });

        let turn: TurnPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(turn.player_turn_id, 1);
        assert_eq!(turn.parse_player().unwrap(), Player::One);
        let board = turn.parse_board().unwrap();
        assert_eq!(board.available_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_turn_payload_rejects_bad_player() {
        let empty_grid = vec![vec![0u8; 7]; 6];
        let raw = json!({
            "game_id": "g-1",
            "player_turn_id": 3,
            "board": empty_grid
        });

        let turn: TurnPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(turn.parse_player(), Err(BoardError::InvalidPlayer(3)));
    }

    #[test]
    fn test_turn_payload_rejects_malformed_board() {
        let short_grid = vec![vec![0u8; 7]; 5];
        let raw = json!({
            "game_id": 1,
            "player_turn_id": 2,
            "board": short_grid
        });

        let turn: TurnPayload = serde_json::from_value(raw).unwrap();
        assert!(turn.parse_board().is_err());
    }

    #[test]
    fn test_envelope_skips_missing_data() {
        let envelope: Envelope = serde_json::from_str(r#"{"event":"ok_signin"}"#).unwrap();
        assert_eq!(envelope.event, event::OK_SIGNIN);
        assert!(envelope.data.is_none());

        let serialized = serde_json::to_string(&envelope).unwrap();
        assert_eq!(serialized, r#"{"event":"ok_signin"}"#);
    }

    #[test]
    fn test_play_payload_shape() {
        let play = PlayPayload {
            tournament_id: 142857,
            player_turn_id: 1,
            game_id: json!(57),
            movement: 3,
        };

        let value = serde_json::to_value(&play).unwrap();
        assert_eq!(value["tournament_id"], 142857);
        assert_eq!(value["movement"], 3);
        assert_eq!(value["game_id"], 57);
    }

    #[test]
    fn test_finish_payload_as_turn() {
        let finish = FinishPayload {
            game_id: json!("abc"),
            player_turn_id: 2,
            winner_turn_id: 1,
            board: vec![vec![0; 7]; 6],
        };

        let turn = finish.as_turn();
        assert_eq!(turn.player_turn_id, 2);
        assert_eq!(turn.game_id, json!("abc"));
    }
}
