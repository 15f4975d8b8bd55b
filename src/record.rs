use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Position;
use crate::player::PlayerId;
use crate::status::{MatchProgress, MatchStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("position ({row}, {col}) is off the board")]
    OffBoard { row: i64, col: i64 },
    #[error("unknown match status code {0}")]
    UnknownStatus(u8),
    #[error("match_status {progress:?} disagrees with game_status {code}")]
    StatusMismatch { code: u8, progress: MatchProgress },
}

/// One completed turn, in the coordinate frame of the player who made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireMove", into = "WireMove")]
pub struct MoveRecord {
    pub origin: Position,
    pub destination: Position,
    /// Cells emptied by the turn, in capture order.
    pub captured_pieces: Vec<Position>,
    pub promoted: bool,
    pub winner: Option<PlayerId>,
    /// Sender's status after the turn.
    pub status: MatchStatus,
}

impl MoveRecord {
    pub fn progress(&self) -> MatchProgress {
        self.status.progress()
    }

    /// The same turn seen from the opposite edge of the board.
    pub fn mirrored(&self) -> MoveRecord {
        MoveRecord {
            origin: self.origin.mirror(),
            destination: self.destination.mirror(),
            captured_pieces: self.captured_pieces.iter().map(Position::mirror).collect(),
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Field layout shared with the peer.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMove {
    origin: Position,
    destination: Position,
    captured_pieces: Vec<Position>,
    promoted: bool,
    winner: Option<PlayerId>,
    game_status: MatchStatus,
    match_status: MatchProgress,
}

impl From<MoveRecord> for WireMove {
    fn from(record: MoveRecord) -> Self {
        WireMove {
            match_status: record.progress(),
            origin: record.origin,
            destination: record.destination,
            captured_pieces: record.captured_pieces,
            promoted: record.promoted,
            winner: record.winner,
            game_status: record.status,
        }
    }
}

impl TryFrom<WireMove> for MoveRecord {
    type Error = RecordError;

    fn try_from(wire: WireMove) -> Result<Self, Self::Error> {
        if wire.game_status.progress() != wire.match_status {
            return Err(RecordError::StatusMismatch {
                code: wire.game_status.code(),
                progress: wire.match_status,
            });
        }
        Ok(MoveRecord {
            origin: wire.origin,
            destination: wire.destination,
            captured_pieces: wire.captured_pieces,
            promoted: wire.promoted,
            winner: wire.winner,
            status: wire.game_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MoveRecord {
        MoveRecord {
            origin: Position::new(5, 2),
            destination: Position::new(1, 2),
            captured_pieces: vec![Position::new(4, 2), Position::new(2, 2)],
            promoted: false,
            winner: None,
            status: MatchStatus::WaitingRemoteMove,
        }
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "origin": {"row": 5, "col": 2},
                "destination": {"row": 1, "col": 2},
                "captured_pieces": [{"row": 4, "col": 2}, {"row": 2, "col": 2}],
                "promoted": false,
                "winner": null,
                "game_status": 5,
                "match_status": "next"
            })
        );
    }

    #[test]
    fn test_finished_record_with_winner() {
        let record = MoveRecord {
            winner: Some(PlayerId::new("alice")),
            status: MatchStatus::Finished,
            ..sample()
        };
        let json = record.to_json().unwrap();
        assert!(json.contains(r#""winner":"alice""#));
        assert!(json.contains(r#""match_status":"finished""#));
        assert_eq!(MoveRecord::from_json(&json).unwrap(), record);
    }

    #[test]
    fn test_decode_rejects_inconsistent_status() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["match_status"] = json!("finished");
        assert!(serde_json::from_value::<MoveRecord>(value).is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_code_and_off_board_cells() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["game_status"] = json!(42);
        assert!(serde_json::from_value::<MoveRecord>(value).is_err());

        let mut value = serde_json::to_value(sample()).unwrap();
        value["captured_pieces"][1] = json!({"row": 2, "col": 8});
        assert!(serde_json::from_value::<MoveRecord>(value).is_err());
    }

    #[test]
    fn test_mirroring_twice_is_identity() {
        let record = sample();
        let mirrored = record.mirrored();
        assert_eq!(mirrored.origin, Position::new(2, 5));
        assert_eq!(mirrored.destination, Position::new(6, 5));
        assert_eq!(
            mirrored.captured_pieces,
            vec![Position::new(3, 5), Position::new(5, 5)]
        );
        assert_eq!(mirrored.mirrored(), record);
    }
}
