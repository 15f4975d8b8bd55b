use thiserror::Error;

use crate::grid::Position;
use crate::player::PlayerId;
use crate::status::MatchStatus;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("No piece at {0}")]
    NoPieceAtOrigin(Position),
    #[error("Piece at {0} belongs to the opponent")]
    NotYourPiece(Position),
    #[error("Piece at {0} has no legal move")]
    PieceImmobile(Position),
    #[error("Illegal destination: {from} -> {to}")]
    IllegalDestination { from: Position, to: Position },
    #[error("Capture is mandatory: {reason}")]
    MandatoryCaptureViolation { reason: String },
    #[error("The piece at {0} must keep capturing")]
    CaptureChainInProgress(Position),
    #[error("Not your turn")]
    NotYourTurn,
    #[error("Cannot {operation} while match status is {status}")]
    InvalidStatusTransition {
        operation: &'static str,
        status: MatchStatus,
    },
    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("Malformed move record: {0}")]
    MalformedRecord(String),
    #[error("Engine invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl GameError {
    /// Fatal errors come from a broken engine invariant, never from caller input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::Invariant(_))
    }
}

/// Violations of the engine's own bookkeeping. Seeing one of these is a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("piece at {0:?} is already a king")]
    AlreadyPromoted(Option<Position>),
    #[error("piece at {0:?} is already captured")]
    AlreadyCaptured(Option<Position>),
    #[error("{0}")]
    Inconsistent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invariant_errors_are_fatal() {
        assert!(GameError::Invariant(InvariantViolation::AlreadyPromoted(None)).is_fatal());
        assert!(!GameError::NotYourTurn.is_fatal());
        assert!(!GameError::NoPieceAtOrigin(Position::new(0, 0)).is_fatal());
    }

    #[test]
    fn test_messages() {
        let err = GameError::IllegalDestination {
            from: Position::new(2, 4),
            to: Position::new(4, 4),
        };
        assert_eq!(err.to_string(), "Illegal destination: (2, 4) -> (4, 4)");

        let err = GameError::InvalidStatusTransition {
            operation: "receive a move",
            status: MatchStatus::WaitingLocalMove,
        };
        assert_eq!(
            err.to_string(),
            "Cannot receive a move while match status is WAITING_LOCAL_MOVE"
        );
    }
}
