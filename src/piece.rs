use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;
use crate::grid::Position;
use crate::player::Seat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

/// Handle stored in a grid cell: which player owns the piece and its slot in
/// that player's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceRef {
    pub seat: Seat,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    owner: Seat,
    is_king: bool,
    is_captured: bool,
    cell: Option<Position>,
}

impl Piece {
    pub fn new(owner: Seat) -> Self {
        Piece {
            owner,
            is_king: false,
            is_captured: false,
            cell: None,
        }
    }

    pub fn owner(&self) -> Seat {
        self.owner
    }

    pub fn is_king(&self) -> bool {
        self.is_king
    }

    pub fn is_captured(&self) -> bool {
        self.is_captured
    }

    pub fn rank(&self) -> Rank {
        if self.is_king { Rank::King } else { Rank::Man }
    }

    /// Current cell; `None` once captured.
    pub fn cell(&self) -> Option<Position> {
        self.cell
    }

    pub(crate) fn set_cell(&mut self, cell: Option<Position>) {
        self.cell = cell;
    }

    pub fn promote(&mut self) -> Result<(), InvariantViolation> {
        if self.is_king {
            return Err(InvariantViolation::AlreadyPromoted(self.cell));
        }
        self.is_king = true;
        Ok(())
    }

    /// Mark the piece as taken. The caller detaches it from the grid.
    pub fn capture(&mut self) -> Result<(), InvariantViolation> {
        if self.is_captured {
            return Err(InvariantViolation::AlreadyCaptured(self.cell));
        }
        self.is_captured = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_is_monotonic() {
        let mut piece = Piece::new(Seat::Local);
        assert_eq!(piece.rank(), Rank::Man);

        piece.promote().unwrap();
        assert!(piece.is_king());
        assert_eq!(piece.rank(), Rank::King);

        assert!(matches!(
            piece.promote(),
            Err(InvariantViolation::AlreadyPromoted(_))
        ));
        assert!(piece.is_king());
    }

    #[test]
    fn test_capture_is_terminal() {
        let mut piece = Piece::new(Seat::Remote);
        piece.capture().unwrap();
        assert!(piece.is_captured());
        assert!(matches!(
            piece.capture(),
            Err(InvariantViolation::AlreadyCaptured(_))
        ));
    }
}
