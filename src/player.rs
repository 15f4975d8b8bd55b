use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::BOARD_SIZE;
use crate::piece::Piece;

/// Number of pieces each player owns for the whole match.
pub const PIECES_PER_PLAYER: usize = 16;

/// Which side of the local board a player sits on. The local participant
/// always plays from the bottom edge of its own frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Local,
    Remote,
}

impl Seat {
    pub fn opponent(&self) -> Seat {
        match self {
            Seat::Local => Seat::Remote,
            Seat::Remote => Seat::Local,
        }
    }

    /// Rows this seat's men occupy at the start of a match.
    pub fn starting_rows(&self) -> [usize; 2] {
        match self {
            Seat::Local => [BOARD_SIZE - 3, BOARD_SIZE - 2],
            Seat::Remote => [1, 2],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity handed over by the session layer when a match starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        PlayerInfo {
            id: PlayerId::new(id),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    seat: Seat,
    id: PlayerId,
    name: String,
    is_its_turn: bool,
    /// Signed row step of a man's forward move.
    forward: isize,
    promotion_row: usize,
    pieces: Vec<Piece>,
}

impl Player {
    pub fn new(seat: Seat) -> Self {
        let (forward, promotion_row) = match seat {
            Seat::Local => (-1, 0),
            Seat::Remote => (1, BOARD_SIZE - 1),
        };
        Player {
            seat,
            id: PlayerId::new(""),
            name: String::new(),
            is_its_turn: false,
            forward,
            promotion_row,
            pieces: (0..PIECES_PER_PLAYER).map(|_| Piece::new(seat)).collect(),
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn assign(&mut self, info: &PlayerInfo) {
        self.id = info.id.clone();
        self.name = info.name.clone();
    }

    pub fn is_its_turn(&self) -> bool {
        self.is_its_turn
    }

    pub(crate) fn set_turn(&mut self, value: bool) {
        self.is_its_turn = value;
    }

    pub fn forward(&self) -> isize {
        self.forward
    }

    pub fn promotion_row(&self) -> usize {
        self.promotion_row
    }

    /// All pieces, captured ones included.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub(crate) fn piece_mut(&mut self, index: usize) -> &mut Piece {
        &mut self.pieces[index]
    }

    pub fn living(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| !p.is_captured())
    }

    pub fn living_count(&self) -> usize {
        self.living().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_owns_sixteen_pieces() {
        let player = Player::new(Seat::Remote);
        assert_eq!(player.pieces().len(), PIECES_PER_PLAYER);
        assert!(player.pieces().iter().all(|p| p.owner() == Seat::Remote));
        assert_eq!(player.living_count(), PIECES_PER_PLAYER);
    }

    #[test]
    fn test_direction_and_promotion_row_per_seat() {
        let local = Player::new(Seat::Local);
        let remote = Player::new(Seat::Remote);
        assert_eq!(local.forward(), -1);
        assert_eq!(local.promotion_row(), 0);
        assert_eq!(remote.forward(), 1);
        assert_eq!(remote.promotion_row(), 7);
        assert_eq!(Seat::Local.starting_rows(), [5, 6]);
        assert_eq!(Seat::Remote.starting_rows(), [1, 2]);
    }
}
