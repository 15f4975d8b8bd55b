use serde::{Deserialize, Serialize};
use std::fmt;

use crate::piece::PieceRef;
use crate::record::RecordError;

/// Board size constant
pub const BOARD_SIZE: usize = 8;

/// The four orthogonal unit steps: up, down, left, right.
pub const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        assert!(
            row < BOARD_SIZE && col < BOARD_SIZE,
            "position ({row}, {col}) is off the board"
        );
        Position { row, col }
    }

    /// Step by `(dr, dc)`; `None` when the result leaves the board.
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Position> {
        let r = self.row as isize + dr;
        let c = self.col as isize + dc;
        if r < 0 || r >= BOARD_SIZE as isize || c < 0 || c >= BOARD_SIZE as isize {
            return None;
        }
        Some(Position::new(r as usize, c as usize))
    }

    /// The same physical cell seen from the opposite edge of the board.
    pub fn mirror(&self) -> Position {
        Position::new(BOARD_SIZE - 1 - self.row, BOARD_SIZE - 1 - self.col)
    }

    /// Unit step and distance from `self` to `other` if both share a row or column.
    pub fn line_to(&self, other: Position) -> Option<((isize, isize), usize)> {
        let dr = other.row as isize - self.row as isize;
        let dc = other.col as isize - self.col as isize;
        match (dr, dc) {
            (0, 0) => None,
            (0, dc) => Some(((0, dc.signum()), dc.unsigned_abs())),
            (dr, 0) => Some(((dr.signum(), 0), dr.unsigned_abs())),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Wire shape of a position before range validation.
#[derive(Deserialize)]
struct RawPosition {
    row: i64,
    col: i64,
}

impl TryFrom<RawPosition> for Position {
    type Error = RecordError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        let in_range = |v: i64| (0..BOARD_SIZE as i64).contains(&v);
        if in_range(raw.row) && in_range(raw.col) {
            Ok(Position {
                row: raw.row as usize,
                col: raw.col as usize,
            })
        } else {
            Err(RecordError::OffBoard {
                row: raw.row,
                col: raw.col,
            })
        }
    }
}

/// The 8x8 array of cells. Only piece references live here; piece state is
/// owned by the players.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: [[Option<PieceRef>; BOARD_SIZE]; BOARD_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn get(&self, pos: Position) -> Option<PieceRef> {
        self.cells[pos.row][pos.col]
    }

    pub(crate) fn set(&mut self, pos: Position, piece: Option<PieceRef>) {
        self.cells[pos.row][pos.col] = piece;
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Position, PieceRef)> + '_ {
        Position::all().filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_is_an_involution() {
        for pos in Position::all() {
            assert_eq!(pos.mirror().mirror(), pos);
        }
        assert_eq!(Position::new(0, 0).mirror(), Position::new(7, 7));
        assert_eq!(Position::new(2, 5).mirror(), Position::new(5, 2));
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Position::new(0, 7);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, 1), None);
        assert_eq!(corner.offset(1, -2), Some(Position::new(1, 5)));
    }

    #[test]
    fn test_line_to_only_for_straight_lines() {
        let from = Position::new(4, 4);
        assert_eq!(from.line_to(Position::new(4, 7)), Some(((0, 1), 3)));
        assert_eq!(from.line_to(Position::new(0, 4)), Some(((-1, 0), 4)));
        assert_eq!(from.line_to(Position::new(5, 5)), None);
        assert_eq!(from.line_to(from), None);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_position_panics() {
        Position::new(8, 0);
    }

    #[test]
    fn test_position_decode_rejects_off_board() {
        let ok: Position = serde_json::from_str(r#"{"row": 7, "col": 0}"#).unwrap();
        assert_eq!(ok, Position::new(7, 0));

        assert!(serde_json::from_str::<Position>(r#"{"row": 8, "col": 0}"#).is_err());
        assert!(serde_json::from_str::<Position>(r#"{"row": 0, "col": -1}"#).is_err());
    }
}
