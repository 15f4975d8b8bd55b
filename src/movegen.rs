//! Legal destination generation for men and flying kings.
//!
//! Everything here is a pure function of an [`Occupancy`] snapshot. The
//! generator knows nothing about match status or whose turn it is; callers
//! decide which side is asking.

use crate::grid::{ORTHOGONAL, Position};
use crate::piece::Rank;
use crate::player::Seat;
use crate::rules::CaptureScope;

/// What the generator needs to know about an occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub seat: Seat,
    pub rank: Rank,
    /// Signed row step of the owner's forward direction.
    pub forward: isize,
}

/// Read-only view of the board used by move generation.
pub trait Occupancy {
    fn occupant(&self, pos: Position) -> Option<Occupant>;

    fn is_empty(&self, pos: Position) -> bool {
        self.occupant(pos).is_none()
    }
}

/// A capturing step: where the piece lands and which cell it empties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub landing: Position,
    pub captured: Position,
}

/// Forward and both sideways steps; a man never moves backward.
fn man_directions(forward: isize) -> [(isize, isize); 3] {
    [(forward, 0), (0, -1), (0, 1)]
}

/// Non-capturing destinations of the piece at `from`.
pub fn simple_moves<B: Occupancy + ?Sized>(board: &B, from: Position) -> Vec<Position> {
    let Some(piece) = board.occupant(from) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece.rank {
        Rank::Man => {
            for (dr, dc) in man_directions(piece.forward) {
                if let Some(to) = from.offset(dr, dc) {
                    if board.is_empty(to) {
                        moves.push(to);
                    }
                }
            }
        }
        Rank::King => {
            for (dr, dc) in ORTHOGONAL {
                let mut cursor = from;
                while let Some(to) = cursor.offset(dr, dc) {
                    if !board.is_empty(to) {
                        break;
                    }
                    moves.push(to);
                    cursor = to;
                }
            }
        }
    }
    moves
}

/// Capturing steps available to the piece at `from`.
pub fn capture_moves<B: Occupancy + ?Sized>(board: &B, from: Position) -> Vec<Capture> {
    let Some(piece) = board.occupant(from) else {
        return Vec::new();
    };
    let is_enemy = |pos: Position| {
        board
            .occupant(pos)
            .is_some_and(|other| other.seat != piece.seat)
    };

    let mut captures = Vec::new();
    match piece.rank {
        Rank::Man => {
            for (dr, dc) in man_directions(piece.forward) {
                let Some(over) = from.offset(dr, dc) else {
                    continue;
                };
                let Some(landing) = over.offset(dr, dc) else {
                    continue;
                };
                if is_enemy(over) && board.is_empty(landing) {
                    captures.push(Capture {
                        landing,
                        captured: over,
                    });
                }
            }
        }
        Rank::King => {
            for (dr, dc) in ORTHOGONAL {
                // Slide over empty cells to the first piece in this direction.
                let mut cursor = from;
                let enemy = loop {
                    match cursor.offset(dr, dc) {
                        None => break None,
                        Some(next) if board.is_empty(next) => cursor = next,
                        Some(next) if is_enemy(next) => break Some(next),
                        Some(_) => break None,
                    }
                };
                let Some(captured) = enemy else {
                    continue;
                };

                // Any empty cell beyond it, up to the next piece or the edge.
                let mut cursor = captured;
                while let Some(landing) = cursor.offset(dr, dc) {
                    if !board.is_empty(landing) {
                        break;
                    }
                    captures.push(Capture { landing, captured });
                    cursor = landing;
                }
            }
        }
    }
    captures
}

pub fn has_capture<B: Occupancy + ?Sized>(board: &B, from: Position) -> bool {
    !capture_moves(board, from).is_empty()
}

/// Cells holding pieces of `seat`.
fn cells_of<B: Occupancy + ?Sized>(board: &B, seat: Seat) -> impl Iterator<Item = Position> + '_ {
    Position::all().filter(move |&pos| board.occupant(pos).is_some_and(|o| o.seat == seat))
}

/// Whether any piece of `seat` can capture; this is what makes capturing
/// mandatory board-wide.
pub fn any_capture<B: Occupancy + ?Sized>(board: &B, seat: Seat) -> bool {
    cells_of(board, seat).any(|pos| has_capture(board, pos))
}

/// Whether `seat` has any legal move at all.
pub fn has_any_move<B: Occupancy + ?Sized>(board: &B, seat: Seat) -> bool {
    cells_of(board, seat)
        .any(|pos| has_capture(board, pos) || !simple_moves(board, pos).is_empty())
}

/// Destinations the owner of the piece at `from` may choose, with the
/// mandatory-capture restriction applied for the given scope.
pub fn legal_destinations<B: Occupancy + ?Sized>(
    board: &B,
    from: Position,
    scope: CaptureScope,
) -> Vec<Position> {
    let Some(piece) = board.occupant(from) else {
        return Vec::new();
    };

    let captures = capture_moves(board, from);
    if !captures.is_empty() {
        return captures.into_iter().map(|c| c.landing).collect();
    }

    let capture_elsewhere = match scope {
        CaptureScope::BoardWide => any_capture(board, piece.seat),
        CaptureScope::PerPiece => false,
    };
    if capture_elsewhere {
        Vec::new()
    } else {
        simple_moves(board, from)
    }
}
