use tracing::{debug, info, instrument};

use crate::error::{GameError, InvariantViolation};
use crate::grid::{BOARD_SIZE, Grid, Position};
use crate::movegen::{self, Capture, Occupancy, Occupant};
use crate::piece::{Piece, PieceRef};
use crate::player::{PIECES_PER_PLAYER, Player, PlayerId, PlayerInfo, Seat};
use crate::record::MoveRecord;
use crate::rules::{CaptureScope, RuleSet, Tally, Verdict};
use crate::status::MatchStatus;

/// Bookkeeping for the local turn currently being played. Lives only from the
/// first selection until the move record is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSession {
    first_origin: Position,
    current_origin: Position,
    captured: Vec<Position>,
}

impl TurnSession {
    fn new(origin: Position) -> Self {
        TurnSession {
            first_origin: origin,
            current_origin: origin,
            captured: Vec::new(),
        }
    }

    pub fn first_origin(&self) -> Position {
        self.first_origin
    }

    /// Cell of the piece being moved; follows it through a capture chain.
    pub fn current_origin(&self) -> Position {
        self.current_origin
    }

    pub fn captured(&self) -> &[Position] {
        &self.captured
    }

    /// Once a capture is made the turn is locked to that piece.
    pub fn is_chaining(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// Result of one `execute_move` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece captured and can capture again; the turn is not over.
    Continue {
        at: Position,
        destinations: Vec<Position>,
    },
    /// The turn is over. The record goes to the opponent.
    Completed(MoveRecord),
}

/// Both players' pieces, captured ones included, in turn order.
#[derive(Debug, Clone, Copy)]
pub struct AllPieces<'a> {
    pub player1: &'a [Piece],
    pub player2: &'a [Piece],
}

#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    players: [Player; 2],
    /// Seats in turn order; the first one moved first.
    order: [Seat; 2],
    status: MatchStatus,
    winner: Option<Seat>,
    session: Option<TurnSession>,
    rules: RuleSet,
}

fn seat_index(seat: Seat) -> usize {
    match seat {
        Seat::Local => 0,
        Seat::Remote => 1,
    }
}

impl Board {
    /// Create a board with the default rule set
    pub fn new() -> Self {
        Self::with_rules(RuleSet::default())
    }

    pub fn with_rules(rules: RuleSet) -> Self {
        let mut board = Board {
            grid: Grid::new(),
            players: [Player::new(Seat::Local), Player::new(Seat::Remote)],
            order: [Seat::Local, Seat::Remote],
            status: MatchStatus::NoMatch,
            winner: None,
            session: None,
            rules,
        };
        board.setup();
        board
    }

    /// Put both sides' men on their two starting rows
    fn setup(&mut self) {
        for seat in [Seat::Local, Seat::Remote] {
            let rows = seat.starting_rows();
            for index in 0..PIECES_PER_PLAYER {
                let pos = Position::new(rows[index / BOARD_SIZE], index % BOARD_SIZE);
                self.link(pos, PieceRef { seat, index });
            }
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn session(&self) -> Option<&TurnSession> {
        self.session.as_ref()
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat_index(seat)]
    }

    fn player_mut(&mut self, seat: Seat) -> &mut Player {
        &mut self.players[seat_index(seat)]
    }

    pub fn local_player(&self) -> &Player {
        self.player(Seat::Local)
    }

    pub fn remote_player(&self) -> &Player {
        self.player(Seat::Remote)
    }

    /// The winning player once the match is finished; `None` for a draw or
    /// an unfinished match.
    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|seat| self.player(seat))
    }

    fn winner_id(&self) -> Option<PlayerId> {
        self.winner().map(|player| player.id().clone())
    }

    fn seat_of(&self, id: &PlayerId) -> Option<Seat> {
        self.players
            .iter()
            .find(|player| player.id() == id)
            .map(|player| player.seat())
    }

    fn piece(&self, piece: PieceRef) -> &Piece {
        &self.player(piece.seat).pieces()[piece.index]
    }

    fn piece_mut(&mut self, piece: PieceRef) -> &mut Piece {
        self.player_mut(piece.seat).piece_mut(piece.index)
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.grid.get(pos).map(|piece| self.piece(piece))
    }

    pub fn all_pieces(&self) -> AllPieces<'_> {
        AllPieces {
            player1: self.player(self.order[0]).pieces(),
            player2: self.player(self.order[1]).pieces(),
        }
    }

    /// Set both sides of the cell/piece link. Callers guarantee the cell is free.
    fn link(&mut self, pos: Position, piece: PieceRef) {
        self.grid.set(pos, Some(piece));
        self.piece_mut(piece).set_cell(Some(pos));
    }

    fn place(&mut self, pos: Position, piece: PieceRef) -> Result<(), InvariantViolation> {
        if let Some(other) = self.grid.get(pos) {
            return Err(InvariantViolation::Inconsistent(format!(
                "{pos} already holds {other:?}"
            )));
        }
        let current = self.piece(piece);
        if current.is_captured() || current.cell().is_some() {
            return Err(InvariantViolation::Inconsistent(format!(
                "{piece:?} cannot be placed at {pos}"
            )));
        }
        self.link(pos, piece);
        Ok(())
    }

    fn detach(&mut self, pos: Position) -> Result<PieceRef, InvariantViolation> {
        let piece = self.grid.get(pos).ok_or_else(|| {
            InvariantViolation::Inconsistent(format!("no piece to detach at {pos}"))
        })?;
        self.grid.set(pos, None);
        self.piece_mut(piece).set_cell(None);
        Ok(piece)
    }

    fn relocate(&mut self, from: Position, to: Position) -> Result<PieceRef, InvariantViolation> {
        let piece = self.detach(from)?;
        self.place(to, piece)?;
        Ok(piece)
    }

    /// Remove a captured piece from play. It stays in its owner's collection.
    fn take(&mut self, pos: Position) -> Result<(), InvariantViolation> {
        let piece = self.detach(pos)?;
        self.piece_mut(piece).capture()
    }

    fn set_turn(&mut self, seat: Option<Seat>) {
        for player in &mut self.players {
            let turn = Some(player.seat()) == seat;
            player.set_turn(turn);
        }
    }

    /// Begin a match. The first entry of `players` moves first.
    pub fn start_match(
        &mut self,
        players: &[PlayerInfo; 2],
        local_id: &PlayerId,
    ) -> Result<(), GameError> {
        if self.status != MatchStatus::NoMatch {
            return Err(GameError::InvalidStatusTransition {
                operation: "start a match",
                status: self.status,
            });
        }
        let local_index = players
            .iter()
            .position(|info| &info.id == local_id)
            .ok_or_else(|| GameError::UnknownPlayer(local_id.clone()))?;

        self.player_mut(Seat::Local).assign(&players[local_index]);
        self.player_mut(Seat::Remote).assign(&players[1 - local_index]);
        self.order = if local_index == 0 {
            [Seat::Local, Seat::Remote]
        } else {
            [Seat::Remote, Seat::Local]
        };

        let first = self.order[0];
        self.status = match first {
            Seat::Local => MatchStatus::WaitingLocalMove,
            Seat::Remote => MatchStatus::WaitingRemoteMove,
        };
        self.set_turn(Some(first));

        info!(
            local = %self.local_player().id(),
            remote = %self.remote_player().id(),
            status = %self.status,
            "match started"
        );
        Ok(())
    }

    fn check_local_turn(&self, operation: &'static str) -> Result<(), GameError> {
        match self.status {
            MatchStatus::WaitingLocalMove | MatchStatus::OccurringLocalMove => Ok(()),
            MatchStatus::WaitingRemoteMove => Err(GameError::NotYourTurn),
            status => Err(GameError::InvalidStatusTransition { operation, status }),
        }
    }

    /// Cell of the piece that must keep capturing, if a chain is under way.
    fn chain_position(&self) -> Option<Position> {
        self.session
            .as_ref()
            .filter(|session| session.is_chaining())
            .map(|session| session.current_origin)
    }

    fn capture_is_mandatory_elsewhere(&self) -> bool {
        self.rules.capture_scope == CaptureScope::BoardWide
            && movegen::any_capture(self, Seat::Local)
    }

    /// Destinations selectable for the piece at `origin`, with mandatory
    /// capture applied. While a chain is under way only the chaining piece has
    /// destinations, and only captures.
    pub fn possible_moves(&self, origin: Position) -> Vec<Position> {
        match self.chain_position() {
            Some(at) if at == origin => movegen::capture_moves(self, origin)
                .into_iter()
                .map(|capture| capture.landing)
                .collect(),
            Some(_) => Vec::new(),
            None => movegen::legal_destinations(self, origin, self.rules.capture_scope),
        }
    }

    /// Pick the piece to move and open the turn session.
    pub fn select_origin(&mut self, origin: Position) -> Result<Vec<Position>, GameError> {
        let destinations = self
            .validate_selection(origin)
            .inspect_err(|err| debug!(%err, "selection rejected"))?;

        if self.chain_position().is_none() {
            self.session = Some(TurnSession::new(origin));
            self.status = MatchStatus::OccurringLocalMove;
            self.set_turn(None);
            debug!(%origin, count = destinations.len(), "piece selected");
        }
        Ok(destinations)
    }

    fn validate_selection(&self, origin: Position) -> Result<Vec<Position>, GameError> {
        self.check_local_turn("select a piece")?;
        if let Some(at) = self.chain_position() {
            if at != origin {
                return Err(GameError::CaptureChainInProgress(at));
            }
            return Ok(self.possible_moves(origin));
        }

        let piece = self
            .grid
            .get(origin)
            .ok_or(GameError::NoPieceAtOrigin(origin))?;
        if piece.seat != Seat::Local {
            return Err(GameError::NotYourPiece(origin));
        }

        let destinations = self.possible_moves(origin);
        if destinations.is_empty() {
            if self.capture_is_mandatory_elsewhere() {
                return Err(GameError::MandatoryCaptureViolation {
                    reason: format!("the piece at {origin} cannot capture while another piece can"),
                });
            }
            return Err(GameError::PieceImmobile(origin));
        }
        Ok(destinations)
    }

    /// Drop the current selection. Not allowed once a capture has been made.
    pub fn cancel_selection(&mut self) -> Result<(), GameError> {
        if self.status != MatchStatus::OccurringLocalMove {
            return Err(GameError::InvalidStatusTransition {
                operation: "cancel a selection",
                status: self.status,
            });
        }
        if let Some(at) = self.chain_position() {
            return Err(GameError::CaptureChainInProgress(at));
        }
        self.session = None;
        self.status = MatchStatus::WaitingLocalMove;
        self.set_turn(Some(Seat::Local));
        Ok(())
    }

    /// Move the local piece at `origin` to `destination`.
    ///
    /// Nothing changes when an error is returned, except for
    /// [`GameError::Invariant`], which means the engine itself is broken.
    #[instrument(level = "debug", skip(self))]
    pub fn execute_move(
        &mut self,
        origin: Position,
        destination: Position,
    ) -> Result<MoveOutcome, GameError> {
        let capture = self
            .validate_local_move(origin, destination)
            .inspect_err(|err| debug!(%err, "move rejected"))?;

        if self.chain_position().is_none() {
            self.session = Some(TurnSession::new(origin));
        }
        self.status = MatchStatus::OccurringLocalMove;
        self.set_turn(None);
        self.relocate(origin, destination)?;

        if let Some(capture) = capture {
            self.take(capture.captured)?;
            if let Some(session) = self.session.as_mut() {
                session.captured.push(capture.captured);
                session.current_origin = destination;
            }
            debug!(captured = %capture.captured, "piece captured");

            let next = movegen::capture_moves(self, destination);
            if !next.is_empty() {
                debug!(at = %destination, "capture chain continues");
                debug_assert!(self.verify_integrity().is_ok());
                return Ok(MoveOutcome::Continue {
                    at: destination,
                    destinations: next.into_iter().map(|c| c.landing).collect(),
                });
            }
        }

        let record = self.finish_local_turn(destination)?;
        Ok(MoveOutcome::Completed(record))
    }

    fn validate_local_move(
        &self,
        origin: Position,
        destination: Position,
    ) -> Result<Option<Capture>, GameError> {
        self.check_local_turn("move a piece")?;
        let chaining = self.chain_position();
        if let Some(at) = chaining {
            if at != origin {
                return Err(GameError::CaptureChainInProgress(at));
            }
        }

        let piece = self
            .grid
            .get(origin)
            .ok_or(GameError::NoPieceAtOrigin(origin))?;
        if piece.seat != Seat::Local {
            return Err(GameError::NotYourPiece(origin));
        }

        let captures = movegen::capture_moves(self, origin);
        if let Some(capture) = captures.iter().find(|c| c.landing == destination) {
            return Ok(Some(*capture));
        }

        if chaining.is_some() || !movegen::simple_moves(self, origin).contains(&destination) {
            return Err(GameError::IllegalDestination {
                from: origin,
                to: destination,
            });
        }
        if !captures.is_empty() {
            return Err(GameError::MandatoryCaptureViolation {
                reason: format!("the piece at {origin} can capture"),
            });
        }
        if self.capture_is_mandatory_elsewhere() {
            return Err(GameError::MandatoryCaptureViolation {
                reason: "another piece can capture".to_string(),
            });
        }
        Ok(None)
    }

    /// Promotion, end-of-game check and record building once the piece at
    /// `destination` has nothing left to capture.
    fn finish_local_turn(&mut self, destination: Position) -> Result<MoveRecord, GameError> {
        let mover = self.grid.get(destination).ok_or_else(|| {
            InvariantViolation::Inconsistent(format!("moved piece missing from {destination}"))
        })?;
        let session = self
            .session
            .take()
            .ok_or_else(|| InvariantViolation::Inconsistent("no turn session".to_string()))?;

        let promoted = self.promote_if_due(mover, destination)?;

        match self.evaluate_end(Seat::Local) {
            Some(verdict) => self.conclude(verdict),
            None => {
                self.status = MatchStatus::WaitingRemoteMove;
                self.set_turn(Some(Seat::Remote));
            }
        }

        let record = MoveRecord {
            origin: session.first_origin,
            destination,
            captured_pieces: session.captured,
            promoted,
            winner: self.winner_id(),
            status: self.status,
        };
        debug!(
            origin = %record.origin,
            destination = %record.destination,
            captured = record.captured_pieces.len(),
            promoted,
            status = %self.status,
            "local move completed"
        );
        debug_assert!(self.verify_integrity().is_ok());
        Ok(record)
    }

    fn promote_if_due(&mut self, piece: PieceRef, pos: Position) -> Result<bool, GameError> {
        let promotion_row = self.player(piece.seat).promotion_row();
        if self.piece(piece).is_king() || pos.row != promotion_row {
            return Ok(false);
        }
        self.piece_mut(piece).promote()?;
        info!(%pos, seat = ?piece.seat, "man promoted to king");
        Ok(true)
    }

    fn tally(&self, seat: Seat) -> Tally {
        self.player(seat)
            .living()
            .fold(Tally::default(), |mut tally, piece| {
                if piece.is_king() {
                    tally.kings += 1;
                } else {
                    tally.men += 1;
                }
                tally
            })
    }

    /// Decide the match after `mover` completed a turn, or `None` if play goes on.
    fn evaluate_end(&self, mover: Seat) -> Option<Verdict> {
        let material = self
            .rules
            .end_condition
            .evaluate(self.tally(Seat::Local), self.tally(Seat::Remote));
        if material.is_some() {
            return material;
        }
        if self.rules.blocked_side_loses && !movegen::has_any_move(self, mover.opponent()) {
            return Some(Verdict::Winner(mover));
        }
        None
    }

    fn conclude(&mut self, verdict: Verdict) {
        self.status = MatchStatus::Finished;
        self.winner = match verdict {
            Verdict::Winner(seat) => Some(seat),
            Verdict::Draw => None,
        };
        self.session = None;
        self.set_turn(None);
        match self.winner() {
            Some(player) => info!(winner = %player.id(), "match finished"),
            None => info!("match finished in a draw"),
        }
    }

    /// Replay a turn the opponent made in its own frame of reference.
    #[instrument(
        level = "debug",
        skip(self, record),
        fields(origin = %record.origin, destination = %record.destination)
    )]
    pub fn receive_move(&mut self, record: &MoveRecord) -> Result<(), GameError> {
        if self.status != MatchStatus::WaitingRemoteMove {
            return Err(GameError::InvalidStatusTransition {
                operation: "receive a move",
                status: self.status,
            });
        }

        let local = record.mirrored();
        let verdict = self
            .validate_remote_move(&local)
            .inspect_err(|err| debug!(%err, "remote move rejected"))?;

        for &cell in &local.captured_pieces {
            self.take(cell)?;
        }
        let mover = if local.origin == local.destination {
            self.grid.get(local.origin).ok_or_else(|| {
                InvariantViolation::Inconsistent(format!(
                    "remote piece missing from {}",
                    local.origin
                ))
            })?
        } else {
            self.relocate(local.origin, local.destination)?
        };
        if local.promoted {
            self.piece_mut(mover).promote()?;
        }

        match verdict {
            Some(verdict) => self.conclude(verdict),
            None => {
                self.status = MatchStatus::WaitingLocalMove;
                self.set_turn(Some(Seat::Local));
            }
        }
        debug!(
            captured = local.captured_pieces.len(),
            promoted = local.promoted,
            status = %self.status,
            "remote move applied"
        );
        debug_assert!(self.verify_integrity().is_ok());
        Ok(())
    }

    fn validate_remote_move(&self, local: &MoveRecord) -> Result<Option<Verdict>, GameError> {
        let malformed = GameError::MalformedRecord;

        let mover = self
            .grid
            .get(local.origin)
            .filter(|piece| piece.seat == Seat::Remote)
            .ok_or_else(|| malformed(format!("no opponent piece at {}", local.origin)))?;
        let landing_ok = self.grid.is_empty(local.destination)
            || local.destination == local.origin
            || local.captured_pieces.contains(&local.destination);
        if !landing_ok {
            return Err(malformed(format!(
                "destination {} is occupied",
                local.destination
            )));
        }

        for (i, &cell) in local.captured_pieces.iter().enumerate() {
            if local.captured_pieces[..i].contains(&cell) {
                return Err(malformed(format!("{cell} captured twice")));
            }
            if !self
                .grid
                .get(cell)
                .is_some_and(|piece| piece.seat == Seat::Local)
            {
                return Err(malformed(format!("no local piece to capture at {cell}")));
            }
        }

        if local.promoted {
            if self.piece(mover).is_king() {
                return Err(malformed("promoted piece is already a king".to_string()));
            }
            if local.destination.row != self.remote_player().promotion_row() {
                return Err(malformed(format!(
                    "promotion away from the last row at {}",
                    local.destination
                )));
            }
        }

        match (local.status, &local.winner) {
            (MatchStatus::Finished, None) => Ok(Some(Verdict::Draw)),
            (MatchStatus::Finished, Some(id)) => self
                .seat_of(id)
                .map(|seat| Some(Verdict::Winner(seat)))
                .ok_or_else(|| GameError::UnknownPlayer(id.clone())),
            (status, None) if status.is_in_progress() => Ok(None),
            (status, _) => Err(malformed(format!(
                "unexpected status {status} for a completed move"
            ))),
        }
    }

    /// The opponent left. Ends any match under way.
    pub fn abandon(&mut self) -> Result<(), GameError> {
        if !self.status.is_in_progress() {
            return Err(GameError::InvalidStatusTransition {
                operation: "abandon the match",
                status: self.status,
            });
        }
        self.status = MatchStatus::Abandoned;
        self.session = None;
        self.set_turn(None);
        info!("match abandoned");
        Ok(())
    }

    /// Replace a finished or abandoned board with a fresh one, keeping the rules.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if !self.status.is_terminal() {
            return Err(GameError::InvalidStatusTransition {
                operation: "reset the board",
                status: self.status,
            });
        }
        *self = Board::with_rules(self.rules.clone());
        Ok(())
    }

    /// Short text describing the match state for display.
    pub fn status_message(&self) -> String {
        match self.status {
            MatchStatus::NoMatch => "Waiting for a match to start".to_string(),
            MatchStatus::WaitingLocalMove => {
                format!("{}, it is your turn", self.local_player().name())
            }
            MatchStatus::OccurringLocalMove => match self.chain_position() {
                Some(at) => format!("Keep capturing with the piece at {at}"),
                None => "Choose a destination".to_string(),
            },
            MatchStatus::WaitingRemoteMove => {
                format!("Waiting for {}'s move", self.remote_player().name())
            }
            MatchStatus::Finished => match self.winner() {
                Some(player) => format!("{} wins", player.name()),
                None => "The match ended in a draw".to_string(),
            },
            MatchStatus::Abandoned => "The opponent abandoned the match".to_string(),
        }
    }

    /// Check the piece/cell links, piece counts and turn flags.
    pub fn verify_integrity(&self) -> Result<(), InvariantViolation> {
        for player in &self.players {
            if player.pieces().len() != PIECES_PER_PLAYER {
                return Err(InvariantViolation::Inconsistent(format!(
                    "{:?} owns {} pieces",
                    player.seat(),
                    player.pieces().len()
                )));
            }
            for (index, piece) in player.pieces().iter().enumerate() {
                let handle = PieceRef {
                    seat: player.seat(),
                    index,
                };
                match (piece.is_captured(), piece.cell()) {
                    (true, None) => {}
                    (false, Some(pos)) if self.grid.get(pos) == Some(handle) => {}
                    _ => {
                        return Err(InvariantViolation::Inconsistent(format!(
                            "{handle:?} and its cell disagree"
                        )));
                    }
                }
            }
        }

        for (pos, handle) in self.grid.occupied() {
            if self.piece(handle).cell() != Some(pos) {
                return Err(InvariantViolation::Inconsistent(format!(
                    "{pos} points at {handle:?} which is elsewhere"
                )));
            }
        }

        let expected = match self.status {
            MatchStatus::WaitingLocalMove => (true, false),
            MatchStatus::WaitingRemoteMove => (false, true),
            _ => (false, false),
        };
        let actual = (
            self.local_player().is_its_turn(),
            self.remote_player().is_its_turn(),
        );
        if expected != actual {
            return Err(InvariantViolation::Inconsistent(format!(
                "turn flags {actual:?} do not fit status {}",
                self.status
            )));
        }
        Ok(())
    }
}

impl Occupancy for Board {
    fn occupant(&self, pos: Position) -> Option<Occupant> {
        self.grid.get(pos).map(|handle| Occupant {
            seat: handle.seat,
            rank: self.piece(handle).rank(),
            forward: self.player(handle.seat).forward(),
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Board {
    /// Board built from eight text rows: `o`/`O` local man/king, `x`/`X`
    /// remote man/king. Alice plays locally against Bob and it is her turn.
    /// Pieces not drawn count as already captured.
    pub(crate) fn from_rows(rows: [&str; BOARD_SIZE], rules: RuleSet) -> Board {
        let mut board = Board {
            grid: Grid::new(),
            players: [Player::new(Seat::Local), Player::new(Seat::Remote)],
            order: [Seat::Local, Seat::Remote],
            status: MatchStatus::WaitingLocalMove,
            winner: None,
            session: None,
            rules,
        };
        board
            .player_mut(Seat::Local)
            .assign(&PlayerInfo::new("alice", "Alice"));
        board
            .player_mut(Seat::Remote)
            .assign(&PlayerInfo::new("bob", "Bob"));

        let mut used = [0usize; 2];
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let (seat, king) = match ch {
                    'o' => (Seat::Local, false),
                    'O' => (Seat::Local, true),
                    'x' => (Seat::Remote, false),
                    'X' => (Seat::Remote, true),
                    _ => continue,
                };
                let index = used[seat_index(seat)];
                used[seat_index(seat)] += 1;
                let handle = PieceRef { seat, index };
                board.link(Position::new(row, col), handle);
                if king {
                    board.piece_mut(handle).promote().unwrap();
                }
            }
        }
        for seat in [Seat::Local, Seat::Remote] {
            for index in used[seat_index(seat)]..PIECES_PER_PLAYER {
                board.piece_mut(PieceRef { seat, index }).capture().unwrap();
            }
        }
        board.set_turn(Some(Seat::Local));
        board
    }

    pub(crate) fn set_status_for_test(&mut self, status: MatchStatus) {
        self.status = status;
        match status {
            MatchStatus::WaitingLocalMove => self.set_turn(Some(Seat::Local)),
            MatchStatus::WaitingRemoteMove => self.set_turn(Some(Seat::Remote)),
            _ => self.set_turn(None),
        }
    }
}
