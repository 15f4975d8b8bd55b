use serde::{Deserialize, Serialize};

use crate::player::Seat;

/// Where the mandatory-capture restriction is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureScope {
    /// Any capture anywhere on the board restricts every piece to captures.
    #[default]
    BoardWide,
    /// Only a piece that itself can capture is restricted to capturing.
    PerPiece,
}

/// Which end-of-game ruleset is applied after each completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndCondition {
    /// A side with no pieces left loses.
    #[default]
    Elimination,
    /// Elimination, plus the one-piece-each endings: king beats man, man
    /// against man is a draw.
    LoneRanks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub capture_scope: CaptureScope,
    pub end_condition: EndCondition,
    /// A side with no legal move after the opponent's turn loses.
    pub blocked_side_loses: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            capture_scope: CaptureScope::BoardWide,
            end_condition: EndCondition::Elimination,
            blocked_side_loses: true,
        }
    }
}

impl RuleSet {
    /// Load a rule set from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Winner(Seat),
    Draw,
}

/// Living pieces of one side, split by rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub men: usize,
    pub kings: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.men + self.kings
    }
}

impl EndCondition {
    /// Decide the match from material alone, or `None` if play goes on.
    /// A turn only removes the opponent's pieces, so at most one side is empty.
    pub fn evaluate(&self, local: Tally, remote: Tally) -> Option<Verdict> {
        match (local.total(), remote.total()) {
            (_, 0) => return Some(Verdict::Winner(Seat::Local)),
            (0, _) => return Some(Verdict::Winner(Seat::Remote)),
            _ => {}
        }

        if *self == EndCondition::Elimination || local.total() != 1 || remote.total() != 1 {
            return None;
        }

        match (local.kings, remote.kings) {
            (1, 0) => Some(Verdict::Winner(Seat::Local)),
            (0, 1) => Some(Verdict::Winner(Seat::Remote)),
            (0, 0) => Some(Verdict::Draw),
            _ => None,
        }
    }
}
