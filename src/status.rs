use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::RecordError;

/// Top-level state of a match. Serialized as its numeric wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MatchStatus {
    NoMatch,
    Finished,
    WaitingLocalMove,
    OccurringLocalMove,
    WaitingRemoteMove,
    Abandoned,
}

/// Coarse projection carried next to the numeric code on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchProgress {
    Next,
    Finished,
}

impl MatchStatus {
    pub fn code(&self) -> u8 {
        match self {
            MatchStatus::NoMatch => 1,
            MatchStatus::Finished => 2,
            MatchStatus::WaitingLocalMove => 3,
            MatchStatus::OccurringLocalMove => 4,
            MatchStatus::WaitingRemoteMove => 5,
            MatchStatus::Abandoned => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<MatchStatus> {
        match code {
            1 => Some(MatchStatus::NoMatch),
            2 => Some(MatchStatus::Finished),
            3 => Some(MatchStatus::WaitingLocalMove),
            4 => Some(MatchStatus::OccurringLocalMove),
            5 => Some(MatchStatus::WaitingRemoteMove),
            6 => Some(MatchStatus::Abandoned),
            _ => None,
        }
    }

    pub fn progress(&self) -> MatchProgress {
        if self.is_terminal() {
            MatchProgress::Finished
        } else {
            MatchProgress::Next
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Finished | MatchStatus::Abandoned)
    }

    /// Statuses in which a match is under way and can still be abandoned.
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            MatchStatus::WaitingLocalMove
                | MatchStatus::OccurringLocalMove
                | MatchStatus::WaitingRemoteMove
        )
    }
}

impl From<MatchStatus> for u8 {
    fn from(status: MatchStatus) -> u8 {
        status.code()
    }
}

impl TryFrom<u8> for MatchStatus {
    type Error = RecordError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        MatchStatus::from_code(code).ok_or(RecordError::UnknownStatus(code))
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchStatus::NoMatch => "NO_MATCH",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::WaitingLocalMove => "WAITING_LOCAL_MOVE",
            MatchStatus::OccurringLocalMove => "OCCURRING_LOCAL_MOVE",
            MatchStatus::WaitingRemoteMove => "WAITING_REMOTE_MOVE",
            MatchStatus::Abandoned => "ABANDONED",
        };
        f.write_str(name)
    }
}
