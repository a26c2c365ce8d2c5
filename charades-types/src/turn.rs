use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{TeamCode, WordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TurnAction {
    Correct,
    Pass,
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnAction::Correct => write!(f, "Correct"),
            TurnAction::Pass => write!(f, "Pass"),
        }
    }
}

/// One word resolved during a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WordOutcome {
    pub idx: u32,
    pub word_id: WordId,
    pub word_text: String,
    pub action: TurnAction,
    pub at_sec: u32,
}

/// A finalized turn, exactly as submitted to the game record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TurnRecord {
    pub team_code: TeamCode,
    pub round_index: u32,
    pub correct_count: u32,
    pub used_pass: u32,
    pub elapsed_sec: u32,
    pub started_at: String, // ISO 8601 string
    pub ended_at: String,   // ISO 8601 string
    pub words: Vec<WordOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FinalizeGameRequest {
    pub turns: Vec<TurnRecord>,
}
