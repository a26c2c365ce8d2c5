use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameMode, GameStatus, SessionId};

/// What the on-screen timer shows for the current turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ClockReadout {
    pub seconds: u32,     // Remaining for LIMITED, elapsed for UNTIL_CLEAR
    pub display: String,  // mm:ss
    pub counts_down: bool,
    pub is_urgent: bool,
}

/// View-ready snapshot of a play session. Never fed back into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionView {
    pub session_id: SessionId,
    pub game_code: String,
    pub status: GameStatus,
    pub mode: GameMode,
    pub team_name: String,
    pub team_color_hex: String,
    pub round_number: u32, // 1-based
    pub correct_count: u32,
    pub used_pass: u32,
    pub pass_limit: u32,
    pub target_count: Option<u32>,
    pub clock: ClockReadout,
    pub current_word: Option<String>,
    pub word_number: u32, // 1-based
    pub can_pass: bool,
    pub turns_completed: u32,
    pub is_saved: bool,
}
