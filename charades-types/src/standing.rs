use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::TeamCode;

/// A team's aggregated performance across all finalized turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Standing {
    pub team_code: TeamCode,
    pub team_name: String,
    pub total_correct: u32,
    pub total_time: u32,
    pub total_pass: u32,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StandingsReport {
    pub standings: Vec<Standing>,
    pub winners: Vec<Standing>,
}
