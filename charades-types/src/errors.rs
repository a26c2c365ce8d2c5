use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rejections raised while turning a game description into a playable setup.
/// These are fatal to the current screen; nothing is guessed on the user's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum ConfigError {
    #[error("LIMITED mode requires a duration")]
    MissingDuration,
    #[error("UNTIL_CLEAR mode requires a target count")]
    MissingTargetCount,
    #[error("{field} is not allowed in {mode} mode")]
    UnexpectedField { field: String, mode: String },
    #[error("{field} must be at least 1")]
    ZeroValue { field: String },
    #[error("a game needs at least one team")]
    NoTeams,
    #[error("at most {max} teams are supported, got {count}")]
    TooManyTeams { count: usize, max: usize },
    #[error("team code {code} is used more than once")]
    DuplicateTeamCode { code: String },
    #[error("game code is missing")]
    MissingGameCode,
}
