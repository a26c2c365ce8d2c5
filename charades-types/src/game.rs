use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::ConfigError;

/// Identifies one local play of a game (a restart keeps the same id).
pub type SessionId = Uuid;
pub type GameCode = String;
pub type TeamCode = String;

/// Team codes run A..Z, so a game holds at most this many teams.
pub const MAX_TEAMS: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum GameMode {
    Limited,    // Fixed duration per turn
    UntilClear, // Fixed correct-count target per turn
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Limited => write!(f, "Time limit"),
            GameMode::UntilClear => write!(f, "Until clear"),
        }
    }
}

/// How a turn terminates, with the bound for that mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum TurnLimit {
    #[serde(rename_all = "camelCase")]
    Limited { duration_sec: u32 },
    #[serde(rename_all = "camelCase")]
    UntilClear { target_count: u32 },
}

impl TurnLimit {
    pub fn mode(&self) -> GameMode {
        match self {
            TurnLimit::Limited { .. } => GameMode::Limited,
            TurnLimit::UntilClear { .. } => GameMode::UntilClear,
        }
    }

    pub fn duration_sec(&self) -> Option<u32> {
        match self {
            TurnLimit::Limited { duration_sec } => Some(*duration_sec),
            TurnLimit::UntilClear { .. } => None,
        }
    }

    pub fn target_count(&self) -> Option<u32> {
        match self {
            TurnLimit::UntilClear { target_count } => Some(*target_count),
            TurnLimit::Limited { .. } => None,
        }
    }

    /// Pair a mode with the optional bounds carried on the wire.
    /// Exactly the bound matching the mode must be present and non-zero.
    pub fn from_parts(
        mode: GameMode,
        duration_sec: Option<u32>,
        target_count: Option<u32>,
    ) -> Result<Self, ConfigError> {
        match mode {
            GameMode::Limited => {
                if target_count.is_some() {
                    return Err(ConfigError::UnexpectedField {
                        field: "targetCount".to_string(),
                        mode: "LIMITED".to_string(),
                    });
                }
                match duration_sec {
                    None => Err(ConfigError::MissingDuration),
                    Some(0) => Err(ConfigError::ZeroValue {
                        field: "durationSec".to_string(),
                    }),
                    Some(duration_sec) => Ok(TurnLimit::Limited { duration_sec }),
                }
            }
            GameMode::UntilClear => {
                if duration_sec.is_some() {
                    return Err(ConfigError::UnexpectedField {
                        field: "durationSec".to_string(),
                        mode: "UNTIL_CLEAR".to_string(),
                    });
                }
                match target_count {
                    None => Err(ConfigError::MissingTargetCount),
                    Some(0) => Err(ConfigError::ZeroValue {
                        field: "targetCount".to_string(),
                    }),
                    Some(target_count) => Ok(TurnLimit::UntilClear { target_count }),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameConfig {
    pub limit: TurnLimit,
    pub pass_limit: u32,
    pub rounds_per_team: u32,
}

impl GameConfig {
    pub fn new(limit: TurnLimit, pass_limit: u32, rounds_per_team: u32) -> Result<Self, ConfigError> {
        if rounds_per_team == 0 {
            return Err(ConfigError::ZeroValue {
                field: "roundsPerTeam".to_string(),
            });
        }
        Ok(Self {
            limit,
            pass_limit,
            rounds_per_team,
        })
    }

    pub fn mode(&self) -> GameMode {
        self.limit.mode()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Team {
    pub code: TeamCode,
    pub name: String,
    pub color: String,     // Palette key, e.g. BLUE
    pub color_hex: String, // e.g. #3B82F6
    pub order_index: u32,
}

/// Code assigned to the team at `index` in creation order ("A", "B", ...).
pub fn team_code_for(index: usize) -> Option<TeamCode> {
    if index >= MAX_TEAMS {
        return None;
    }
    Some(char::from(b'A' + index as u8).to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum GameStatus {
    Ready,        // Loaded, no turn played yet
    Playing,      // Turn in progress, clock running
    Paused,       // Turn in progress, clock held
    Intermission, // Between a finished turn and the next one
    Finished,     // Last turn played or word pool exhausted
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Ready => "Ready",
            GameStatus::Playing => "Playing",
            GameStatus::Paused => "Paused",
            GameStatus::Intermission => "Intermission",
            GameStatus::Finished => "Finished",
        };
        f.write_str(label)
    }
}

/// Game description as returned by the game detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameDetail {
    pub code: GameCode,
    pub mode: GameMode,
    pub duration_sec: Option<u32>,
    pub target_count: Option<u32>,
    pub pass_limit: u32,
    pub rounds_per_team: u32,
    pub teams: Vec<Team>,
}

/// A validated, playable game: configuration plus teams in rotation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameSetup {
    pub code: GameCode,
    pub config: GameConfig,
    pub teams: Vec<Team>,
}

impl GameSetup {
    pub fn new(code: GameCode, config: GameConfig, mut teams: Vec<Team>) -> Result<Self, ConfigError> {
        if code.trim().is_empty() {
            return Err(ConfigError::MissingGameCode);
        }
        if teams.is_empty() {
            return Err(ConfigError::NoTeams);
        }
        if teams.len() > MAX_TEAMS {
            return Err(ConfigError::TooManyTeams {
                count: teams.len(),
                max: MAX_TEAMS,
            });
        }

        let mut seen = HashSet::new();
        for team in &teams {
            if !seen.insert(team.code.as_str()) {
                return Err(ConfigError::DuplicateTeamCode {
                    code: team.code.clone(),
                });
            }
        }

        teams.sort_by_key(|team| team.order_index);

        Ok(Self { code, config, teams })
    }

    pub fn team(&self, code: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.code == code)
    }
}

impl TryFrom<GameDetail> for GameSetup {
    type Error = ConfigError;

    fn try_from(detail: GameDetail) -> Result<Self, Self::Error> {
        let limit = TurnLimit::from_parts(detail.mode, detail.duration_sec, detail.target_count)?;
        let config = GameConfig::new(limit, detail.pass_limit, detail.rounds_per_team)?;
        GameSetup::new(detail.code, config, detail.teams)
    }
}
