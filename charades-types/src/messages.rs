use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{ConfigError, GameCode, GameMode, MAX_TEAMS, TurnLimit, team_code_for};

pub const DEFAULT_DURATION_SEC: u32 = 90;
pub const DEFAULT_TARGET_COUNT: u32 = 10;
pub const DEFAULT_PASS_LIMIT: u32 = 2;
pub const DEFAULT_ROUNDS_PER_TEAM: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameOptions {
    pub mode: GameMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,
    pub pass_limit: u32,
    pub rounds_per_team: u32,
    #[serde(default)]
    pub category_codes: Vec<String>,
}

impl GameOptions {
    pub fn new(limit: TurnLimit, pass_limit: u32, rounds_per_team: u32) -> Self {
        Self {
            mode: limit.mode(),
            duration_sec: limit.duration_sec(),
            target_count: limit.target_count(),
            pass_limit,
            rounds_per_team,
            category_codes: Vec::new(),
        }
    }

    pub fn with_categories(mut self, category_codes: Vec<String>) -> Self {
        self.category_codes = category_codes;
        self
    }

    pub fn limit(&self) -> Result<TurnLimit, ConfigError> {
        TurnLimit::from_parts(self.mode, self.duration_sec, self.target_count)
    }
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::new(
            TurnLimit::Limited {
                duration_sec: DEFAULT_DURATION_SEC,
            },
            DEFAULT_PASS_LIMIT,
            DEFAULT_ROUNDS_PER_TEAM,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewGameRequest {
    pub team_names: Vec<String>,
    pub options: GameOptions,
}

impl NewGameRequest {
    /// Validate options and normalize team names. Blank names fall back to
    /// "Team A", "Team B", ... matching the code the team will receive.
    pub fn new(options: GameOptions, team_names: Vec<String>) -> Result<Self, ConfigError> {
        options.limit()?;
        if options.rounds_per_team == 0 {
            return Err(ConfigError::ZeroValue {
                field: "roundsPerTeam".to_string(),
            });
        }
        if team_names.is_empty() {
            return Err(ConfigError::NoTeams);
        }
        if team_names.len() > MAX_TEAMS {
            return Err(ConfigError::TooManyTeams {
                count: team_names.len(),
                max: MAX_TEAMS,
            });
        }

        let team_names = team_names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    // index < MAX_TEAMS was checked above
                    format!("Team {}", team_code_for(index).unwrap_or_default())
                } else {
                    trimmed.to_string()
                }
            })
            .collect();

        Ok(Self { team_names, options })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatedGame {
    pub code: GameCode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub password: String,
}

/// Error body returned by the REST collaborators.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}
