use charades_types::{ConfigError, GameStatus};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} while the game is {status}")]
    InvalidState { action: &'static str, status: GameStatus },
    #[error("pass limit of {limit} reached for this turn")]
    PassLimitExceeded { limit: u32 },
    #[error("results have already been saved")]
    AlreadySaved,
    #[error("no finished turns to save")]
    NothingToSave,
    #[error("no words have been loaded yet")]
    NoWordsLoaded,
    #[error("the game has finished")]
    GameFinished,
    #[error(transparent)]
    Config(#[from] ConfigError),
}
