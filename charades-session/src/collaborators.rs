//! Remote services a game session talks to. The HTTP client in `http`
//! implements all of them; tests substitute in-memory fakes.

use async_trait::async_trait;
use charades_types::{
    Category, CreatedGame, GameSetup, NewGameRequest, TurnRecord, WordId, WordPrompt,
};

use crate::ClientError;

#[async_trait]
pub trait WordSource: Send + Sync {
    /// Fetch words not in `exclude`. An empty result means the pool is exhausted.
    async fn fetch_batch(
        &self,
        game_code: &str,
        exclude: &[WordId],
        limit: Option<u32>,
    ) -> Result<Vec<WordPrompt>, ClientError>;
}

#[async_trait]
pub trait GameConfigSource: Send + Sync {
    async fn fetch_game_config(
        &self,
        game_code: &str,
        password: &str,
    ) -> Result<GameSetup, ClientError>;
}

#[async_trait]
pub trait GameRecordSink: Send + Sync {
    async fn submit_finalized_turns(
        &self,
        game_code: &str,
        turns: &[TurnRecord],
    ) -> Result<(), ClientError>;
}

#[async_trait]
pub trait GameCreationService: Send + Sync {
    /// Categories a new game can be restricted to.
    async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError>;

    async fn create_game(&self, request: &NewGameRequest) -> Result<CreatedGame, ClientError>;
}
