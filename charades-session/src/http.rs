use async_trait::async_trait;
use charades_types::{
    ApiErrorBody, Category, CreatedGame, FinalizeGameRequest, GameDetail, GameSetup, NewGameRequest,
    PasswordRequest, TurnRecord, WordBatch, WordId, WordPrompt,
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{
    ClientConfig, ClientError, GameConfigSource, GameCreationService, GameRecordSink, WordSource,
};

/// reqwest-backed client for the charades game API.
#[derive(Debug, Clone)]
pub struct HttpCharadesApi {
    client: Client,
    base_url: String,
}

impl HttpCharadesApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/charades{}", self.base_url, path)
    }

    /// Map non-success statuses to client errors. `game_code` names the
    /// resource for 404s.
    async fn check(response: Response, game_code: &str) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Auth),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                game_code: game_code.to_string(),
            }),
            _ => {
                let body = response.text().await.unwrap_or_default();
                let message = error_message(&body)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());
                warn!("API request failed with {}: {}", status, message);
                Err(ClientError::Server {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// Failure of the finalize call. Every non-success status, auth and
/// missing-game included, is reported as a submission failure.
pub fn submission_error(status: StatusCode, body: &str) -> ClientError {
    let message = error_message(body).unwrap_or_else(|| format!("server returned {}", status));
    ClientError::Submission(message)
}

/// `message` field of an API error body, if the body carries one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .filter(|message| !message.trim().is_empty())
}

/// Query pairs for a word batch request. Each excluded id is sent as its own
/// `exclude` parameter.
pub fn word_batch_query(exclude: &[WordId], limit: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = Vec::with_capacity(exclude.len() + 1);
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    query.extend(exclude.iter().map(|id| ("exclude", id.to_string())));
    query
}

#[async_trait]
impl WordSource for HttpCharadesApi {
    async fn fetch_batch(
        &self,
        game_code: &str,
        exclude: &[WordId],
        limit: Option<u32>,
    ) -> Result<Vec<WordPrompt>, ClientError> {
        debug!(
            "Fetching words for game {} excluding {} ids",
            game_code,
            exclude.len()
        );
        let response = self
            .client
            .get(self.url(&format!("/{}/word-batch", game_code)))
            .query(&word_batch_query(exclude, limit))
            .send()
            .await?;
        let response = Self::check(response, game_code).await?;
        let batch: WordBatch = Self::decode(response).await?;
        debug!("Received {} words for game {}", batch.words.len(), game_code);
        Ok(batch.words)
    }
}

#[async_trait]
impl GameConfigSource for HttpCharadesApi {
    async fn fetch_game_config(
        &self,
        game_code: &str,
        password: &str,
    ) -> Result<GameSetup, ClientError> {
        let response = self
            .client
            .post(self.url(&format!("/{}", game_code)))
            .json(&PasswordRequest {
                password: password.to_string(),
            })
            .send()
            .await?;
        let response = Self::check(response, game_code).await?;
        let detail: GameDetail = Self::decode(response).await?;
        let setup = GameSetup::try_from(detail)?;
        info!(
            "Loaded game {} with {} teams ({})",
            setup.code,
            setup.teams.len(),
            setup.config.mode()
        );
        Ok(setup)
    }
}

#[async_trait]
impl GameRecordSink for HttpCharadesApi {
    async fn submit_finalized_turns(
        &self,
        game_code: &str,
        turns: &[TurnRecord],
    ) -> Result<(), ClientError> {
        let request = FinalizeGameRequest {
            turns: turns.to_vec(),
        };
        let response = self
            .client
            .post(self.url(&format!("/{}/finalize", game_code)))
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Submission(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = submission_error(status, &body);
            warn!("Finalize for game {} failed with {}: {}", game_code, status, err);
            return Err(err);
        }

        info!("Submitted {} turns for game {}", turns.len(), game_code);
        Ok(())
    }
}

#[async_trait]
impl GameCreationService for HttpCharadesApi {
    async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self.client.get(self.url("/categories")).send().await?;
        let response = Self::check(response, "").await?;
        let categories: Vec<Category> = Self::decode(response).await?;
        debug!("Loaded {} categories", categories.len());
        Ok(categories)
    }

    async fn create_game(&self, request: &NewGameRequest) -> Result<CreatedGame, ClientError> {
        let response = self
            .client
            .post(self.url(""))
            .json(request)
            .send()
            .await?;
        let response = Self::check(response, "").await?;
        let created: CreatedGame = Self::decode(response).await?;
        info!("Created game {}", created.code);
        Ok(created)
    }
}
