#![allow(dead_code)]

use async_trait::async_trait;
use charades_session::{
    ClientConfig, ClientError, GameConfigSource, GameCreationService, GameRecordSink,
    GameSessionController, WordSource,
};
use charades_types::{
    Category, CreatedGame, GameConfig, GameSetup, NewGameRequest, Team, TurnLimit, TurnRecord, WordId,
    WordPrompt,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_CODE: &str = "XK3P";
pub const TEST_PASSWORD: &str = "secret";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn create_test_team(code: &str, order_index: u32) -> Team {
    Team {
        code: code.to_string(),
        name: format!("Team {}", code),
        color: "RED".to_string(),
        color_hex: "#EF4444".to_string(),
        order_index,
    }
}

pub fn create_test_setup(limit: TurnLimit, team_count: usize, rounds_per_team: u32) -> GameSetup {
    let teams = (0..team_count)
        .map(|i| create_test_team(&charades_types::team_code_for(i).unwrap(), i as u32))
        .collect();
    let config = GameConfig::new(limit, 2, rounds_per_team).unwrap();
    GameSetup::new(TEST_CODE.to_string(), config, teams).unwrap()
}

pub fn create_words(ids: std::ops::Range<u32>) -> Vec<WordPrompt> {
    ids.map(|id| WordPrompt {
        id,
        text: format!("word-{}", id),
        description: Some(format!("hint for {}", id)),
    })
    .collect()
}

/// Serves queued batches in order, then empty batches.
#[derive(Default)]
pub struct FakeWordSource {
    batches: Mutex<VecDeque<Vec<WordPrompt>>>,
    excludes: Mutex<Vec<Vec<WordId>>>,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl FakeWordSource {
    pub fn with_batches(batches: Vec<Vec<WordPrompt>>) -> Arc<Self> {
        Arc::new(Self {
            batches: Mutex::new(batches.into()),
            ..Default::default()
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn excludes(&self) -> Vec<Vec<WordId>> {
        self.excludes.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl WordSource for FakeWordSource {
    async fn fetch_batch(
        &self,
        _game_code: &str,
        exclude: &[WordId],
        _limit: Option<u32>,
    ) -> Result<Vec<WordPrompt>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.excludes.lock().unwrap().push(exclude.to_vec());
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 503,
                message: "Word service unavailable".to_string(),
            });
        }
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }
}

pub struct FakeConfigSource {
    pub setup: GameSetup,
}

#[async_trait]
impl GameConfigSource for FakeConfigSource {
    async fn fetch_game_config(
        &self,
        game_code: &str,
        password: &str,
    ) -> Result<GameSetup, ClientError> {
        if game_code != self.setup.code {
            return Err(ClientError::NotFound {
                game_code: game_code.to_string(),
            });
        }
        if password != TEST_PASSWORD {
            return Err(ClientError::Auth);
        }
        Ok(self.setup.clone())
    }
}

/// Records successful submissions; fails while `fail` is set.
#[derive(Default)]
pub struct FakeRecordSink {
    submissions: Mutex<Vec<Vec<TurnRecord>>>,
    attempts: AtomicUsize,
    fail: AtomicBool,
}

impl FakeRecordSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<Vec<TurnRecord>> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl GameRecordSink for FakeRecordSink {
    async fn submit_finalized_turns(
        &self,
        _game_code: &str,
        turns: &[TurnRecord],
    ) -> Result<(), ClientError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Submission("connection reset".to_string()));
        }
        self.submissions.lock().unwrap().push(turns.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeCreationService {
    requests: Mutex<Vec<NewGameRequest>>,
}

impl FakeCreationService {
    pub fn requests(&self) -> Vec<NewGameRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GameCreationService for FakeCreationService {
    async fn fetch_categories(&self) -> Result<Vec<Category>, ClientError> {
        Ok(vec![
            Category {
                code: "ANIMAL".to_string(),
                name: "Animals".to_string(),
            },
            Category {
                code: "MOVIE".to_string(),
                name: "Movies".to_string(),
            },
        ])
    }

    async fn create_game(&self, request: &NewGameRequest) -> Result<CreatedGame, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(CreatedGame {
            code: TEST_CODE.to_string(),
        })
    }
}

pub struct TestHarness {
    pub controller: GameSessionController,
    pub words: Arc<FakeWordSource>,
    pub records: Arc<FakeRecordSink>,
}

/// Loads a controller through the fake config source with the given word batches
pub async fn load_controller(setup: GameSetup, batches: Vec<Vec<WordPrompt>>) -> TestHarness {
    init_tracing();
    let words = FakeWordSource::with_batches(batches);
    let records = FakeRecordSink::new();
    let controller = GameSessionController::load(
        &FakeConfigSource { setup },
        TEST_CODE,
        TEST_PASSWORD,
        words.clone(),
        records.clone(),
        &ClientConfig::default(),
    )
    .await
    .unwrap();

    TestHarness {
        controller,
        words,
        records,
    }
}

/// Pumps background events until a turn ends
pub async fn pump_until_turn_end(controller: &mut GameSessionController) -> charades_core::TurnEnded {
    loop {
        if let Some(ended) = controller.pump().await.unwrap() {
            return ended;
        }
    }
}
