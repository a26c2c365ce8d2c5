use std::sync::Arc;

use charades_core::{ActionOutcome, GameSession, SessionEventHandler, TurnEnded};
use charades_types::{
    CreatedGame, GameCode, GameOptions, GameSetup, GameStatus, NewGameRequest, SessionView,
    StandingsReport, WordPrompt,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::{
    ClientConfig, ClientError, GameConfigSource, GameCreationService, GameRecordSink, Tick, Ticker,
    WordSource,
};

/// Validate the options and team names, then create the game remotely.
pub async fn create_game(
    service: &dyn GameCreationService,
    options: GameOptions,
    team_names: Vec<String>,
) -> Result<CreatedGame, ClientError> {
    let request = NewGameRequest::new(options, team_names)?;
    info!(
        "Creating {} game for {} teams",
        request.options.mode,
        request.team_names.len()
    );
    service.create_game(&request).await
}

/// Work that arrives from background tasks: clock ticks and word batches.
#[derive(Debug)]
pub enum BackgroundEvent {
    Tick(Tick),
    WordBatch(Result<Vec<WordPrompt>, ClientError>),
}

/// Drives a `GameSession` against its remote collaborators.
///
/// User commands are applied synchronously. Ticks and word refills run as
/// tokio tasks and report back through `next_event`, so an expiring clock is
/// never held up by a slow word fetch. Must be used inside a tokio runtime.
pub struct GameSessionController {
    session: GameSession,
    words: Arc<dyn WordSource>,
    records: Arc<dyn GameRecordSink>,
    ticker: Ticker<BackgroundEvent>,
    sender: UnboundedSender<BackgroundEvent>,
    receiver: UnboundedReceiver<BackgroundEvent>,
    batch_limit: Option<u32>,
}

impl GameSessionController {
    pub fn new(
        setup: GameSetup,
        words: Arc<dyn WordSource>,
        records: Arc<dyn GameRecordSink>,
        config: &ClientConfig,
    ) -> Result<Self, ClientError> {
        let session = GameSession::new(setup)?;
        let (sender, receiver) = mpsc::unbounded_channel();
        let ticker = Ticker::new(sender.clone(), BackgroundEvent::Tick);

        Ok(Self {
            session,
            words,
            records,
            ticker,
            sender,
            receiver,
            batch_limit: config.word_batch_limit,
        })
    }

    /// Authenticate against the game, then load the first word batch.
    pub async fn load(
        config_source: &dyn GameConfigSource,
        game_code: &str,
        password: &str,
        words: Arc<dyn WordSource>,
        records: Arc<dyn GameRecordSink>,
        config: &ClientConfig,
    ) -> Result<Self, ClientError> {
        let setup = config_source.fetch_game_config(game_code, password).await?;
        let mut controller = Self::new(setup, words, records, config)?;
        controller.request_more_words().await?;
        Ok(controller)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn game_code(&self) -> &GameCode {
        &self.session.setup().code
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn SessionEventHandler + Send>) {
        self.session.event_bus.add_handler(handler);
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    pub fn standings(&self) -> StandingsReport {
        self.session.standings()
    }

    pub fn start_turn(&mut self) -> Result<(), ClientError> {
        let result = self.session.start_turn();
        self.sync_ticker();
        result?;
        self.refill_in_background();
        Ok(())
    }

    pub fn pause_turn(&mut self) -> Result<(), ClientError> {
        self.session.pause_turn()?;
        self.sync_ticker();
        Ok(())
    }

    pub fn resume_turn(&mut self) -> Result<(), ClientError> {
        self.session.resume_turn()?;
        self.sync_ticker();
        Ok(())
    }

    pub fn record_correct(&mut self) -> ActionOutcome {
        let outcome = self.session.record_correct();
        self.sync_ticker();
        self.refill_in_background();
        outcome
    }

    pub fn record_pass(&mut self) -> Result<ActionOutcome, ClientError> {
        let outcome = self.session.record_pass()?;
        self.sync_ticker();
        self.refill_in_background();
        Ok(outcome)
    }

    pub fn end_turn(&mut self) -> Option<TurnEnded> {
        let ended = self.session.end_turn();
        self.sync_ticker();
        ended
    }

    pub fn advance_to_next_turn(&mut self) -> Result<GameStatus, ClientError> {
        let result = self.session.advance_to_next_turn();
        self.sync_ticker();
        let status = result?;
        self.refill_in_background();
        Ok(status)
    }

    /// Submit every finished turn. A failed submission leaves the history in
    /// place so the save can be retried.
    pub async fn save_results(&mut self) -> Result<(), ClientError> {
        let turns = self.session.turns_to_save()?;
        let game_code = self.session.setup().code.clone();

        if let Err(err) = self.records.submit_finalized_turns(&game_code, &turns).await {
            warn!("Saving {} turns for game {} failed: {}", turns.len(), game_code, err);
            return Err(err);
        }

        self.session.mark_saved();
        Ok(())
    }

    pub fn restart_session(&mut self) {
        self.ticker.stop();
        self.session.restart();
    }

    /// Fetch words now and wait for the batch. Used before play starts; a
    /// no-op when the pool is exhausted or a request is already out.
    pub async fn request_more_words(&mut self) -> Result<Option<TurnEnded>, ClientError> {
        let Some(exclude) = self.session.begin_word_request() else {
            return Ok(None);
        };

        let game_code = self.session.setup().code.clone();
        let result = self
            .words
            .fetch_batch(&game_code, &exclude, self.batch_limit)
            .await;
        self.apply_word_batch(result)
    }

    /// Wait for the next tick or word batch.
    pub async fn next_event(&mut self) -> Option<BackgroundEvent> {
        self.receiver.recv().await
    }

    /// Apply a background event. Returns the turn it ended, if any.
    pub fn handle_event(&mut self, event: BackgroundEvent) -> Result<Option<TurnEnded>, ClientError> {
        match event {
            BackgroundEvent::Tick(tick) => {
                let ended = self.session.tick(tick.epoch);
                self.sync_ticker();
                Ok(ended)
            }
            BackgroundEvent::WordBatch(result) => {
                let ended = self.apply_word_batch(result)?;
                self.refill_in_background();
                Ok(ended)
            }
        }
    }

    /// Wait for and apply the next background event.
    pub async fn pump(&mut self) -> Result<Option<TurnEnded>, ClientError> {
        match self.next_event().await {
            Some(event) => self.handle_event(event),
            None => Ok(None),
        }
    }

    fn apply_word_batch(
        &mut self,
        result: Result<Vec<WordPrompt>, ClientError>,
    ) -> Result<Option<TurnEnded>, ClientError> {
        match result {
            Ok(batch) => {
                let ended = self.session.complete_word_request(batch);
                self.sync_ticker();
                Ok(ended)
            }
            Err(err) => {
                warn!(
                    "Word fetch for game {} failed: {}",
                    self.session.setup().code,
                    err
                );
                self.session.fail_word_request();
                Err(err)
            }
        }
    }

    fn refill_in_background(&mut self) {
        if !self.session.needs_words() {
            return;
        }
        let Some(exclude) = self.session.begin_word_request() else {
            return;
        };

        let words = Arc::clone(&self.words);
        let sender = self.sender.clone();
        let game_code = self.session.setup().code.clone();
        let limit = self.batch_limit;
        debug!(
            "Refilling words for game {} ({} remaining)",
            game_code,
            self.session.words().remaining()
        );

        tokio::spawn(async move {
            let result = words.fetch_batch(&game_code, &exclude, limit).await;
            let _ = sender.send(BackgroundEvent::WordBatch(result));
        });
    }

    /// Keep the ticker in step with the clock: running under the clock's
    /// epoch while it runs, stopped otherwise.
    fn sync_ticker(&mut self) {
        let clock = self.session.clock();
        if clock.is_running() {
            if self.ticker.epoch() != Some(clock.epoch()) {
                self.ticker.start(clock.epoch());
            }
        } else if self.ticker.is_running() {
            self.ticker.stop();
            info!(
                "Session {}: clock stopped at {}s",
                self.session.id(),
                clock.elapsed_sec()
            );
        }
    }
}
