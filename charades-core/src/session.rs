use charades_types::{
    GameSetup, GameStatus, SessionId, SessionView, StandingsReport, Team, TurnAction, TurnLimit,
    TurnRecord, WordId, WordOutcome, WordPrompt,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    LiveTurn, RefillOutcome, ResultAggregator, RoundScheduler, SessionError, SessionEvent,
    SessionEventBus, TickOutcome, TurnClock, TurnPosition, WordSupplyBuffer, turn_clock,
};

/// A turn that has just been finalized and where the game goes next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEnded {
    pub record: TurnRecord,
    pub next_status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// No active turn or no word on screen; nothing changed
    Ignored,
    Recorded {
        outcome: WordOutcome,
        turn_ended: Option<TurnEnded>,
    },
}

/// One local play of a charades game.
///
/// Owns the live turn, the finalized turn list, the turn clock and the word
/// pool. All mutation goes through the command methods; each runs to
/// completion, so clock ticks and word actions never interleave.
#[derive(Debug)]
pub struct GameSession {
    id: SessionId,
    setup: GameSetup,
    status: GameStatus,
    words: WordSupplyBuffer,
    clock: TurnClock,
    live: Option<LiveTurn>,
    turns: Vec<TurnRecord>,
    saved: bool,
    // Word left on screen by the last turn, skipped when the next one starts
    skip_dealt_word: bool,
    pub event_bus: SessionEventBus,
}

impl GameSession {
    pub fn new(setup: GameSetup) -> Result<Self, SessionError> {
        if setup.teams.is_empty() {
            return Err(charades_types::ConfigError::NoTeams.into());
        }

        let id = Uuid::new_v4();
        info!(
            "Session {} ready for game {} with {} teams",
            id,
            setup.code,
            setup.teams.len()
        );

        Ok(Self {
            id,
            setup,
            status: GameStatus::Ready,
            words: WordSupplyBuffer::new(),
            clock: TurnClock::new(),
            live: None,
            turns: Vec::new(),
            saved: false,
            skip_dealt_word: false,
            event_bus: SessionEventBus::new(),
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn setup(&self) -> &GameSetup {
        &self.setup
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    pub fn live_turn(&self) -> Option<&LiveTurn> {
        self.live.as_ref()
    }

    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    pub fn words(&self) -> &WordSupplyBuffer {
        &self.words
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    fn limit(&self) -> &TurnLimit {
        &self.setup.config.limit
    }

    /// Position of the next turn to play, derived from the recorded turns.
    pub fn position(&self) -> TurnPosition {
        RoundScheduler::position(
            self.turns.len(),
            self.setup.teams.len(),
            self.setup.config.rounds_per_team,
        )
        // new() rejects empty team lists
        .unwrap_or(TurnPosition {
            team_index: 0,
            round_index: 0,
            is_last_turn: true,
        })
    }

    /// Team whose turn is next (or in progress).
    pub fn active_team(&self) -> &Team {
        &self.setup.teams[self.position().team_index]
    }

    pub fn can_pass(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|turn| turn.can_pass(self.setup.config.pass_limit))
    }

    pub fn start_turn(&mut self) -> Result<(), SessionError> {
        if self.live.is_some() {
            return Err(SessionError::InvalidState {
                action: "start a turn",
                status: self.status,
            });
        }
        if self.status == GameStatus::Finished {
            return Err(SessionError::GameFinished);
        }
        if std::mem::take(&mut self.skip_dealt_word) {
            self.words.advance();
        }
        if self.words.is_depleted() {
            self.finish_without_turn();
            return Err(SessionError::GameFinished);
        }
        if self.words.current().is_none() {
            return Err(SessionError::NoWordsLoaded);
        }

        let position = self.position();
        let team_code = self.setup.teams[position.team_index].code.clone();

        self.live = Some(LiveTurn::start(team_code.clone(), position.round_index));
        self.clock.reset();
        self.clock.arm();
        self.set_status(GameStatus::Playing);

        info!(
            "Session {}: team {} started round {}",
            self.id,
            team_code,
            position.round_index + 1
        );
        self.event_bus.publish(SessionEvent::TurnStarted {
            session_id: self.id,
            team_code,
            round_index: position.round_index,
        });
        Ok(())
    }

    pub fn pause_turn(&mut self) -> Result<(), SessionError> {
        if self.live.is_none() || !self.clock.pause() {
            return Err(SessionError::InvalidState {
                action: "pause",
                status: self.status,
            });
        }
        self.set_status(GameStatus::Paused);
        self.event_bus.publish(SessionEvent::TurnPaused {
            session_id: self.id,
            elapsed_sec: self.clock.elapsed_sec(),
        });
        Ok(())
    }

    pub fn resume_turn(&mut self) -> Result<(), SessionError> {
        if self.live.is_none() || !self.clock.resume() {
            return Err(SessionError::InvalidState {
                action: "resume",
                status: self.status,
            });
        }
        self.set_status(GameStatus::Playing);
        self.event_bus.publish(SessionEvent::TurnResumed {
            session_id: self.id,
            elapsed_sec: self.clock.elapsed_sec(),
        });
        Ok(())
    }

    pub fn record_correct(&mut self) -> ActionOutcome {
        let Some(outcome) = self.record(TurnAction::Correct) else {
            return ActionOutcome::Ignored;
        };

        let target_reached = match (self.limit(), self.live.as_ref()) {
            (TurnLimit::UntilClear { target_count }, Some(turn)) => {
                turn.correct_count() >= *target_count
            }
            _ => false,
        };

        if target_reached {
            // The qualifying word stays on screen; the next turn skips it
            info!("Session {}: target reached", self.id);
            let turn_ended = self.finish_turn(false);
            return ActionOutcome::Recorded { outcome, turn_ended };
        }

        let turn_ended = self.advance_word();
        ActionOutcome::Recorded { outcome, turn_ended }
    }

    pub fn record_pass(&mut self) -> Result<ActionOutcome, SessionError> {
        if self.live.is_some() && self.words.current().is_some() && !self.can_pass() {
            let limit = self.setup.config.pass_limit;
            warn!("Session {}: pass rejected, limit {} reached", self.id, limit);
            return Err(SessionError::PassLimitExceeded { limit });
        }

        let Some(outcome) = self.record(TurnAction::Pass) else {
            return Ok(ActionOutcome::Ignored);
        };

        let turn_ended = self.advance_word();
        Ok(ActionOutcome::Recorded { outcome, turn_ended })
    }

    /// Manual end of turn. `None` when no turn is active.
    pub fn end_turn(&mut self) -> Option<TurnEnded> {
        self.finish_turn(false)
    }

    /// Apply one clock tick scheduled under `epoch`. A timed turn that reaches
    /// its duration ends exactly like a manual end.
    pub fn tick(&mut self, epoch: u64) -> Option<TurnEnded> {
        if self.live.is_none() {
            return None;
        }
        let limit = self.setup.config.limit;
        match self.clock.tick(epoch, &limit) {
            TickOutcome::Expired(elapsed) => {
                info!("Session {}: time up at {}s", self.id, elapsed);
                self.finish_turn(false)
            }
            TickOutcome::Advanced(_) | TickOutcome::Ignored => None,
        }
    }

    /// Leave the intermission and start the next team's turn. Returns the
    /// resulting status, `Finished` when the word pool ran dry.
    pub fn advance_to_next_turn(&mut self) -> Result<GameStatus, SessionError> {
        if self.status != GameStatus::Intermission {
            return Err(SessionError::InvalidState {
                action: "advance to the next turn",
                status: self.status,
            });
        }

        match self.start_turn() {
            Ok(()) | Err(SessionError::GameFinished) => Ok(self.status),
            Err(err) => Err(err),
        }
    }

    /// Ids to exclude for a word refill, or `None` when no request should be sent.
    pub fn begin_word_request(&mut self) -> Option<Vec<WordId>> {
        self.words.begin_request()
    }

    /// Merge a fetched batch. An empty batch exhausts the pool; if every word
    /// has also been consumed the game ends here.
    pub fn complete_word_request(&mut self, batch: Vec<WordPrompt>) -> Option<TurnEnded> {
        match self.words.complete_request(batch) {
            RefillOutcome::Appended(_) => None,
            RefillOutcome::Exhausted => {
                self.event_bus.publish(SessionEvent::WordsExhausted {
                    session_id: self.id,
                });
                if !self.words.is_depleted() {
                    return None;
                }
                if self.live.is_some() {
                    self.finish_turn(true)
                } else {
                    self.finish_without_turn();
                    None
                }
            }
        }
    }

    pub fn fail_word_request(&mut self) {
        self.words.fail_request();
    }

    pub fn needs_words(&self) -> bool {
        self.words.needs_refill()
    }

    /// Turns to submit. Only a finished, unsaved game with at least one turn
    /// can be saved.
    pub fn turns_to_save(&self) -> Result<Vec<TurnRecord>, SessionError> {
        if self.status != GameStatus::Finished {
            return Err(SessionError::InvalidState {
                action: "save results",
                status: self.status,
            });
        }
        if self.saved {
            return Err(SessionError::AlreadySaved);
        }
        if self.turns.is_empty() {
            return Err(SessionError::NothingToSave);
        }
        Ok(self.turns.clone())
    }

    pub fn mark_saved(&mut self) {
        self.saved = true;
        info!("Session {}: {} turns saved", self.id, self.turns.len());
        self.event_bus.publish(SessionEvent::ResultsSaved {
            session_id: self.id,
            turn_count: self.turns.len(),
        });
    }

    /// Drop all local turn history. The word pool and cursor are kept, so the
    /// next turn starts past every word already dealt. Saved results on the
    /// server are untouched.
    pub fn restart(&mut self) {
        self.live = None;
        self.turns.clear();
        self.clock.reset();
        self.saved = false;
        self.set_status(GameStatus::Ready);

        info!("Session {} restarted", self.id);
        self.event_bus.publish(SessionEvent::SessionRestarted {
            session_id: self.id,
        });
    }

    pub fn standings(&self) -> StandingsReport {
        ResultAggregator::compute_standings(&self.setup.teams, &self.turns)
    }

    pub fn view(&self) -> SessionView {
        let config = &self.setup.config;

        // Between turns the screen still describes the turn that just ended
        let (team_code, round_index, correct_count, used_pass) = match (&self.live, self.status) {
            (Some(turn), _) => (
                turn.team_code().to_string(),
                turn.round_index(),
                turn.correct_count(),
                turn.used_pass(),
            ),
            (None, GameStatus::Intermission | GameStatus::Finished) if !self.turns.is_empty() => {
                let last = &self.turns[self.turns.len() - 1];
                (last.team_code.clone(), last.round_index, last.correct_count, last.used_pass)
            }
            _ => {
                let position = self.position();
                (
                    self.setup.teams[position.team_index].code.clone(),
                    position.round_index,
                    0,
                    0,
                )
            }
        };

        let team = self.setup.team(&team_code);

        SessionView {
            session_id: self.id,
            game_code: self.setup.code.clone(),
            status: self.status,
            mode: config.mode(),
            team_name: team.map(|t| t.name.clone()).unwrap_or_default(),
            team_color_hex: team.map(|t| t.color_hex.clone()).unwrap_or_default(),
            round_number: round_index + 1,
            correct_count,
            used_pass,
            pass_limit: config.pass_limit,
            target_count: config.limit.target_count(),
            clock: turn_clock::readout(self.clock.elapsed_sec(), &config.limit),
            current_word: match self.status {
                GameStatus::Playing => self.words.current().map(|w| w.text.clone()),
                _ => None,
            },
            word_number: self.words.position() as u32 + 1,
            can_pass: self.can_pass(),
            turns_completed: self.turns.len() as u32,
            is_saved: self.saved,
        }
    }

    fn record(&mut self, action: TurnAction) -> Option<WordOutcome> {
        let word = self.words.current()?.clone();
        let at_sec = self.clock.elapsed_sec();
        let turn = self.live.as_mut()?;
        let outcome = turn.record(&word, action, at_sec).clone();

        debug!(
            "Session {}: {} '{}' at {}s",
            self.id, action, outcome.word_text, at_sec
        );
        self.event_bus.publish(SessionEvent::WordResolved {
            session_id: self.id,
            outcome: outcome.clone(),
        });
        Some(outcome)
    }

    fn advance_word(&mut self) -> Option<TurnEnded> {
        self.words.advance();
        if self.words.is_depleted() {
            warn!("Session {}: word pool depleted, ending game", self.id);
            return self.finish_turn(true);
        }
        None
    }

    /// Finalize the live turn. `force_finish` routes straight to `Finished`
    /// instead of asking the scheduler.
    fn finish_turn(&mut self, force_finish: bool) -> Option<TurnEnded> {
        let live = self.live.take()?;
        self.clock.stop();
        self.skip_dealt_word = true;

        // Scheduler position of the turn being closed, before it is recorded
        let is_last_turn = self.position().is_last_turn;
        let record = live.finalize(self.clock.elapsed_sec());
        self.turns.push(record.clone());

        let next_status = if force_finish || is_last_turn {
            GameStatus::Finished
        } else {
            GameStatus::Intermission
        };
        self.set_status(next_status);

        info!(
            "Session {}: team {} ended round {} with {} correct, {} passes in {}s; next {}",
            self.id,
            record.team_code,
            record.round_index + 1,
            record.correct_count,
            record.used_pass,
            record.elapsed_sec,
            next_status
        );
        self.event_bus.publish(SessionEvent::TurnEnded {
            session_id: self.id,
            record: record.clone(),
            next_status,
        });

        Some(TurnEnded {
            record,
            next_status,
        })
    }

    fn finish_without_turn(&mut self) {
        self.clock.stop();
        self.set_status(GameStatus::Finished);
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status == status {
            return;
        }
        let from = self.status;
        self.status = status;
        self.event_bus.publish(SessionEvent::PhaseChanged {
            session_id: self.id,
            from,
            to: status,
        });
    }
}
