#![allow(dead_code)]

use charades_core::{GameSession, SessionEvent, SessionEventHandler, TurnEnded};
use charades_types::{GameConfig, GameSetup, Team, TurnLimit, WordPrompt};
use std::sync::{Arc, Mutex};

/// Creates a team with a code-derived name
pub fn create_test_team(code: &str, order_index: u32) -> Team {
    Team {
        code: code.to_string(),
        name: format!("Team {}", code),
        color: "BLUE".to_string(),
        color_hex: "#3B82F6".to_string(),
        order_index,
    }
}

/// Creates a setup with teams A, B, C... in rotation order
pub fn create_test_setup(limit: TurnLimit, team_count: usize, rounds_per_team: u32, pass_limit: u32) -> GameSetup {
    let teams = (0..team_count)
        .map(|i| create_test_team(&charades_types::team_code_for(i).unwrap(), i as u32))
        .collect();
    let config = GameConfig::new(limit, pass_limit, rounds_per_team).unwrap();
    GameSetup::new("TEST".to_string(), config, teams).unwrap()
}

pub fn create_words(ids: std::ops::Range<u32>) -> Vec<WordPrompt> {
    ids.map(|id| WordPrompt {
        id,
        text: format!("word-{}", id),
        description: None,
    })
    .collect()
}

/// Creates a session with `word_count` words already loaded
pub fn create_session_with_words(setup: GameSetup, word_count: u32) -> GameSession {
    let mut session = GameSession::new(setup).unwrap();
    session.begin_word_request().unwrap();
    session.complete_word_request(create_words(0..word_count));
    session
}

/// Standard timed game: 2 teams, 1 round, 60 seconds, 2 passes
pub fn create_limited_session() -> GameSession {
    create_session_with_words(
        create_test_setup(TurnLimit::Limited { duration_sec: 60 }, 2, 1, 2),
        200,
    )
}

/// Ticks the running clock `count` times, returning the turn end if one occurred
pub fn tick_times(session: &mut GameSession, count: u32) -> Option<TurnEnded> {
    for _ in 0..count {
        let epoch = session.clock().epoch();
        if let Some(ended) = session.tick(epoch) {
            return Some(ended);
        }
    }
    None
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn count_matching(&self, check_fn: impl Fn(&SessionEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| check_fn(e)).count()
    }

    pub fn has_event_type(&self, check_fn: impl Fn(&SessionEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl SessionEventHandler for EventCollector {
    fn handle_event(&mut self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}
