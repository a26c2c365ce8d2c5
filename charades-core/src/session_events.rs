use charades_types::{GameStatus, SessionId, TeamCode, TurnRecord, WordOutcome};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    TurnStarted {
        session_id: SessionId,
        team_code: TeamCode,
        round_index: u32,
    },
    WordResolved {
        session_id: SessionId,
        outcome: WordOutcome,
    },
    TurnPaused {
        session_id: SessionId,
        elapsed_sec: u32,
    },
    TurnResumed {
        session_id: SessionId,
        elapsed_sec: u32,
    },
    TurnEnded {
        session_id: SessionId,
        record: TurnRecord,
        next_status: GameStatus,
    },
    PhaseChanged {
        session_id: SessionId,
        from: GameStatus,
        to: GameStatus,
    },
    WordsExhausted {
        session_id: SessionId,
    },
    SessionRestarted {
        session_id: SessionId,
    },
    ResultsSaved {
        session_id: SessionId,
        turn_count: usize,
    },
}

impl SessionEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            SessionEvent::TurnStarted { session_id, .. }
            | SessionEvent::WordResolved { session_id, .. }
            | SessionEvent::TurnPaused { session_id, .. }
            | SessionEvent::TurnResumed { session_id, .. }
            | SessionEvent::TurnEnded { session_id, .. }
            | SessionEvent::PhaseChanged { session_id, .. }
            | SessionEvent::WordsExhausted { session_id }
            | SessionEvent::SessionRestarted { session_id }
            | SessionEvent::ResultsSaved { session_id, .. } => *session_id,
        }
    }
}

/// Event handler trait for reacting to session changes
pub trait SessionEventHandler {
    fn handle_event(&mut self, event: SessionEvent);
}

/// Simple event bus for distributing session events
pub struct SessionEventBus {
    handlers: Vec<Box<dyn SessionEventHandler + Send>>,
}

impl SessionEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn SessionEventHandler + Send>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: SessionEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for SessionEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
