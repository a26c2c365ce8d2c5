use charades_types::{TeamCode, TurnAction, TurnRecord, WordOutcome, WordPrompt};

/// The turn currently being played. Only `GameSession` mutates it; once
/// finalized it becomes an immutable `TurnRecord`.
#[derive(Debug, Clone)]
pub struct LiveTurn {
    team_code: TeamCode,
    round_index: u32,
    outcomes: Vec<WordOutcome>,
    correct_count: u32,
    used_pass: u32,
    started_at: String,
}

impl LiveTurn {
    pub fn start(team_code: TeamCode, round_index: u32) -> Self {
        Self {
            team_code,
            round_index,
            outcomes: Vec::new(),
            correct_count: 0,
            used_pass: 0,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn team_code(&self) -> &str {
        &self.team_code
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn used_pass(&self) -> u32 {
        self.used_pass
    }

    pub fn outcomes(&self) -> &[WordOutcome] {
        &self.outcomes
    }

    pub fn started_at(&self) -> &str {
        &self.started_at
    }

    pub fn can_pass(&self, pass_limit: u32) -> bool {
        self.used_pass < pass_limit
    }

    /// Append an outcome and bump the matching counter.
    pub fn record(&mut self, word: &WordPrompt, action: TurnAction, at_sec: u32) -> &WordOutcome {
        match action {
            TurnAction::Correct => self.correct_count += 1,
            TurnAction::Pass => self.used_pass += 1,
        }

        self.outcomes.push(WordOutcome {
            idx: self.outcomes.len() as u32,
            word_id: word.id,
            word_text: word.text.clone(),
            action,
            at_sec,
        });

        &self.outcomes[self.outcomes.len() - 1]
    }

    pub fn finalize(self, elapsed_sec: u32) -> TurnRecord {
        TurnRecord {
            team_code: self.team_code,
            round_index: self.round_index,
            correct_count: self.correct_count,
            used_pass: self.used_pass,
            elapsed_sec,
            started_at: self.started_at,
            ended_at: chrono::Utc::now().to_rfc3339(),
            words: self.outcomes,
        }
    }
}
