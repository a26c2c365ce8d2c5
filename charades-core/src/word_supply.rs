use charades_types::{WordId, WordPrompt};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Refill once this many or fewer unseen words remain.
pub const REFILL_LOOKAHEAD: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefillOutcome {
    Appended(usize),
    Exhausted,
}

/// Growing pool of word prompts with a read cursor.
///
/// The network round-trip lives with the caller: `begin_request` hands out the
/// ids to exclude and marks a request in flight, and the caller reports back
/// with `complete_request` or `fail_request`.
#[derive(Debug, Clone, Default)]
pub struct WordSupplyBuffer {
    words: Vec<WordPrompt>,
    held: HashSet<WordId>,
    cursor: usize,
    exhausted: bool,
    in_flight: bool,
}

impl WordSupplyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refill. Returns every id already held, or `None` when the pool
    /// is exhausted or another request has not come back yet.
    pub fn begin_request(&mut self) -> Option<Vec<WordId>> {
        if self.exhausted || self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(self.words.iter().map(|w| w.id).collect())
    }

    pub fn complete_request(&mut self, batch: Vec<WordPrompt>) -> RefillOutcome {
        self.in_flight = false;

        if batch.is_empty() {
            warn!("Word source returned an empty batch; pool exhausted at {} words", self.words.len());
            self.exhausted = true;
            return RefillOutcome::Exhausted;
        }

        let before = self.words.len();
        for word in batch {
            if self.held.insert(word.id) {
                self.words.push(word);
            } else {
                debug!("Dropping duplicate word id {}", word.id);
            }
        }

        let appended = self.words.len() - before;
        debug!("Appended {} words, pool size {}", appended, self.words.len());
        RefillOutcome::Appended(appended)
    }

    pub fn fail_request(&mut self) {
        self.in_flight = false;
    }

    pub fn current(&self) -> Option<&WordPrompt> {
        self.words.get(self.cursor)
    }

    pub fn advance(&mut self) {
        if self.cursor < self.words.len() {
            self.cursor += 1;
        }
    }

    /// 0-based index of the word on screen.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.words.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn needs_refill(&self) -> bool {
        !self.exhausted && !self.in_flight && self.remaining() <= REFILL_LOOKAHEAD
    }

    /// The source has nothing more and every held word has been consumed.
    pub fn is_depleted(&self) -> bool {
        self.exhausted && self.cursor >= self.words.len()
    }
}
