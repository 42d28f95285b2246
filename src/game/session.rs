//! Game session state machine
//!
//! `Idle -> Playing -> {Won | Lost}`, with `Playing <-> Paused`.
//! Won and Lost are terminal: once reached, every pending timer is cancelled
//! and no further flips are accepted.
//!
//! Counters are committed the moment the second card of a pair is flipped.
//! The reveal delay that follows only decides when the two cards lock (match)
//! or turn back over (mismatch), and when a completed board becomes a win.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{CardId, Difficulty};
use crate::game::constants::{
    pairs_for, timer_for, COUNTDOWN_PERIOD_MS, MATCH_REVEAL_MS, MISMATCH_REVEAL_MS,
};
use crate::game::deck::{self, cards_match, Card};
use crate::game::schedule::Scheduler;
use crate::game::scoring::{calculate_score, match_points};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Idle,
    Playing,
    Paused,
    Won,
    Lost,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Won | SessionStatus::Lost)
    }
}

/// Deferred work owned by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    CountdownTick,
    ResolvePair {
        first: CardId,
        second: CardId,
        matched: bool,
    },
}

/// Why a flip was ignored. A rejected flip never changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotPlaying,
    PairPending,
    AlreadyFlipped,
    AlreadyMatched,
    UnknownCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipResult {
    Rejected(RejectReason),
    /// First card of a pair is face up
    Revealed,
    /// Second card completes a pair; both lock after the match delay
    Matched { streak: u32 },
    /// Second card differs; both turn back after the mismatch delay
    Mismatched,
}

/// Mutable state of one game
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub cards: Vec<Card>,
    /// Face-up cards not yet resolved, in flip order (at most two)
    pub flipped_cards: Vec<CardId>,
    pub matched_pairs: u32,
    pub moves: u32,
    pub mistakes: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub score: u64,
    pub time_remaining: u32,
    pub status: SessionStatus,
    pub difficulty: Difficulty,
}

impl SessionState {
    fn new(difficulty: Difficulty, cards: Vec<Card>) -> Self {
        Self {
            cards,
            flipped_cards: Vec::with_capacity(2),
            matched_pairs: 0,
            moves: 0,
            mistakes: 0,
            current_streak: 0,
            best_streak: 0,
            score: 0,
            time_remaining: timer_for(difficulty),
            status: SessionStatus::Idle,
            difficulty,
        }
    }

    pub fn total_pairs(&self) -> u32 {
        pairs_for(self.difficulty)
    }
}

/// Immutable record of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub score: u64,
    pub won: bool,
    pub is_perfect: bool,
    pub difficulty: Difficulty,
    /// Whole seconds of play time
    pub time_taken: u32,
    pub moves: u32,
    pub mistakes: u32,
    pub matched_pairs: u32,
}

/// A session plus the timers that drive it
#[derive(Debug, Clone)]
pub struct GameSession {
    state: SessionState,
    index: AHashMap<CardId, usize>,
    scheduler: Scheduler<SessionEvent>,
}

impl GameSession {
    /// Wrap a dealt deck in an idle session
    ///
    /// # Panics
    /// If the deck size does not match the difficulty.
    pub fn new(difficulty: Difficulty, cards: Vec<Card>) -> Self {
        assert_eq!(
            cards.len(),
            2 * pairs_for(difficulty) as usize,
            "deck size does not match {}",
            difficulty
        );
        let index = cards
            .iter()
            .enumerate()
            .map(|(i, card)| (card.unique_id, i))
            .collect();
        Self {
            state: SessionState::new(difficulty, cards),
            index,
            scheduler: Scheduler::new(),
        }
    }

    /// Deal a fresh deck and wrap it in an idle session
    pub fn deal<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self::new(difficulty, deck::generate(difficulty, rng))
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).map(|&i| &self.state.cards[i])
    }

    /// Play time so far, frozen while paused or after the end
    pub fn elapsed_ms(&self) -> u64 {
        self.scheduler.now()
    }

    /// True while two flipped cards wait for their reveal delay
    pub fn has_pending_pair(&self) -> bool {
        self.state.flipped_cards.len() == 2
    }

    /// Virtual time until the next scheduled event, if any
    pub fn next_event_in_ms(&self) -> Option<u64> {
        self.scheduler
            .pending()
            .next()
            .map(|s| s.due_ms.saturating_sub(self.scheduler.now()))
    }

    pub fn start(&mut self) -> bool {
        if self.state.status != SessionStatus::Idle {
            return false;
        }
        self.state.status = SessionStatus::Playing;
        self.scheduler.schedule(COUNTDOWN_PERIOD_MS, SessionEvent::CountdownTick);
        tracing::debug!(
            "Session started: {} with {} pairs, {}s on the clock",
            self.state.difficulty,
            self.state.total_pairs(),
            self.state.time_remaining
        );
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state.status != SessionStatus::Playing {
            return false;
        }
        self.state.status = SessionStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state.status != SessionStatus::Paused {
            return false;
        }
        self.state.status = SessionStatus::Playing;
        true
    }

    /// Replace this game with a newly dealt idle one
    ///
    /// Timers from the previous deal are cancelled with it.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::deal(self.state.difficulty, rng);
    }

    pub fn flip(&mut self, card_id: CardId) -> FlipResult {
        if let Err(reason) = self.check_flip(card_id) {
            return FlipResult::Rejected(reason);
        }

        let index = self.index[&card_id];
        self.state.cards[index].is_flipped = true;
        self.state.flipped_cards.push(card_id);

        if self.state.flipped_cards.len() < 2 {
            return FlipResult::Revealed;
        }

        let first = self.state.flipped_cards[0];
        let matched = cards_match(&self.state.cards[self.index[&first]], &self.state.cards[index]);

        let state = &mut self.state;
        state.moves += 1;
        let result = if matched {
            state.matched_pairs += 1;
            state.current_streak += 1;
            state.best_streak = state.best_streak.max(state.current_streak);
            state.score += match_points(state.difficulty);
            FlipResult::Matched { streak: state.current_streak }
        } else {
            state.mistakes += 1;
            state.current_streak = 0;
            FlipResult::Mismatched
        };

        let delay = if matched { MATCH_REVEAL_MS } else { MISMATCH_REVEAL_MS };
        self.scheduler.schedule(
            delay,
            SessionEvent::ResolvePair {
                first,
                second: card_id,
                matched,
            },
        );
        result
    }

    fn check_flip(&self, card_id: CardId) -> Result<(), RejectReason> {
        if self.state.status != SessionStatus::Playing {
            return Err(RejectReason::NotPlaying);
        }
        if self.has_pending_pair() {
            return Err(RejectReason::PairPending);
        }
        if self.state.flipped_cards.contains(&card_id) {
            return Err(RejectReason::AlreadyFlipped);
        }
        match self.card(card_id) {
            None => Err(RejectReason::UnknownCard),
            Some(card) if card.is_matched => Err(RejectReason::AlreadyMatched),
            Some(_) => Ok(()),
        }
    }

    /// Advance session time, firing every event that falls due
    ///
    /// Does nothing unless the session is playing.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.state.status != SessionStatus::Playing {
            return;
        }

        let target = self.scheduler.now().saturating_add(elapsed_ms);
        while let Some(next) = self.scheduler.pop_due(target) {
            self.handle_event(next.event);
            if self.state.status != SessionStatus::Playing {
                return;
            }
        }
        self.scheduler.advance_to(target);
    }

    fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::CountdownTick => self.countdown_tick(),
            SessionEvent::ResolvePair {
                first,
                second,
                matched,
            } => self.resolve_pair(first, second, matched),
        }
    }

    fn countdown_tick(&mut self) {
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining == 0 {
            // Loss keeps the incrementally accumulated score
            self.finish(SessionStatus::Lost);
        } else {
            self.scheduler.schedule(COUNTDOWN_PERIOD_MS, SessionEvent::CountdownTick);
        }
    }

    fn resolve_pair(&mut self, first: CardId, second: CardId, matched: bool) {
        for id in [first, second] {
            let card = &mut self.state.cards[self.index[&id]];
            if matched {
                card.is_matched = true;
                card.is_flipped = true;
            } else {
                card.is_flipped = false;
            }
        }
        self.state.flipped_cards.clear();

        if self.state.matched_pairs == self.state.total_pairs() {
            let state = &self.state;
            let final_score = calculate_score(
                state.matched_pairs,
                state.difficulty,
                state.time_remaining,
                state.best_streak,
                state.mistakes,
                state.mistakes == 0,
            );
            self.state.score = final_score;
            self.finish(SessionStatus::Won);
        }
    }

    fn finish(&mut self, status: SessionStatus) {
        self.state.status = status;
        self.scheduler.cancel_all();
        tracing::debug!(
            "Session {:?}: score {}, {} moves, {} mistakes",
            status,
            self.state.score,
            self.state.moves,
            self.state.mistakes
        );
    }

    /// Snapshot of a finished session; `None` until Won or Lost
    pub fn summary(&self) -> Option<SessionSummary> {
        if !self.state.status.is_terminal() {
            return None;
        }
        let won = self.state.status == SessionStatus::Won;
        Some(SessionSummary {
            score: self.state.score,
            won,
            is_perfect: won && self.state.mistakes == 0,
            difficulty: self.state.difficulty,
            time_taken: (self.elapsed_ms() / 1000) as u32,
            moves: self.state.moves,
            mistakes: self.state.mistakes,
            matched_pairs: self.state.matched_pairs,
        })
    }
}

/// Format seconds as `M:SS`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
