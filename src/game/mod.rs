//! Game engine - deck generation, session state machine and scoring
//!
//! Everything here is deterministic given an rng and an explicit clock:
//! no wall-clock reads, no global state.

pub mod catalog;
pub mod constants;
pub mod deck;
pub mod schedule;
pub mod scoring;
pub mod session;

pub use catalog::{Category, TermPair};
pub use constants::{grid_config, pairs_for, timer_for, GridConfig};
pub use deck::{cards_match, fisher_yates, generate, Card, CardType};
pub use schedule::{Scheduled, Scheduler};
pub use scoring::{calculate_score, match_points, ScoreBreakdown, ScoreInput};
pub use session::{
    format_time, FlipResult, GameSession, RejectReason, SessionEvent, SessionState,
    SessionStatus, SessionSummary,
};
