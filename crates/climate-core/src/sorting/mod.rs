//! Waste-sorting mini-game

mod catalog;
mod session;

pub use catalog::{Bin, SortingCatalog, SortingItem};
pub use session::{
    SortFeedback, SortingMsg, SortingPhase, SortingSession, SortingSummary, CORRECT_POINTS,
    FEEDBACK_DURATION, FINISH_DELAY, SESSION_ITEMS, SESSION_TIME_SECS, STREAK_POINTS,
};
