//! Timed multiple-choice quiz with lives, streaks and achievements

mod achievement;
mod content;
mod grade;
mod session;

pub use achievement::{
    champion_percent, is_champion, satisfied_after_answer, AchievementId, AchievementSet,
    AnswerSnapshot, CHAMPION_PERCENT, CHAMPION_POINTS_PER_QUESTION,
};
pub use content::{QuizBank, QuizQuestion, OPTIONS_PER_QUESTION};
pub use grade::{percentage, Grade, QuizSummary};
pub use session::{
    AnswerRecord, Outcome, QuizMsg, QuizPhase, QuizSession, NOTIFICATION_DURATION,
    QUESTION_TIME_SECS, STARTING_LIVES, STREAK_BONUS, TIME_BONUS_PER_SECOND,
};
