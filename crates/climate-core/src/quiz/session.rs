//! The timed quiz state machine

use super::achievement::{self, AchievementId, AchievementSet, AnswerSnapshot};
use super::content::{QuizBank, QuizQuestion};
use super::grade::{self, Grade, QuizSummary};
use crate::cmd::Cmd;
use crate::error::Result;
use crate::identity::{Category, QuestionId};
use crate::time::{Countdown, CountdownStatus, Generation, Seconds, TICK_INTERVAL};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Seconds allowed per question
pub const QUESTION_TIME_SECS: Seconds = 30;
pub const STARTING_LIVES: u32 = 3;
/// Bonus points per second left on the clock
pub const TIME_BONUS_PER_SECOND: u32 = 5;
/// Bonus points per answer already in the streak
pub const STREAK_BONUS: u32 = 25;
/// How long an achievement popup stays up
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizPhase {
    Menu,
    Playing,
    Results,
}

/// How a question was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect { selected: usize },
    TimedOut,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

/// One entry of the answer log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub outcome: Outcome,
    pub points_earned: u32,
    pub time_remaining: Seconds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizMsg {
    /// Leave the menu and begin
    Start,
    /// Select an option of the current question
    Answer(usize),
    /// One second elapsed on the timer started under this generation
    Tick(Generation),
    /// Move past an answered question
    Next,
    /// Hide the popup raised under this notification generation
    DismissNotification(Generation),
    /// Play again from the first question
    Restart,
    /// Back to the menu
    Quit,
}

/// A quiz run over one question bank
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuizBank,
    phase: QuizPhase,
    current_index: usize,
    score: u32,
    streak: u32,
    max_streak: u32,
    lives: u32,
    countdown: Countdown,
    answered: Vec<AnswerRecord>,
    current_outcome: Option<Outcome>,
    achievements: AchievementSet,
    category_correct: IndexMap<Category, usize>,
    generation: Generation,
    notification: Option<AchievementId>,
    notice_generation: Generation,
}

impl QuizSession {
    pub fn new(bank: QuizBank) -> Self {
        Self {
            bank,
            phase: QuizPhase::Menu,
            current_index: 0,
            score: 0,
            streak: 0,
            max_streak: 0,
            lives: STARTING_LIVES,
            countdown: Countdown::new(QUESTION_TIME_SECS),
            answered: Vec::new(),
            current_outcome: None,
            achievements: AchievementSet::new(),
            category_correct: IndexMap::new(),
            generation: Generation::initial(),
            notification: None,
            notice_generation: Generation::initial(),
        }
    }

    /// A session over the built-in question table
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(QuizBank::builtin()?))
    }

    /// Swap in another question bank; refused while a quiz is running
    pub fn use_bank(&mut self, bank: QuizBank) -> bool {
        if self.phase == QuizPhase::Playing {
            return false;
        }
        tracing::info!(questions = bank.len(), "quiz bank replaced");
        self.bank = bank;
        self.phase = QuizPhase::Menu;
        true
    }

    pub fn update(&mut self, msg: QuizMsg) -> Cmd<QuizMsg> {
        match msg {
            QuizMsg::Start => {
                if self.phase != QuizPhase::Menu {
                    return Cmd::none();
                }
                self.begin()
            }
            QuizMsg::Restart => {
                if self.phase == QuizPhase::Menu {
                    return Cmd::none();
                }
                self.begin()
            }
            QuizMsg::Answer(option) => self.answer(option),
            QuizMsg::Tick(generation) => self.tick(generation),
            QuizMsg::Next => self.next(),
            QuizMsg::DismissNotification(generation) => {
                if generation == self.notice_generation {
                    self.notification = None;
                }
                Cmd::none()
            }
            QuizMsg::Quit => {
                let stop = self.stop_timer();
                self.generation.bump();
                self.notice_generation.bump();
                self.notification = None;
                self.phase = QuizPhase::Menu;
                stop
            }
        }
    }

    fn begin(&mut self) -> Cmd<QuizMsg> {
        let stop = self.stop_timer();

        self.phase = QuizPhase::Playing;
        self.current_index = 0;
        self.score = 0;
        self.streak = 0;
        self.max_streak = 0;
        self.lives = STARTING_LIVES;
        self.answered.clear();
        self.current_outcome = None;
        self.achievements = AchievementSet::new();
        self.category_correct.clear();
        self.notification = None;
        self.notice_generation.bump();

        tracing::info!(questions = self.bank.len(), "quiz started");
        Cmd::batch(vec![stop, self.arm_timer()])
    }

    fn arm_timer(&mut self) -> Cmd<QuizMsg> {
        let generation = self.generation.bump();
        self.countdown.start();
        Cmd::StartTimer {
            generation,
            every: TICK_INTERVAL,
        }
    }

    fn stop_timer(&mut self) -> Cmd<QuizMsg> {
        if self.countdown.is_running() {
            self.countdown.stop();
            Cmd::StopTimer {
                generation: self.generation,
            }
        } else {
            Cmd::none()
        }
    }

    fn answer(&mut self, option: usize) -> Cmd<QuizMsg> {
        if self.phase != QuizPhase::Playing || self.current_outcome.is_some() {
            return Cmd::none();
        }
        let Some(question) = self.bank.get(self.current_index) else {
            return Cmd::none();
        };
        if option >= question.options.len() {
            return Cmd::none();
        }

        let outcome = if question.is_correct(option) {
            Outcome::Correct
        } else {
            Outcome::Incorrect { selected: option }
        };
        self.resolve(outcome)
    }

    fn tick(&mut self, generation: Generation) -> Cmd<QuizMsg> {
        if self.phase != QuizPhase::Playing || generation != self.generation {
            return Cmd::none();
        }
        if self.current_outcome.is_some() {
            return Cmd::none();
        }

        match self.countdown.tick() {
            CountdownStatus::Expired => self.resolve(Outcome::TimedOut),
            CountdownStatus::Running(_) | CountdownStatus::Stopped => Cmd::none(),
        }
    }

    fn resolve(&mut self, outcome: Outcome) -> Cmd<QuizMsg> {
        let Some(question) = self.bank.get(self.current_index) else {
            return Cmd::none();
        };
        let question_id = question.id;
        let base_points = question.points;
        let category = question.category.clone();

        let time_remaining = self.countdown.remaining();
        let mut cmds = vec![self.stop_timer()];
        if outcome == Outcome::TimedOut {
            // The countdown stopped itself; the host timer is still running
            cmds.push(Cmd::StopTimer {
                generation: self.generation,
            });
        }

        let points_earned = if outcome.is_correct() {
            let earned =
                base_points + time_remaining * TIME_BONUS_PER_SECOND + self.streak * STREAK_BONUS;
            self.score += earned;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
            *self.category_correct.entry(category.clone()).or_default() += 1;
            earned
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.streak = 0;
            0
        };

        tracing::debug!(
            question = question_id.raw(),
            ?outcome,
            points_earned,
            score = self.score,
            lives = self.lives,
            "question resolved"
        );

        self.answered.push(AnswerRecord {
            question_id,
            outcome,
            points_earned,
            time_remaining,
        });
        self.current_outcome = Some(outcome);

        let snapshot = AnswerSnapshot {
            was_correct: outcome.is_correct(),
            streak: self.streak,
            question_index: self.current_index,
            total_questions: self.bank.len(),
            category_correct: self.category_correct.get(&category).copied().unwrap_or(0),
            category_total: self.bank.category_total(&category),
        };
        for id in achievement::satisfied_after_answer(&snapshot) {
            cmds.push(self.unlock(id));
        }

        Cmd::batch(cmds)
    }

    fn unlock(&mut self, id: AchievementId) -> Cmd<QuizMsg> {
        if !self.achievements.unlock(id) {
            return Cmd::none();
        }
        tracing::info!(achievement = %id, "achievement unlocked");

        self.notification = Some(id);
        let notice = self.notice_generation.bump();
        Cmd::batch(vec![
            Cmd::notify(id.name(), id.description(), id.icon()),
            Cmd::schedule(QuizMsg::DismissNotification(notice), NOTIFICATION_DURATION),
        ])
    }

    fn next(&mut self) -> Cmd<QuizMsg> {
        if self.phase != QuizPhase::Playing || self.current_outcome.is_none() {
            return Cmd::none();
        }

        if self.lives == 0 || self.current_index + 1 >= self.bank.len() {
            return self.finish();
        }

        self.current_index += 1;
        self.current_outcome = None;
        self.arm_timer()
    }

    fn finish(&mut self) -> Cmd<QuizMsg> {
        self.phase = QuizPhase::Results;
        let cmd = if achievement::is_champion(self.score, self.bank.len()) {
            self.unlock(AchievementId::ClimateChampion)
        } else {
            Cmd::none()
        };

        let summary = self.summary();
        tracing::info!(
            score = summary.score,
            correct = summary.correct,
            total = summary.total,
            grade = %summary.grade,
            "quiz finished"
        );
        cmd
    }

    /// Current phase
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Questions being played
    pub fn bank(&self) -> &QuizBank {
        &self.bank
    }

    /// Zero-based index of the current question
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Question on screen; `None` outside Playing
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            QuizPhase::Playing => self.bank.get(self.current_index),
            _ => None,
        }
    }

    /// Outcome of the current question once it is resolved
    pub fn current_outcome(&self) -> Option<Outcome> {
        self.current_outcome
    }

    /// Points so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Consecutive correct answers
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Longest streak this session
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    /// Lives left
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Seconds left on the question timer
    pub fn time_remaining(&self) -> Seconds {
        self.countdown.remaining()
    }

    /// Fraction of the question timer left, in `[0, 1]`
    pub fn time_fraction(&self) -> f64 {
        self.countdown.fraction_remaining()
    }

    /// Generation stamped on the running question timer
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Answer log, one entry per resolved question
    pub fn answered(&self) -> &[AnswerRecord] {
        &self.answered
    }

    /// Achievements unlocked this session
    pub fn achievements(&self) -> &AchievementSet {
        &self.achievements
    }

    /// Achievement popup currently on screen
    pub fn notification(&self) -> Option<AchievementId> {
        self.notification
    }

    /// Questions answered correctly
    pub fn correct_count(&self) -> usize {
        self.answered
            .iter()
            .filter(|record| record.outcome.is_correct())
            .count()
    }

    /// Progress through the bank in percent
    pub fn progress_percent(&self) -> f64 {
        if self.bank.is_empty() {
            return 0.0;
        }
        (self.current_index + 1) as f64 / self.bank.len() as f64 * 100.0
    }

    /// Totals, percentage and grade for the results screen
    pub fn summary(&self) -> QuizSummary {
        let correct = self.correct_count();
        let total = self.bank.len();
        let percentage = grade::percentage(correct, total);
        QuizSummary {
            score: self.score,
            correct,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
            max_streak: self.max_streak,
            lives_left: self.lives,
            achievements: self
                .achievements
                .iter()
                .map(|id| id.name().to_string())
                .collect(),
        }
    }
}
