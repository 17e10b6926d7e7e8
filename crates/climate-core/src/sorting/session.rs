//! The waste-sorting state machine
//!
//! One countdown covers the whole session. Each sort shows feedback until an
//! `Advance` arrives; the session ends when the items run out or the clock
//! does, and `Finish` moves it to the results a moment later.

use super::catalog::{Bin, SortingCatalog, SortingItem};
use crate::cmd::Cmd;
use crate::error::{Error, Result};
use crate::rng::GameRng;
use crate::time::{Countdown, CountdownStatus, Generation, Seconds, TICK_INTERVAL};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Items drawn per session
pub const SESSION_ITEMS: usize = 15;
/// Seconds on the session clock
pub const SESSION_TIME_SECS: Seconds = 60;
pub const CORRECT_POINTS: u32 = 50;
pub const STREAK_POINTS: u32 = 10;
/// How long feedback stays up before the next item
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(1500);
/// Pause between the last item and the results screen
pub const FINISH_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortingPhase {
    Menu,
    Playing,
    Results,
}

/// Feedback for the item just sorted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortFeedback {
    pub correct: bool,
    pub chosen: Bin,
    pub correct_bin: Bin,
    pub points: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortingSummary {
    pub correct: usize,
    pub total: usize,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortingMsg {
    Start,
    /// Drop the current item in a bin
    Sort(Bin),
    Tick(Generation),
    /// Clear feedback and move to the next item
    Advance(Generation),
    /// Show the results
    Finish(Generation),
    Restart,
    Quit,
}

#[derive(Debug, Clone)]
pub struct SortingSession {
    catalog: SortingCatalog,
    rng: GameRng,
    phase: SortingPhase,
    items: Vec<SortingItem>,
    current_index: usize,
    correct_count: usize,
    score: u32,
    streak: u32,
    bins: IndexMap<Bin, Vec<String>>,
    countdown: Countdown,
    feedback: Option<SortFeedback>,
    ended: bool,
    generation: Generation,
}

impl SortingSession {
    /// Fails if the catalog cannot fill a session
    pub fn new(catalog: SortingCatalog, rng: GameRng) -> Result<Self> {
        if catalog.len() < SESSION_ITEMS {
            return Err(Error::CatalogTooSmall {
                needed: SESSION_ITEMS,
                available: catalog.len(),
            });
        }

        Ok(Self {
            catalog,
            rng,
            phase: SortingPhase::Menu,
            items: Vec::new(),
            current_index: 0,
            correct_count: 0,
            score: 0,
            streak: 0,
            bins: empty_bins(),
            countdown: Countdown::new(SESSION_TIME_SECS),
            feedback: None,
            ended: false,
            generation: Generation::initial(),
        })
    }

    pub fn builtin(seed: u64) -> Result<Self> {
        Self::new(SortingCatalog::builtin()?, GameRng::new(seed))
    }

    pub fn update(&mut self, msg: SortingMsg) -> Cmd<SortingMsg> {
        match msg {
            SortingMsg::Start => {
                if self.phase != SortingPhase::Menu {
                    return Cmd::none();
                }
                self.begin()
            }
            SortingMsg::Restart => {
                if self.phase == SortingPhase::Menu {
                    return Cmd::none();
                }
                self.begin()
            }
            SortingMsg::Sort(bin) => self.sort(bin),
            SortingMsg::Tick(generation) => {
                if !self.accepts(generation) || self.ended {
                    return Cmd::none();
                }
                match self.countdown.tick() {
                    CountdownStatus::Expired => {
                        tracing::debug!(index = self.current_index, "sorting clock ran out");
                        self.end()
                    }
                    CountdownStatus::Running(_) | CountdownStatus::Stopped => Cmd::none(),
                }
            }
            SortingMsg::Advance(generation) => {
                if !self.accepts(generation) || self.feedback.is_none() {
                    return Cmd::none();
                }
                self.feedback = None;
                if self.ended {
                    return Cmd::none();
                }
                self.current_index += 1;
                if self.current_index >= self.items.len() {
                    self.end()
                } else {
                    Cmd::none()
                }
            }
            SortingMsg::Finish(generation) => {
                if !self.accepts(generation) || !self.ended {
                    return Cmd::none();
                }
                self.phase = SortingPhase::Results;
                tracing::info!(
                    correct = self.correct_count,
                    total = self.items.len(),
                    score = self.score,
                    "sorting finished"
                );
                Cmd::none()
            }
            SortingMsg::Quit => {
                let stop = if self.countdown.is_running() {
                    self.countdown.stop();
                    Cmd::StopTimer {
                        generation: self.generation,
                    }
                } else {
                    Cmd::none()
                };
                self.generation.bump();
                self.phase = SortingPhase::Menu;
                stop
            }
        }
    }

    fn accepts(&self, generation: Generation) -> bool {
        self.phase == SortingPhase::Playing && generation == self.generation
    }

    fn begin(&mut self) -> Cmd<SortingMsg> {
        let stop = if self.countdown.is_running() {
            Cmd::StopTimer {
                generation: self.generation,
            }
        } else {
            Cmd::none()
        };

        self.items = self.rng.sample(self.catalog.items(), SESSION_ITEMS);
        self.phase = SortingPhase::Playing;
        self.current_index = 0;
        self.correct_count = 0;
        self.score = 0;
        self.streak = 0;
        self.bins = empty_bins();
        self.feedback = None;
        self.ended = false;

        let generation = self.generation.bump();
        self.countdown.start();
        tracing::info!(items = self.items.len(), %generation, "sorting started");

        Cmd::batch(vec![
            stop,
            Cmd::StartTimer {
                generation,
                every: TICK_INTERVAL,
            },
        ])
    }

    fn sort(&mut self, bin: Bin) -> Cmd<SortingMsg> {
        if self.phase != SortingPhase::Playing || self.ended || self.feedback.is_some() {
            return Cmd::none();
        }
        let Some(item) = self.items.get(self.current_index) else {
            return Cmd::none();
        };

        let feedback = if item.bin == bin {
            let points = CORRECT_POINTS + self.streak * STREAK_POINTS;
            self.score += points;
            self.streak += 1;
            self.correct_count += 1;
            self.bins.entry(bin).or_default().push(item.emoji.clone());
            SortFeedback {
                correct: true,
                chosen: bin,
                correct_bin: item.bin,
                points,
                message: format!("✅ Correct! +{} points", points),
            }
        } else {
            self.streak = 0;
            SortFeedback {
                correct: false,
                chosen: bin,
                correct_bin: item.bin,
                points: 0,
                message: format!("❌ Wrong! {} goes in {}", item.name, item.bin.label()),
            }
        };

        tracing::debug!(
            item = %item.name,
            chosen = %bin,
            correct = feedback.correct,
            score = self.score,
            "item sorted"
        );
        self.feedback = Some(feedback);
        Cmd::schedule(SortingMsg::Advance(self.generation), FEEDBACK_DURATION)
    }

    fn end(&mut self) -> Cmd<SortingMsg> {
        self.ended = true;
        self.countdown.stop();
        Cmd::batch(vec![
            Cmd::StopTimer {
                generation: self.generation,
            },
            Cmd::schedule(SortingMsg::Finish(self.generation), FINISH_DELAY),
        ])
    }

    /// Current phase
    pub fn phase(&self) -> SortingPhase {
        self.phase
    }

    /// Items drawn for this session, in play order
    pub fn items(&self) -> &[SortingItem] {
        &self.items
    }

    /// Zero-based index of the current item
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Item waiting to be sorted; `None` once the session has ended
    pub fn current_item(&self) -> Option<&SortingItem> {
        if self.phase != SortingPhase::Playing || self.ended {
            return None;
        }
        self.items.get(self.current_index)
    }

    /// Verdict on the last sort while it is shown
    pub fn feedback(&self) -> Option<&SortFeedback> {
        self.feedback.as_ref()
    }

    /// True once the session has ended but the results are not shown yet
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Points so far
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Consecutive correct sorts
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Items sorted into the right bin
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Emoji of the items sorted correctly into `bin`
    pub fn bin_contents(&self, bin: Bin) -> &[String] {
        self.bins.get(&bin).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Seconds left on the session clock
    pub fn time_remaining(&self) -> Seconds {
        self.countdown.remaining()
    }

    /// Fraction of the session clock left, in `[0, 1]`
    pub fn time_fraction(&self) -> f64 {
        self.countdown.fraction_remaining()
    }

    /// Generation stamped on the running session clock
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Progress through the drawn items in percent
    pub fn progress_percent(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let shown = (self.current_index + 1).min(self.items.len());
        shown as f64 / self.items.len() as f64 * 100.0
    }

    /// Totals for the results screen
    pub fn summary(&self) -> SortingSummary {
        SortingSummary {
            correct: self.correct_count,
            total: self.items.len(),
            score: self.score,
        }
    }
}

fn empty_bins() -> IndexMap<Bin, Vec<String>> {
    Bin::ALL.iter().map(|bin| (*bin, Vec::new())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn started() -> SortingSession {
        let mut session = SortingSession::builtin(42).unwrap();
        session.update(SortingMsg::Start);
        session
    }

    fn right_bin(session: &SortingSession) -> Bin {
        session.current_item().unwrap().bin
    }

    fn wrong_bin(session: &SortingSession) -> Bin {
        let right = right_bin(session);
        Bin::ALL.into_iter().find(|b| *b != right).unwrap()
    }

    fn advance(session: &mut SortingSession) -> Cmd<SortingMsg> {
        let generation = session.generation();
        session.update(SortingMsg::Advance(generation))
    }

    #[test]
    fn test_draws_distinct_items() {
        let session = started();
        assert_eq!(session.items().len(), SESSION_ITEMS);

        let names: HashSet<&str> = session.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names.len(), SESSION_ITEMS);
        assert_eq!(session.time_remaining(), SESSION_TIME_SECS);
    }

    #[test]
    fn test_same_seed_same_items() {
        let a = started();
        let b = started();
        assert_eq!(a.items(), b.items());
    }

    #[test]
    fn test_streak_scoring() {
        let mut session = started();

        for expected in [50, 110, 180] {
            let bin = right_bin(&session);
            let emoji = session.current_item().unwrap().emoji.clone();
            session.update(SortingMsg::Sort(bin));
            assert_eq!(session.score(), expected);
            assert_eq!(session.bin_contents(bin).last(), Some(&emoji));
            advance(&mut session);
        }
        assert_eq!(session.correct_count(), 3);
        assert_eq!(session.streak(), 3);

        let bin = wrong_bin(&session);
        session.update(SortingMsg::Sort(bin));
        assert_eq!(session.streak(), 0);
        assert_eq!(session.score(), 180);
    }

    #[test]
    fn test_feedback_messages() {
        let mut session = started();
        session.update(SortingMsg::Sort(right_bin(&session)));
        assert_eq!(session.feedback().unwrap().message, "✅ Correct! +50 points");
        advance(&mut session);

        let item = session.current_item().unwrap().clone();
        let cmd = session.update(SortingMsg::Sort(wrong_bin(&session)));
        let feedback = session.feedback().unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_bin, item.bin);
        assert_eq!(
            feedback.message,
            format!("❌ Wrong! {} goes in {}", item.name, item.bin.label())
        );
        assert_eq!(
            cmd,
            Cmd::Schedule {
                msg: SortingMsg::Advance(session.generation()),
                delay: FEEDBACK_DURATION
            }
        );
    }

    #[test]
    fn test_input_ignored_during_feedback() {
        let mut session = started();
        let bin = right_bin(&session);
        session.update(SortingMsg::Sort(bin));
        assert!(session.update(SortingMsg::Sort(bin)).is_none());
        assert_eq!(session.score(), 50);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_all_items_then_results() {
        let mut session = started();
        let mut last = Cmd::none();
        for _ in 0..SESSION_ITEMS {
            session.update(SortingMsg::Sort(right_bin(&session)));
            last = advance(&mut session);
        }

        assert!(session.is_ended());
        assert_eq!(session.phase(), SortingPhase::Playing);
        let generation = session.generation();
        assert!(last.iter().any(|c| *c
            == Cmd::Schedule {
                msg: SortingMsg::Finish(generation),
                delay: FINISH_DELAY
            }));

        session.update(SortingMsg::Finish(generation));
        assert_eq!(session.phase(), SortingPhase::Results);
        let summary = session.summary();
        assert_eq!(summary.correct, 15);
        assert_eq!(summary.total, 15);
        // 50 * 15 + 10 * (0 + 1 + ... + 14)
        assert_eq!(summary.score, 750 + 1050);
    }

    #[test]
    fn test_clock_ends_session() {
        let mut session = started();
        let generation = session.generation();
        session.update(SortingMsg::Sort(right_bin(&session)));

        for _ in 0..SESSION_TIME_SECS {
            session.update(SortingMsg::Tick(generation));
        }
        assert!(session.is_ended());
        assert!(session.current_item().is_none());

        // feedback clears but the index stays put
        advance(&mut session);
        assert!(session.feedback().is_none());
        assert_eq!(session.current_index(), 0);

        session.update(SortingMsg::Finish(generation));
        assert_eq!(session.summary().correct, 1);
        assert_eq!(session.phase(), SortingPhase::Results);
    }

    #[test]
    fn test_restart_drops_stale_messages() {
        let mut session = started();
        let old = session.generation();
        session.update(SortingMsg::Sort(right_bin(&session)));
        advance(&mut session);
        session.update(SortingMsg::Sort(right_bin(&session)));
        assert_eq!(session.streak(), 2);
        assert_eq!(session.correct_count(), 2);

        session.update(SortingMsg::Restart);
        assert_ne!(session.generation(), old);
        assert_eq!(session.score(), 0);
        assert_eq!(session.streak(), 0);
        assert_eq!(session.correct_count(), 0);
        assert!(session.feedback().is_none());

        session.update(SortingMsg::Advance(old));
        session.update(SortingMsg::Tick(old));
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.time_remaining(), SESSION_TIME_SECS);
        assert!(Bin::ALL.iter().all(|b| session.bin_contents(*b).is_empty()));
    }

    #[test]
    fn test_quit_stops_timer() {
        let mut session = started();
        let generation = session.generation();
        assert_eq!(
            session.update(SortingMsg::Quit),
            Cmd::StopTimer { generation }
        );
        assert_eq!(session.phase(), SortingPhase::Menu);
    }

    #[test]
    fn test_catalog_too_small() {
        let catalog = SortingCatalog::from_ron_str(
            r#"(items: [(emoji: "🍎", name: "Apple Core", bin: Compost)])"#,
        )
        .unwrap();
        let err = SortingSession::new(catalog, GameRng::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::CatalogTooSmall {
                needed: 15,
                available: 1
            }
        ));
    }
}
