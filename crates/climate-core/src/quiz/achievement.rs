//! Achievement badges and their unlock predicates

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score percentage needed for Climate Champion
pub const CHAMPION_PERCENT: f64 = 80.0;
/// Reference points per question when computing the champion percentage
pub const CHAMPION_POINTS_PER_QUESTION: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_correct")]
    FirstCorrect,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_5")]
    Streak5,
    #[serde(rename = "half_way")]
    HalfWay,
    #[serde(rename = "perfect_category")]
    PerfectCategory,
    #[serde(rename = "climate_champion")]
    ClimateChampion,
}

impl AchievementId {
    pub const ALL: [AchievementId; 6] = [
        AchievementId::FirstCorrect,
        AchievementId::Streak3,
        AchievementId::Streak5,
        AchievementId::HalfWay,
        AchievementId::PerfectCategory,
        AchievementId::ClimateChampion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstCorrect => "first_correct",
            AchievementId::Streak3 => "streak_3",
            AchievementId::Streak5 => "streak_5",
            AchievementId::HalfWay => "half_way",
            AchievementId::PerfectCategory => "perfect_category",
            AchievementId::ClimateChampion => "climate_champion",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AchievementId::FirstCorrect => "First Steps",
            AchievementId::Streak3 => "On Fire!",
            AchievementId::Streak5 => "Unstoppable",
            AchievementId::HalfWay => "Halfway Hero",
            AchievementId::PerfectCategory => "Category Master",
            AchievementId::ClimateChampion => "Climate Champion",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstCorrect => "Answer your first question correctly",
            AchievementId::Streak3 => "Get 3 correct answers in a row",
            AchievementId::Streak5 => "Get 5 correct answers in a row",
            AchievementId::HalfWay => "Complete half the quiz",
            AchievementId::PerfectCategory => "Get all questions in a category right",
            AchievementId::ClimateChampion => "Complete the game with 80%+ score",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AchievementId::FirstCorrect => "star",
            AchievementId::Streak3 => "flame",
            AchievementId::Streak5 => "zap",
            AchievementId::HalfWay => "target",
            AchievementId::PerfectCategory => "award",
            AchievementId::ClimateChampion => "trophy",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unlocked achievements in unlock order; only ever grows within a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementSet {
    unlocked: IndexSet<AchievementId>,
}

impl AchievementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock an achievement; returns true only the first time
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        self.unlocked.insert(id)
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = AchievementId> + '_ {
        self.unlocked.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }
}

/// State right after an answer was recorded
#[derive(Debug, Clone, Copy)]
pub struct AnswerSnapshot {
    pub was_correct: bool,
    /// Streak after the answer
    pub streak: u32,
    /// Index of the question just answered
    pub question_index: usize,
    pub total_questions: usize,
    /// Correct answers so far in the answered question's category
    pub category_correct: usize,
    /// Questions in the answered question's category
    pub category_total: usize,
}

/// Achievements whose predicates hold after an answer, in check order
///
/// Already-unlocked ones are filtered by [`AchievementSet::unlock`].
pub fn satisfied_after_answer(snapshot: &AnswerSnapshot) -> Vec<AchievementId> {
    let mut satisfied = Vec::new();

    if snapshot.was_correct {
        satisfied.push(AchievementId::FirstCorrect);
    }
    if snapshot.streak >= 3 {
        satisfied.push(AchievementId::Streak3);
    }
    if snapshot.streak >= 5 {
        satisfied.push(AchievementId::Streak5);
    }
    let halfway = (snapshot.total_questions / 2).saturating_sub(1);
    if snapshot.question_index >= halfway {
        satisfied.push(AchievementId::HalfWay);
    }
    if snapshot.was_correct
        && snapshot.category_total > 0
        && snapshot.category_correct >= snapshot.category_total
    {
        satisfied.push(AchievementId::PerfectCategory);
    }

    satisfied
}

/// Final score as a percentage of the champion reference score
pub fn champion_percent(score: u32, total_questions: usize) -> f64 {
    let reference = total_questions as f64 * CHAMPION_POINTS_PER_QUESTION as f64;
    if reference == 0.0 {
        0.0
    } else {
        score as f64 / reference * 100.0
    }
}

pub fn is_champion(score: u32, total_questions: usize) -> bool {
    champion_percent(score, total_questions) >= CHAMPION_PERCENT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(was_correct: bool, streak: u32, question_index: usize) -> AnswerSnapshot {
        AnswerSnapshot {
            was_correct,
            streak,
            question_index,
            total_questions: 15,
            category_correct: 0,
            category_total: 3,
        }
    }

    #[test]
    fn test_unlock_once() {
        let mut set = AchievementSet::new();
        assert!(set.unlock(AchievementId::Streak3));
        assert!(!set.unlock(AchievementId::Streak3));
        assert_eq!(set.len(), 1);
        assert!(set.contains(AchievementId::Streak3));
    }

    #[test]
    fn test_streak_predicates() {
        assert_eq!(
            satisfied_after_answer(&snapshot(true, 1, 0)),
            vec![AchievementId::FirstCorrect]
        );
        assert_eq!(
            satisfied_after_answer(&snapshot(true, 5, 4)),
            vec![
                AchievementId::FirstCorrect,
                AchievementId::Streak3,
                AchievementId::Streak5
            ]
        );
    }

    #[test]
    fn test_halfway_index() {
        // floor(15 / 2) - 1 = 6
        assert!(satisfied_after_answer(&snapshot(false, 0, 5)).is_empty());
        assert_eq!(
            satisfied_after_answer(&snapshot(false, 0, 6)),
            vec![AchievementId::HalfWay]
        );
    }

    #[test]
    fn test_perfect_category_needs_every_question() {
        let mut s = snapshot(true, 1, 0);
        s.category_correct = 2;
        assert!(!satisfied_after_answer(&s).contains(&AchievementId::PerfectCategory));

        s.category_correct = 3;
        assert!(satisfied_after_answer(&s).contains(&AchievementId::PerfectCategory));
    }

    #[test]
    fn test_champion_threshold() {
        // 15 questions * 150 = 2250 reference points
        assert!(is_champion(1800, 15));
        assert!(!is_champion(1799, 15));
        assert!(!is_champion(0, 0));
    }

    #[test]
    fn test_serialized_ids() {
        assert_eq!(
            ron::to_string(&AchievementId::ClimateChampion).unwrap(),
            "climate_champion"
        );
        assert_eq!(AchievementId::Streak5.to_string(), "streak_5");
    }
}
