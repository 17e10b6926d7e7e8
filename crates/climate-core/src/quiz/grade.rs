//! Letter grades and the end-of-quiz summary

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Grade for a whole-number percentage
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Grade::S,
            80..=89 => Grade::A,
            70..=79 => Grade::B,
            60..=69 => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Grade::S => "Climate Champion! Outstanding!",
            Grade::A => "Excellent! You really know your stuff!",
            Grade::B => "Great job! Keep learning!",
            Grade::C => "Good effort! Room to improve!",
            Grade::D => "Keep trying! Every bit of knowledge helps!",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// `round(correct / total * 100)`, halves rounding up
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let exact = correct as f64 / total as f64 * 100.0;
    (exact + 0.5).floor() as u32
}

/// What the results screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub score: u32,
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub grade: Grade,
    pub max_streak: u32,
    pub lives_left: u32,
    pub achievements: Vec<String>,
}

impl QuizSummary {
    pub fn message(&self) -> &'static str {
        self.grade.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_percentage(100), Grade::S);
        assert_eq!(Grade::from_percentage(90), Grade::S);
        assert_eq!(Grade::from_percentage(89), Grade::A);
        assert_eq!(Grade::from_percentage(80), Grade::A);
        assert_eq!(Grade::from_percentage(70), Grade::B);
        assert_eq!(Grade::from_percentage(60), Grade::C);
        assert_eq!(Grade::from_percentage(59), Grade::D);
        assert_eq!(Grade::from_percentage(0), Grade::D);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(15, 15), 100);
        // 2/15 = 13.33
        assert_eq!(percentage(2, 15), 13);
        // 1/8 = 12.5
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_grade_messages() {
        assert_eq!(Grade::S.message(), "Climate Champion! Outstanding!");
        assert_eq!(Grade::D.to_string(), "D");
    }
}
