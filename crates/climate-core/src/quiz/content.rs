//! Quiz question table
//!
//! Loaded once from RON and immutable afterwards. The built-in table ships
//! with the crate; alternative tables (e.g. generated ones) go through the
//! same validation.

use crate::error::{Error, Result};
use crate::identity::{Category, QuestionId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Every question offers exactly this many options
pub const OPTIONS_PER_QUESTION: usize = 4;

const BUILTIN_QUESTIONS: &str = include_str!("../../data/quiz_questions.ron");

fn default_icon() -> String {
    "sparkles".to_string()
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub category: Category,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct: usize,
    pub explanation: String,
    /// Base points for a correct answer
    pub points: u32,
    /// Icon name for the front end
    #[serde(default = "default_icon")]
    pub icon: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }

    /// Text of the correct option
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct)
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(Error::InvalidContent(format!(
                "{} has {} options, expected {}",
                self.id,
                self.options.len(),
                OPTIONS_PER_QUESTION
            )));
        }
        if self.correct >= self.options.len() {
            return Err(Error::InvalidContent(format!(
                "{} marks option {} correct",
                self.id, self.correct
            )));
        }
        Ok(())
    }
}

/// A validated, ordered set of questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizBank {
    questions: Vec<QuizQuestion>,
    category_totals: IndexMap<Category, usize>,
}

impl QuizBank {
    /// The built-in fifteen-question table
    pub fn builtin() -> Result<Self> {
        Self::from_ron_str(BUILTIN_QUESTIONS)
    }

    /// Load a question table from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_ron_str(&content)
    }

    /// Parse a question table from a RON string
    pub fn from_ron_str(content: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct QuestionFile {
            questions: Vec<QuizQuestion>,
        }

        let file: QuestionFile = ron::from_str(content)?;
        Self::from_questions(file.questions)
    }

    /// Validate and wrap a list of questions
    pub fn from_questions(questions: Vec<QuizQuestion>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::InvalidContent("question table is empty".to_string()));
        }

        let mut seen = HashSet::new();
        let mut category_totals: IndexMap<Category, usize> = IndexMap::new();
        for question in &questions {
            question.validate()?;
            if !seen.insert(question.id) {
                return Err(Error::DuplicateDefinition(question.id.to_string()));
            }
            *category_totals.entry(question.category.clone()).or_default() += 1;
        }

        Ok(Self {
            questions,
            category_totals,
        })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions in a category
    pub fn category_total(&self, category: &Category) -> usize {
        self.category_totals.get(category).copied().unwrap_or(0)
    }

    /// Categories in first-appearance order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.category_totals.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, options: usize, correct: usize) -> QuizQuestion {
        QuizQuestion {
            id: QuestionId::new(id),
            category: Category::from("basics"),
            question: format!("Question {}?", id),
            options: (0..options).map(|i| format!("Option {}", i)).collect(),
            correct,
            explanation: String::new(),
            points: 100,
            icon: default_icon(),
        }
    }

    #[test]
    fn test_builtin_table() {
        let bank = QuizBank::builtin().unwrap();
        assert_eq!(bank.len(), 15);
        assert_eq!(bank.category_total(&Category::from("basics")), 3);
        assert_eq!(bank.category_total(&Category::from("impacts")), 5);
        assert_eq!(bank.category_total(&Category::from("solutions")), 4);
        assert_eq!(bank.category_total(&Category::from("actions")), 3);

        let first = bank.get(0).unwrap();
        assert_eq!(first.correct_option(), "Carbon Dioxide (CO₂)");
        assert_eq!(first.points, 100);
    }

    #[test]
    fn test_rejects_wrong_option_count() {
        let err = QuizBank::from_questions(vec![question(1, 3, 0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidContent(_)));
    }

    #[test]
    fn test_rejects_out_of_range_answer() {
        let err = QuizBank::from_questions(vec![question(1, 4, 4)]).unwrap_err();
        assert!(matches!(err, Error::InvalidContent(_)));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err =
            QuizBank::from_questions(vec![question(1, 4, 0), question(1, 4, 1)]).unwrap_err();
        assert!(matches!(err, Error::DuplicateDefinition(_)));
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(QuizBank::from_ron_str("(questions: [])").is_err());
    }

    #[test]
    fn test_icon_defaults() {
        let bank = QuizBank::from_ron_str(
            r#"(questions: [(
                id: 1,
                category: "oceans",
                question: "Q?",
                options: ["a", "b", "c", "d"],
                correct: 3,
                explanation: "because",
                points: 100,
            )])"#,
        )
        .unwrap();
        assert_eq!(bank.get(0).unwrap().icon, "sparkles");
        assert_eq!(bank.categories().count(), 1);
    }
}
