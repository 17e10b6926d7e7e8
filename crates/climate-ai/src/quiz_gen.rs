//! Quiz questions written by the assistant

use crate::client::AiClient;
use crate::error::{Error, Result};
use climate_core::quiz::{QuizBank, QuizQuestion};
use climate_core::{Category, QuestionId};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_QUESTIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 10;
pub const DEFAULT_QUESTIONS: usize = 5;

/// Icon given to every generated question
pub const GENERATED_ICON: &str = "sparkles";

pub const SUGGESTED_TOPICS: [&str; 6] = [
    "Renewable Energy",
    "Ocean Acidification",
    "Carbon Footprint",
    "Deforestation",
    "Climate Solutions",
    "Greenhouse Gases",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to ask the assistant for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub difficulty: Difficulty,
    count: usize,
}

impl QuizRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            difficulty: Difficulty::default(),
            count: DEFAULT_QUESTIONS,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Number of questions, clamped to 3..=10
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.clamp(MIN_QUESTIONS, MAX_QUESTIONS);
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// The prompt sent as the user turn; rejects a blank topic
    pub fn prompt(&self) -> Result<String> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(Error::EmptyTopic);
        }

        Ok(format!(
            r#"Create {count} multiple-choice quiz questions about "{topic}" for climate education.

Difficulty: {difficulty}

Return ONLY a JSON array like this (no other text):
[
  {{
    "question": "Question text here?",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correct": 0,
    "explanation": "Why this answer is correct",
    "category": "basics",
    "points": 100
  }}
]

Make questions fun and educational for students!"#,
            count = self.count,
            topic = topic,
            difficulty = self.difficulty,
        ))
    }
}

fn default_category() -> String {
    "basics".to_string()
}

fn default_points() -> u32 {
    100
}

/// A question as the assistant returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_points")]
    pub points: u32,
}

/// The span from the first `[` to the last `]`, if any
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Decode the question array embedded in a reply
pub fn parse_questions(reply: &str) -> Result<Vec<GeneratedQuestion>> {
    let json = extract_json_array(reply).ok_or(Error::NoQuestions)?;
    Ok(serde_json::from_str(json)?)
}

/// Number the questions from 1 and validate them as a playable bank
pub fn into_bank(questions: Vec<GeneratedQuestion>) -> Result<QuizBank> {
    let questions = questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| QuizQuestion {
            id: QuestionId::new(i as u32 + 1),
            category: Category::new(q.category),
            question: q.question,
            options: q.options,
            correct: q.correct,
            explanation: q.explanation,
            points: q.points,
            icon: GENERATED_ICON.to_string(),
        })
        .collect();
    Ok(QuizBank::from_questions(questions)?)
}

impl AiClient {
    pub async fn generate_quiz(&self, request: &QuizRequest) -> Result<Vec<GeneratedQuestion>> {
        let prompt = request.prompt()?;
        let reply = self.ask(&prompt, &[]).await?;
        let questions = parse_questions(&reply)
            .inspect_err(|e| tracing::warn!(error = %e, "could not parse generated quiz"))?;
        tracing::info!(
            topic = %request.topic,
            questions = questions.len(),
            "quiz generated"
        );
        Ok(questions)
    }

    /// Generate and convert into a bank a quiz session can use
    pub async fn generate_bank(&self, request: &QuizRequest) -> Result<QuizBank> {
        into_bank(self.generate_quiz(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiConfig;
    use crate::knowledge::KnowledgeBase;
    use crate::testing::serve_once;

    const TWO_QUESTIONS: &str = r#"[
        {"question": "Which gas?", "options": ["CO2", "O2", "N2", "Ar"], "correct": 0,
         "explanation": "CO2 traps heat", "category": "basics", "points": 100},
        {"question": "Best transport?", "options": ["Car", "Bike", "Jet", "Ship"], "correct": 1,
         "explanation": "No emissions", "category": "actions", "points": 150}
    ]"#;

    #[test]
    fn test_prompt_text() {
        let prompt = QuizRequest::new("  Deforestation ")
            .with_difficulty(Difficulty::Hard)
            .with_count(4)
            .prompt()
            .unwrap();

        assert!(prompt.starts_with(
            "Create 4 multiple-choice quiz questions about \"Deforestation\" for climate education."
        ));
        assert!(prompt.contains("Difficulty: hard"));
        assert!(prompt.contains("    \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"],"));
        assert!(prompt.ends_with("Make questions fun and educational for students!"));
    }

    #[test]
    fn test_count_clamped() {
        assert_eq!(QuizRequest::new("x").with_count(1).count(), 3);
        assert_eq!(QuizRequest::new("x").with_count(50).count(), 10);
        assert_eq!(QuizRequest::new("x").count(), 5);
    }

    #[test]
    fn test_blank_topic_rejected() {
        assert!(matches!(
            QuizRequest::new("   ").prompt(),
            Err(Error::EmptyTopic)
        ));
    }

    #[test]
    fn test_extract_json_array() {
        assert_eq!(extract_json_array("Sure!\n[1, 2]\nEnjoy"), Some("[1, 2]"));
        // greedy: first '[' to last ']'
        assert_eq!(extract_json_array("[a] and [b]"), Some("[a] and [b]"));
        assert_eq!(extract_json_array("no array here"), None);
        assert_eq!(extract_json_array("] backwards ["), None);
    }

    #[test]
    fn test_parse_questions() {
        let reply = format!("Here you go:\n```json\n{}\n```", TWO_QUESTIONS);
        let questions = parse_questions(&reply).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].correct, 1);

        assert!(matches!(parse_questions("sorry"), Err(Error::NoQuestions)));
        assert!(matches!(parse_questions("[not json]"), Err(Error::Json(_))));
    }

    #[test]
    fn test_into_bank_numbers_questions() {
        let bank = into_bank(parse_questions(TWO_QUESTIONS).unwrap()).unwrap();
        assert_eq!(bank.len(), 2);

        let second = bank.get(1).unwrap();
        assert_eq!(second.id, QuestionId::new(2));
        assert_eq!(second.icon, GENERATED_ICON);
        assert_eq!(second.category.as_str(), "actions");
    }

    #[test]
    fn test_into_bank_rejects_bad_question() {
        let questions = parse_questions(
            r#"[{"question": "Q?", "options": ["a", "b"], "correct": 0}]"#,
        )
        .unwrap();
        assert!(matches!(into_bank(questions), Err(Error::Content(_))));
    }

    #[tokio::test]
    async fn test_generate_bank_over_http() {
        let reply = serde_json::json!({
            "choices": [{"message": {"content": format!("Quiz:\n{}", TWO_QUESTIONS)}}]
        })
        .to_string();
        let (base_url, server) = serve_once(200, &reply).await;

        let kb = KnowledgeBase::builtin().unwrap();
        let client = AiClient::new(AiConfig::new("sk-test", base_url, "m"), &kb).unwrap();
        let bank = client
            .generate_bank(&QuizRequest::new("Transport"))
            .await
            .unwrap();
        assert_eq!(bank.len(), 2);

        let request = server.await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[1]["content"]
            .as_str()
            .unwrap()
            .contains("about \"Transport\""));
    }
}
