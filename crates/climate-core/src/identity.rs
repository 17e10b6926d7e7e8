//! Identity types for quiz content

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a quiz question
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl QuestionId {
    /// Create a new question ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "question:{}", self.0)
    }
}

/// Topic a question belongs to (`basics`, `impacts`, ...)
///
/// String-based so generated question sets can bring their own categories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    /// Create a new category
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the category as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id() {
        let id = QuestionId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "question:7");
    }

    #[test]
    fn test_category() {
        let category = Category::from("impacts");
        assert_eq!(category.as_str(), "impacts");
        assert_eq!(ron::to_string(&category).unwrap(), "\"impacts\"");
    }
}
