//! Climate knowledge base and the assistant's system prompt

use crate::error::Result;
use climate_core::GameRng;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const BUILTIN_KNOWLEDGE: &str = include_str!("../data/knowledge.ron");

/// Instructions that open every conversation
pub const SYSTEM_PROMPT: &str = include_str!("../data/system_prompt.txt");

/// Joins the system prompt and the knowledge dump
pub const KNOWLEDGE_PREAMBLE: &str = "\n\nHere is climate information you can use:\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sdg13 {
    pub title: String,
    pub description: String,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateChange {
    pub definition: String,
    pub global_warming: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreenhouseGases {
    pub description: String,
    pub gases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Causes {
    pub main: Vec<String>,
    pub greenhouse_gases: GreenhouseGases,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effects {
    pub environmental: Vec<String>,
    pub health: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solutions {
    pub individual: Vec<String>,
    pub global: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParisAgreement {
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Myth {
    pub myth: String,
    pub fact: String,
}

/// Everything the assistant is told about climate
///
/// Field names serialize in camelCase; the JSON dump in the system message
/// uses that vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBase {
    pub sdg13: Sdg13,
    pub climate_change: ClimateChange,
    pub causes: Causes,
    pub effects: Effects,
    pub solutions: Solutions,
    pub paris_agreement: ParisAgreement,
    pub facts: Vec<String>,
    pub qna: Vec<QuestionAnswer>,
    pub myths: Vec<Myth>,
    /// Tips keyed by category (`energy`, `transportation`, ...)
    pub eco_tips: IndexMap<String, Vec<String>>,
}

impl KnowledgeBase {
    pub fn builtin() -> Result<Self> {
        Self::from_ron_str(BUILTIN_KNOWLEDGE)
    }

    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// System prompt plus the pretty-printed knowledge base
    pub fn system_message(&self) -> Result<String> {
        let dump = serde_json::to_string_pretty(self)?;
        Ok(format!("{}{}{}", SYSTEM_PROMPT, KNOWLEDGE_PREAMBLE, dump))
    }

    pub fn random_fact(&self, rng: &mut GameRng) -> Option<&str> {
        rng.pick(&self.facts).map(String::as_str)
    }

    /// Tips for one category
    pub fn eco_tips(&self, category: &str) -> Option<&[String]> {
        self.eco_tips.get(category).map(Vec::as_slice)
    }

    pub fn tip_categories(&self) -> impl Iterator<Item = &str> {
        self.eco_tips.keys().map(String::as_str)
    }

    /// Canned answer for a question asked verbatim (case-insensitive)
    pub fn lookup_answer(&self, question: &str) -> Option<&str> {
        let wanted = question.trim();
        self.qna
            .iter()
            .find(|entry| entry.question.eq_ignore_ascii_case(wanted))
            .map(|entry| entry.answer.as_str())
    }
}
