//! Climate AI - the optional assistant behind the chat window and quiz generator
//!
//! Talks to any OpenAI-compatible chat-completions endpoint:
//! - [`AiConfig`] and a [`KeyValueStore`] hold the key, base URL and model
//! - [`AiClient::ask`] sends one question with the knowledge base attached
//! - [`ChatSession`] keeps the transcript for the chat window
//! - [`AiClient::generate_quiz`] asks for questions and parses them into a
//!   [`climate_core::QuizBank`]
//!
//! The game engines never wait on anything here.

mod chat;
mod client;
mod config;
mod error;
mod knowledge;
mod quiz_gen;

#[cfg(test)]
mod testing;

pub use chat::{ChatSession, ERROR_REPLY, QUICK_QUESTIONS, WELCOME_MESSAGE};
pub use client::{AiClient, ChatMessage, Role, MAX_TOKENS, REQUEST_TIMEOUT, TEMPERATURE};
pub use config::{
    AiConfig, FileStore, KeyValueStore, MemoryStore, API_KEY_KEY, BASE_URL_KEY, DEFAULT_BASE_URL,
    DEFAULT_MODEL, MODEL_KEY,
};
pub use error::{Error, Result};
pub use knowledge::{KnowledgeBase, KNOWLEDGE_PREAMBLE, SYSTEM_PROMPT};
pub use quiz_gen::{
    extract_json_array, into_bank, parse_questions, Difficulty, GeneratedQuestion, QuizRequest,
    DEFAULT_QUESTIONS, GENERATED_ICON, MAX_QUESTIONS, MIN_QUESTIONS, SUGGESTED_TOPICS,
};
