//! Conversation transcript for the climate assistant

use crate::client::{AiClient, ChatMessage};
use crate::error::Result;

pub const WELCOME_MESSAGE: &str = "🌍 Hi! I'm your Climate Action assistant! Ask me anything about climate change, SDG 13, or how you can help save our planet! 🌱";

/// Shown in place of a reply when a request fails
pub const ERROR_REPLY: &str =
    "❌ Sorry, I encountered an error. Please check your API settings and try again.";

/// One-tap starter questions
pub const QUICK_QUESTIONS: [&str; 4] = [
    "What is SDG 13?",
    "How can I reduce my carbon footprint?",
    "What causes climate change?",
    "Give me eco-friendly tips",
];

/// A running conversation, opened with the welcome message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Send a message; returns `Ok(None)` for blank input
    ///
    /// The user turn and the reply are appended together once the reply
    /// arrives. A failed request leaves the transcript untouched.
    pub async fn send(&mut self, client: &AiClient, input: &str) -> Result<Option<String>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        let reply = client.ask(input, &self.transcript).await?;
        self.transcript.push(ChatMessage::user(input));
        self.transcript.push(ChatMessage::assistant(reply.clone()));
        Ok(Some(reply))
    }

    /// Start over with only the welcome message
    pub fn clear(&mut self) {
        self.transcript.truncate(1);
    }
}
