use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const WELCOME_MESSAGE: &str = "Welcome to Hotel Ease live chat! How can we help you today?";
pub const BOOKING_PHONE: &str = "+1 (555) 123-4567";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatSender {
    System,
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub sender: ChatSender,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyTopic {
    Booking,
    Cancellation,
    Pricing,
    General,
}

impl ReplyTopic {
    pub fn reply(self) -> String {
        match self {
            Self::Booking => format!(
                "To book a room, you can use our website's booking system or call us directly at {BOOKING_PHONE}."
            ),
            Self::Cancellation => "Most bookings can be canceled up to 24-48 hours before check-in without a fee. Please check your specific booking details.".to_string(),
            Self::Pricing => "Our room prices vary based on season, room type, and availability. You can check current rates on our website.".to_string(),
            Self::General => "Thank you for your message. One of our agents will assist you shortly.".to_string(),
        }
    }
}

/// First matching keyword wins, checked in booking, cancellation, pricing order.
pub fn classify_message(text: &str) -> ReplyTopic {
    let lower = text.to_lowercase();

    if lower.contains("book") {
        return ReplyTopic::Booking;
    }
    if lower.contains("cancel") {
        return ReplyTopic::Cancellation;
    }
    if contains_any(&lower, &["price", "cost"]) {
        return ReplyTopic::Pricing;
    }
    ReplyTopic::General
}

pub fn scripted_reply(text: &str) -> String {
    classify_message(text).reply()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Live-chat log. Entries are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTranscript {
    entries: Vec<ChatEntry>,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self {
            entries: vec![ChatEntry {
                sender: ChatSender::System,
                text: WELCOME_MESSAGE.to_string(),
            }],
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends the user's message as typed and returns the reply topic the agent
    /// should answer with.
    pub fn push_user(&mut self, text: &str) -> Result<ReplyTopic, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyChatMessage);
        }
        let topic = classify_message(text);
        self.entries.push(ChatEntry {
            sender: ChatSender::User,
            text: text.to_string(),
        });
        Ok(topic)
    }

    pub fn push_agent(&mut self, text: String) {
        self.entries.push(ChatEntry {
            sender: ChatSender::Agent,
            text,
        });
    }
}
