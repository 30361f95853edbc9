//! Mentor/mentee chat.
//!
//! Conversations are per mentor and live only in memory.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::clock::Clock;
use crate::directory::MentorDirectory;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("unknown mentor: {0}")]
    UnknownMentor(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Mentor,
    Mentee,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub content: String,
    pub timestamp: NaiveTime,
}

impl ChatMessage {
    /// `10:05 AM` style label.
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format("%I:%M %p").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub mentor_id: String,
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(mentor_id: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            mentor_id: mentor_id.into(),
            messages,
        }
    }

    /// Appends a message. Blank content is rejected; ids follow the
    /// message count.
    pub fn send(
        &mut self,
        sender: Sender,
        content: &str,
        clock: &dyn Clock,
    ) -> Result<&ChatMessage, ChatError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let message = ChatMessage {
            id: self.messages.len() as u64 + 1,
            sender,
            content: content.to_string(),
            timestamp: clock.time_of_day(),
        };
        debug!(
            "Chat with mentor {}: message {} from {:?}",
            self.mentor_id, message.id, sender
        );
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// Shared conversations keyed by mentor id, seeded from the directory on
/// first access.
#[derive(Clone)]
pub struct ChatStore {
    directory: Arc<dyn MentorDirectory>,
    clock: Arc<dyn Clock>,
    conversations: Arc<Mutex<HashMap<String, Conversation>>>,
}

impl ChatStore {
    pub fn new(directory: Arc<dyn MentorDirectory>, clock: Arc<dyn Clock>) -> Self {
        Self {
            directory,
            clock,
            conversations: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn conversation(&self, mentor_id: &str) -> Result<Conversation, ChatError> {
        self.ensure_known(mentor_id)?;
        let mut conversations = self.conversations.lock().await;
        let conversation = conversations
            .entry(mentor_id.to_string())
            .or_insert_with(|| {
                Conversation::new(mentor_id, self.directory.chat_history(mentor_id))
            });
        Ok(conversation.clone())
    }

    /// Sends as the mentee, the only sender the chat screen has.
    pub async fn send(&self, mentor_id: &str, content: &str) -> Result<ChatMessage, ChatError> {
        self.ensure_known(mentor_id)?;
        let mut conversations = self.conversations.lock().await;
        let conversation = conversations
            .entry(mentor_id.to_string())
            .or_insert_with(|| {
                Conversation::new(mentor_id, self.directory.chat_history(mentor_id))
            });
        conversation
            .send(Sender::Mentee, content, self.clock.as_ref())
            .cloned()
    }

    fn ensure_known(&self, mentor_id: &str) -> Result<(), ChatError> {
        if self.directory.mentor(mentor_id).is_none() {
            return Err(ChatError::UnknownMentor(mentor_id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::directory::FixtureDirectory;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::at(
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            NaiveTime::from_hms_opt(14, 5, 0).unwrap(),
        )
    }

    #[test]
    fn test_send_assigns_sequential_ids() {
        let mut conversation = Conversation::new("1", Vec::new());
        conversation.send(Sender::Mentee, "Hi", &clock()).unwrap();
        let second = conversation
            .send(Sender::Mentor, "Hello!", &clock())
            .unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(conversation.messages.len(), 2);
    }

    #[test]
    fn test_send_rejects_blank_content() {
        let mut conversation = Conversation::new("1", Vec::new());
        assert_eq!(
            conversation.send(Sender::Mentee, "   \n", &clock()),
            Err(ChatError::EmptyMessage)
        );
        assert!(conversation.messages.is_empty());
    }

    #[test]
    fn test_send_trims_and_timestamps() {
        let mut conversation = Conversation::new("1", Vec::new());
        let message = conversation
            .send(Sender::Mentee, "  question about hooks ", &clock())
            .unwrap();
        assert_eq!(message.content, "question about hooks");
        assert_eq!(message.timestamp_label(), "02:05 PM");
    }

    #[tokio::test]
    async fn test_store_seeds_from_directory() {
        let store = ChatStore::new(Arc::new(FixtureDirectory::seeded()), Arc::new(clock()));
        let conversation = store.conversation("1").await.unwrap();
        assert_eq!(conversation.messages.len(), 8);

        let sent = store.send("1", "Thanks!").await.unwrap();
        assert_eq!(sent.id, 9);
        assert_eq!(sent.sender, Sender::Mentee);
        assert_eq!(store.conversation("1").await.unwrap().messages.len(), 9);
    }

    #[tokio::test]
    async fn test_store_rejects_unknown_mentor() {
        let store = ChatStore::new(Arc::new(FixtureDirectory::seeded()), Arc::new(clock()));
        assert_eq!(
            store.send("99", "hello").await,
            Err(ChatError::UnknownMentor("99".to_string()))
        );
    }
}
