use chrono::{DateTime, Utc};

/// Who wrote a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatAuthor {
    User,
    Mentor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: ChatAuthor,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

/// Placeholder shown while a voice message is being transcribed.
pub const VOICE_PLACEHOLDER: &str = "Voice message...";

/// Ordered, append-only conversation with the mentor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transcript with the mentor's opening line for a task.
    #[must_use]
    pub fn with_greeting(task_title: &str, now: DateTime<Utc>) -> Self {
        let mut transcript = Self::new();
        transcript.push(
            ChatAuthor::Mentor,
            format!(
                "Hey! Working on \"{task_title}\"? Nice choice!\n\nTake your time to understand the problem. \
                 If stuck, I'm here with hints - not answers. What have you figured out?"
            ),
            now,
        );
        transcript
    }

    pub fn push(&mut self, author: ChatAuthor, text: impl Into<String>, sent_at: DateTime<Utc>) {
        self.messages.push(ChatMessage {
            author,
            text: text.into(),
            sent_at,
        });
    }

    /// Replace the text of the most recent user message.
    ///
    /// Returns `false` if there is no user message to replace.
    pub fn replace_last_user(&mut self, text: impl Into<String>) -> bool {
        match self
            .messages
            .iter_mut()
            .rev()
            .find(|message| message.author == ChatAuthor::User)
        {
            Some(message) => {
                message.text = text.into();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
