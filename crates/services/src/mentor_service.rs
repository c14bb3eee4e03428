//! The task-page mentor chat.
//!
//! Each exchange is split in two so a UI can show the visitor's message
//! before the reply arrives: a synchronous step that edits the transcript,
//! then an async request, then a synchronous step that records the outcome.
//! [`MentorService::send`] and [`MentorService::send_voice`] run all three.

use std::sync::Arc;

use prep_core::Clock;
use prep_core::model::{ChatAuthor, ChatTranscript, VOICE_PLACEHOLDER};
use tracing::warn;

use crate::api::{ChatHistoryEntry, MentorApi, VoiceReply};
use crate::error::MentorError;
use crate::session::SessionController;

pub const CHAT_FALLBACK: &str = "Connection issues. Try again!";
pub const VOICE_FALLBACK: &str = "Voice processing failed. Try text!";

#[derive(Clone)]
pub struct MentorService {
    clock: Clock,
    session: Arc<SessionController>,
    api: Arc<dyn MentorApi>,
}

impl MentorService {
    #[must_use]
    pub fn new(clock: Clock, session: Arc<SessionController>, api: Arc<dyn MentorApi>) -> Self {
        Self {
            clock,
            session,
            api,
        }
    }

    /// Opening transcript for a task.
    #[must_use]
    pub fn start(&self, task_title: &str) -> ChatTranscript {
        ChatTranscript::with_greeting(task_title, self.clock.now())
    }

    /// Context string sent with every message about a task.
    #[must_use]
    pub fn context_for(task_title: &str) -> String {
        format!("Task: {task_title}")
    }

    /// Append the visitor's message. Returns the trimmed text to send, or
    /// `None` when the input is blank and nothing was appended.
    pub fn begin_message(&self, transcript: &mut ChatTranscript, input: &str) -> Option<String> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        transcript.push(ChatAuthor::User, message, self.clock.now());
        Some(message.to_string())
    }

    /// Ask the mentor. Never fails: errors become [`CHAT_FALLBACK`].
    pub async fn reply(&self, message: &str, context: Option<&str>) -> String {
        let Some(credential) = self.session.credential() else {
            warn!("mentor chat without a session");
            return CHAT_FALLBACK.to_string();
        };
        match self.api.chat(&credential, message, context).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "mentor chat failed");
                CHAT_FALLBACK.to_string()
            }
        }
    }

    pub fn finish_message(&self, transcript: &mut ChatTranscript, reply: String) {
        transcript.push(ChatAuthor::Mentor, reply, self.clock.now());
    }

    /// Send a text message and record the reply. Returns false for blank input.
    pub async fn send(
        &self,
        transcript: &mut ChatTranscript,
        input: &str,
        context: Option<&str>,
    ) -> bool {
        let Some(message) = self.begin_message(transcript, input) else {
            return false;
        };
        let reply = self.reply(&message, context).await;
        self.finish_message(transcript, reply);
        true
    }

    /// Append the voice placeholder while the upload is in flight.
    pub fn begin_voice(&self, transcript: &mut ChatTranscript) {
        transcript.push(ChatAuthor::User, VOICE_PLACEHOLDER, self.clock.now());
    }

    /// Upload recorded audio.
    ///
    /// # Errors
    ///
    /// Returns `MentorError::EmptyAudio` for an empty recording, `NoSession`
    /// when signed out, or `Api` if the upload fails.
    pub async fn voice_reply(
        &self,
        audio: Vec<u8>,
        context: Option<&str>,
    ) -> Result<VoiceReply, MentorError> {
        if audio.is_empty() {
            return Err(MentorError::EmptyAudio);
        }
        let credential = self.session.credential().ok_or(MentorError::NoSession)?;
        let reply = self.api.voice(&credential, audio, context).await?;
        Ok(reply)
    }

    /// Replace the placeholder with the transcription and append the reply,
    /// or append [`VOICE_FALLBACK`] on failure.
    pub fn finish_voice(
        &self,
        transcript: &mut ChatTranscript,
        result: Result<VoiceReply, MentorError>,
    ) {
        let now = self.clock.now();
        match result {
            Ok(reply) => {
                if !transcript.replace_last_user(reply.transcription.clone()) {
                    transcript.push(ChatAuthor::User, reply.transcription, now);
                }
                transcript.push(ChatAuthor::Mentor, reply.response, now);
            }
            Err(err) => {
                warn!(error = %err, "voice message failed");
                transcript.push(ChatAuthor::Mentor, VOICE_FALLBACK, now);
            }
        }
    }

    pub async fn send_voice(
        &self,
        transcript: &mut ChatTranscript,
        audio: Vec<u8>,
        context: Option<&str>,
    ) {
        self.begin_voice(transcript);
        let result = self.voice_reply(audio, context).await;
        self.finish_voice(transcript, result);
    }

    /// Past exchanges, newest first.
    ///
    /// # Errors
    ///
    /// Returns `MentorError::NoSession` when signed out or `Api` on failure.
    pub async fn history(&self) -> Result<Vec<ChatHistoryEntry>, MentorError> {
        let credential = self.session.credential().ok_or(MentorError::NoSession)?;
        Ok(self.api.history(&credential).await?)
    }
}
