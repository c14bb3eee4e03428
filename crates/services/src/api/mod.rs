//! Seams to the remote API.
//!
//! Each concern is an async trait so services can be exercised against
//! [`InMemoryApi`] in tests; [`HttpApi`] implements all of them over HTTP.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use prep_core::model::{
    ActivityKind, Credential, DEFAULT_RESUME_TEMPLATE, Identity, ReadinessSnapshot, ResumeContent,
    ResumeTemplate, Role, RunOutput, SavedResume, SubmissionOutcome, TaskDetail, TaskId,
    TrackDetail, TrackId, TrackProgress, TrendDigest,
};

use crate::error::ApiError;

mod http;
mod in_memory;
mod wire;

pub use http::HttpApi;
pub use in_memory::{DEMO_EMAIL, DEMO_PASSWORD, InMemoryApi};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A successful sign-in: the bearer credential plus the identity it belongs to.
#[derive(Clone, Debug)]
pub struct AuthGrant {
    pub credential: Credential,
    pub identity: Identity,
}

/// Which family of tracks to list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Dsa,
    Analytics,
}

impl TrackKind {
    #[must_use]
    pub fn path_segment(self) -> &'static str {
        match self {
            TrackKind::Dsa => "dsa",
            TrackKind::Analytics => "analytics",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            TrackKind::Dsa => "DSA Tracks",
            TrackKind::Analytics => "Analytics Tracks",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskSubmission {
    pub task_id: TaskId,
    pub code: String,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceReply {
    pub transcription: String,
    pub response: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatHistoryEntry {
    pub message: String,
    pub response: String,
    pub context: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A resume aimed at one company, as sent for analysis or saving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeDraft {
    pub company: String,
    pub template: String,
    pub content: ResumeContent,
}

impl ResumeDraft {
    #[must_use]
    pub fn new(company: impl Into<String>, content: ResumeContent) -> Self {
        Self {
            company: company.into(),
            template: DEFAULT_RESUME_TEMPLATE.to_string(),
            content,
        }
    }
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange email/password for a credential.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for bad credentials, or transport errors.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, ApiError>;

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` when the server rejects the registration.
    async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError>;

    /// Resolve the identity a credential belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the credential is invalid or expired.
    async fn profile(&self, credential: &Credential) -> Result<Identity, ApiError>;
}

#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Persist the user's career role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the server rejects the role or is unreachable.
    async fn set_role(&self, credential: &Credential, role: Role) -> Result<(), ApiError>;

    /// Record one activity towards the streak and weekly counters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn record_activity(
        &self,
        credential: &Credential,
        kind: ActivityKind,
    ) -> Result<(), ApiError>;
}

#[async_trait]
pub trait ProgressApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn tracks(
        &self,
        credential: &Credential,
        kind: TrackKind,
    ) -> Result<Vec<TrackProgress>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures, including unknown tracks.
    async fn track_detail(
        &self,
        credential: &Credential,
        kind: TrackKind,
        track_id: &TrackId,
    ) -> Result<TrackDetail, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures, including unknown tasks.
    async fn task_detail(
        &self,
        credential: &Credential,
        track_id: &TrackId,
        task_id: &TaskId,
    ) -> Result<TaskDetail, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn readiness(&self, credential: &Credential) -> Result<ReadinessSnapshot, ApiError>;

    /// Hiring trends for the user's role.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn job_trends(&self, credential: &Credential) -> Result<TrendDigest, ApiError>;
}

#[async_trait]
pub trait TaskApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn submit_task(
        &self,
        credential: &Credential,
        submission: &TaskSubmission,
    ) -> Result<SubmissionOutcome, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn run_code(
        &self,
        credential: &Credential,
        code: &str,
        task_id: Option<&TaskId>,
    ) -> Result<RunOutput, ApiError>;
}

#[async_trait]
pub trait MentorApi: Send + Sync {
    /// Send a text message and return the mentor's reply.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn chat(
        &self,
        credential: &Credential,
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ApiError>;

    /// Upload a recorded voice message (webm audio).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn voice(
        &self,
        credential: &Credential,
        audio: Vec<u8>,
        context: Option<&str>,
    ) -> Result<VoiceReply, ApiError>;

    /// Most recent exchanges, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn history(&self, credential: &Credential) -> Result<Vec<ChatHistoryEntry>, ApiError>;
}

#[async_trait]
pub trait ResumeApi: Send + Sync {
    /// Company templates, sorted by company key.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn resume_templates(
        &self,
        credential: &Credential,
    ) -> Result<Vec<ResumeTemplate>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn saved_resumes(&self, credential: &Credential) -> Result<Vec<SavedResume>, ApiError>;

    /// Ask the AI reviewer for feedback on a draft.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn analyze_resume(
        &self,
        credential: &Credential,
        draft: &ResumeDraft,
    ) -> Result<String, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport or server failures.
    async fn create_resume(
        &self,
        credential: &Credential,
        draft: &ResumeDraft,
    ) -> Result<(), ApiError>;
}

/// Every API seam in one bundle, as handed to the services.
pub trait RemoteApi: AuthApi + AccountApi + ProgressApi + TaskApi + MentorApi + ResumeApi {}

impl<T> RemoteApi for T where
    T: AuthApi + AccountApi + ProgressApi + TaskApi + MentorApi + ResumeApi
{
}
