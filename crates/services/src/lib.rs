#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod config;
pub mod error;
pub mod mentor_service;
pub mod progress_service;
pub mod resume_service;
pub mod session;
pub mod task_service;

pub use prep_core::Clock;

pub use api::{
    AccountApi, AuthApi, AuthGrant, ChatHistoryEntry, DEMO_EMAIL, DEMO_PASSWORD, HttpApi,
    InMemoryApi, LoginCredentials, MentorApi, ProgressApi, Registration, RemoteApi, ResumeApi,
    ResumeDraft, TaskApi, TaskSubmission, TrackKind, VoiceReply,
};
pub use app_services::AppServices;
pub use config::ApiConfig;
pub use error::{
    ApiError, AppServicesError, AuthError, MentorError, ProgressError, RefreshError,
    ResumeError, RoleAssignmentError, TaskError,
};
pub use mentor_service::{CHAT_FALLBACK, MentorService, VOICE_FALLBACK};
pub use progress_service::{
    DashboardSummary, ProgressService, ReadinessReport, TrackList, TrackOverview, TrackPage,
};
pub use resume_service::{ResumeService, ResumeWorkspace};
pub use session::SessionController;
pub use task_service::{SubmitReport, TaskService};
