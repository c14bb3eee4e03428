mod chat;
mod credential;
mod identity;
mod ids;
mod level;
mod progress;
mod readiness;
mod resume;
mod role;

pub use chat::{ChatAuthor, ChatMessage, ChatTranscript, VOICE_PLACEHOLDER};
pub use credential::Credential;
pub use identity::{ActivityKind, Identity, IdentityDraft, IdentityError, Streak, WeeklyActivity};
pub use ids::{ParseIdError, TaskId, TrackId, UserId};
pub use level::Level;
pub use progress::{
    Difficulty, RunOutput, SubmissionOutcome, TaskDetail, TaskKind, TaskSummary, TrackDetail,
    TrackProgress,
};
pub use readiness::{ReadinessBreakdown, ReadinessSnapshot};
pub use resume::{
    DEFAULT_RESUME_COMPANY, DEFAULT_RESUME_TEMPLATE, JobTrend, ResumeContent, ResumeTemplate,
    SavedResume, TrendDigest,
};
pub use role::{Role, RoleError};
