//! JSON shapes exchanged with the remote API.
//!
//! Optional or missing fields are spelled out here with their defaults, so
//! the domain types built from them never need per-call-site fallbacks.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use prep_core::model::{
    ActivityKind, Credential, Difficulty, Identity, IdentityDraft, JobTrend, ReadinessBreakdown,
    ReadinessSnapshot, ResumeContent, ResumeTemplate, Role, RunOutput, SavedResume, Streak,
    SubmissionOutcome, TaskDetail, TaskId, TaskKind, TaskSummary, TrackDetail, TrackId,
    TrackProgress, TrendDigest, UserId, WeeklyActivity,
};
use serde::{Deserialize, Serialize};

use super::{AuthGrant, ChatHistoryEntry, VoiceReply};
use crate::error::ApiError;

// ─── Requests ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(super) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RoleRequest {
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub(super) struct ActivityRequest {
    pub activity_type: ActivityKind,
}

#[derive(Debug, Serialize)]
pub(super) struct SubmitRequest<'a> {
    pub task_id: &'a str,
    pub code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct RunRequest<'a> {
    pub code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(super) struct ResumeRequest<'a> {
    pub company: &'a str,
    pub content: &'a ResumeContent,
    pub template: &'a str,
}

// ─── Responses ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// FastAPI-style `detail` may be a string or a structured validation list.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(text) => Some(text.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct StreakWire {
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub longest: u32,
}

impl From<StreakWire> for Streak {
    fn from(wire: StreakWire) -> Self {
        Streak::new(wire.current, wire.longest)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserWire {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub streak: Option<StreakWire>,
    #[serde(default)]
    pub weekly_activity: Option<WeeklyActivity>,
}

impl TryFrom<UserWire> for Identity {
    type Error = ApiError;

    fn try_from(wire: UserWire) -> Result<Self, Self::Error> {
        let id: UserId = wire
            .id
            .parse()
            .map_err(|err| ApiError::Decode(format!("user id: {err}")))?;
        let role = match wire.role.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => Some(label.parse::<Role>()?),
        };
        let identity = IdentityDraft {
            id,
            name: wire.name,
            email: wire.email,
            role,
            points: wire.points.unwrap_or(0),
            level: wire.level,
            streak: wire.streak.map(Streak::from).unwrap_or_default(),
            weekly_activity: wire.weekly_activity.unwrap_or_default(),
        }
        .validate()?;
        Ok(identity)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthResponse {
    pub token: String,
    pub user: UserWire,
}

impl TryFrom<AuthResponse> for AuthGrant {
    type Error = ApiError;

    fn try_from(wire: AuthResponse) -> Result<Self, Self::Error> {
        let credential = Credential::new(wire.token)
            .ok_or_else(|| ApiError::Decode("empty token".into()))?;
        Ok(AuthGrant {
            credential,
            identity: wire.user.try_into()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TrackWire {
    pub id: String,
    #[serde(default, alias = "module")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_tasks: u32,
    #[serde(default)]
    pub completed_tasks: u32,
    #[serde(default)]
    pub tasks: Vec<TaskWire>,
}

impl TrackWire {
    fn into_progress(self) -> (TrackProgress, Vec<TaskWire>) {
        let name = self.name.unwrap_or_else(|| self.id.clone());
        let mut progress =
            TrackProgress::new(TrackId::new(self.id), name, self.total_tasks, self.completed_tasks);
        progress.description = self.description;
        (progress, self.tasks)
    }
}

impl From<TrackWire> for TrackProgress {
    fn from(wire: TrackWire) -> Self {
        wire.into_progress().0
    }
}

impl From<TrackWire> for TrackDetail {
    fn from(wire: TrackWire) -> Self {
        let (progress, tasks) = wire.into_progress();
        TrackDetail {
            progress,
            tasks: tasks.into_iter().map(TaskSummary::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct TracksResponse {
    #[serde(default)]
    pub tracks: Vec<TrackWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskWire {
    pub id: String,
    pub title: String,
    #[serde(default, rename = "type")]
    pub kind: TaskKind,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub starter_code: Option<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub solution_explanation: Option<String>,
}

/// Points awarded for a task when the server omits them.
const DEFAULT_TASK_POINTS: u32 = 10;

impl From<TaskWire> for TaskSummary {
    fn from(wire: TaskWire) -> Self {
        TaskSummary {
            id: TaskId::new(wire.id),
            title: wire.title,
            kind: wire.kind,
            difficulty: wire.difficulty,
            points: wire.points.unwrap_or(DEFAULT_TASK_POINTS),
            completed: wire.completed,
            attempts: wire.attempts,
        }
    }
}

impl From<TaskWire> for TaskDetail {
    fn from(mut wire: TaskWire) -> Self {
        let description = wire.description.take().unwrap_or_default();
        let starter_code = wire.starter_code.take().unwrap_or_default();
        let solution_explanation = wire.solution_explanation.take();
        // Concept tasks carry a single `hint` instead of a list.
        let mut hints = std::mem::take(&mut wire.hints);
        if let Some(hint) = wire.hint.take() {
            hints.push(hint);
        }
        TaskDetail {
            summary: wire.into(),
            description,
            starter_code,
            hints,
            solution_explanation,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ReadinessWire {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub overall_readiness: f64,
    #[serde(default)]
    pub skill_score: f64,
    #[serde(default)]
    pub consistency_score: f64,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub streak: Option<StreakWire>,
    #[serde(default)]
    pub breakdown: Option<ReadinessBreakdown>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl From<ReadinessWire> for ReadinessSnapshot {
    fn from(wire: ReadinessWire) -> Self {
        ReadinessSnapshot {
            // A role label this client does not know is shown as "no role".
            role: wire.role.as_deref().and_then(|label| label.parse().ok()),
            overall_readiness: score(wire.overall_readiness),
            skill_score: score(wire.skill_score),
            consistency_score: score(wire.consistency_score),
            points: wire.points,
            streak: wire.streak.map(Streak::from).unwrap_or_default(),
            breakdown: wire.breakdown.unwrap_or_default(),
            recommendations: wire.recommendations,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Deserialize)]
pub(super) struct SubmitResponse {
    #[serde(default)]
    pub points_earned: u32,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<SubmitResponse> for SubmissionOutcome {
    fn from(wire: SubmitResponse) -> Self {
        let message = wire.message.unwrap_or_else(|| {
            if wire.points_earned > 0 {
                "Great work! Task completed.".into()
            } else {
                "Submission recorded.".into()
            }
        });
        SubmissionOutcome {
            points_earned: wire.points_earned,
            message,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RunResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<RunResponse> for RunOutput {
    fn from(wire: RunResponse) -> Self {
        RunOutput {
            success: wire.success,
            output: wire.output.unwrap_or_default(),
            error: wire.error.filter(|err| !err.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct VoiceResponse {
    #[serde(default)]
    pub transcription: String,
    pub response: String,
}

impl From<VoiceResponse> for VoiceReply {
    fn from(wire: VoiceResponse) -> Self {
        VoiceReply {
            transcription: wire.transcription,
            response: wire.response,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntryWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryEntryWire {
    pub message: String,
    pub response: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl From<HistoryEntryWire> for ChatHistoryEntry {
    fn from(wire: HistoryEntryWire) -> Self {
        ChatHistoryEntry {
            message: wire.message,
            response: wire.response,
            context: wire.context,
            timestamp: parse_timestamp(wire.timestamp.as_deref()),
        }
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|at| at.with_timezone(&Utc))
}

#[derive(Debug, Deserialize)]
pub(super) struct TemplateWire {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub focus: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TemplatesResponse {
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateWire>,
}

impl From<TemplatesResponse> for Vec<ResumeTemplate> {
    fn from(wire: TemplatesResponse) -> Self {
        wire.templates
            .into_iter()
            .map(|(key, template)| ResumeTemplate {
                name: template.name.unwrap_or_else(|| key.clone()),
                key,
                focus: template.focus,
                tips: template.tips,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SavedResumeWire {
    pub id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<SavedResumeWire> for SavedResume {
    fn from(wire: SavedResumeWire) -> Self {
        SavedResume {
            created_at: parse_timestamp(wire.created_at.as_deref()),
            id: wire.id,
            company: wire.company,
            template: wire.template,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ResumeListResponse {
    #[serde(default)]
    pub resumes: Vec<SavedResumeWire>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeResponse {
    #[serde(default)]
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrendWire {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrendsResponse {
    #[serde(default)]
    pub trends: Vec<TrendWire>,
    #[serde(default)]
    pub user_role: Option<String>,
}

impl From<TrendsResponse> for TrendDigest {
    fn from(wire: TrendsResponse) -> Self {
        TrendDigest {
            user_role: wire.user_role.filter(|role| !role.trim().is_empty()),
            trends: wire
                .trends
                .into_iter()
                .map(|trend| JobTrend {
                    id: trend.id,
                    title: trend.title,
                    description: trend.description,
                    skills: trend.skills,
                })
                .collect(),
        }
    }
}
