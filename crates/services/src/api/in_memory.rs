//! Scripted API for tests and offline prototyping.
//!
//! Behaves like the real server for the flows the client drives: accounts
//! and bearer tokens, role selection, first-completion points, streaks, a
//! canned mentor and resume reviewer. Switches let tests simulate outages and rejected reads.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use prep_core::model::{
    ActivityKind, Credential, Difficulty, Identity, IdentityDraft, JobTrend, ReadinessBreakdown,
    ReadinessSnapshot, ResumeTemplate, Role, RunOutput, SavedResume, Streak, SubmissionOutcome,
    TaskDetail, TaskId, TaskKind, TaskSummary, TrackDetail, TrackId, TrackProgress, TrendDigest,
    UserId, WeeklyActivity,
};
use prep_core::progression::{DSA_TARGET, breakdown_fill};
use reqwest::StatusCode;

use super::{
    AccountApi, AuthApi, AuthGrant, ChatHistoryEntry, LoginCredentials, MentorApi, ProgressApi,
    Registration, ResumeApi, ResumeDraft, TaskApi, TaskSubmission, TrackKind, VoiceReply,
};
use crate::error::ApiError;

/// Password of the seeded demo account.
pub const DEMO_PASSWORD: &str = "placement-ready";

pub const DEMO_EMAIL: &str = "demo@prep.dev";
const MENTOR_DOWN: &str = "BRO is taking a coffee break. Try again!";
const CONSISTENCY_DAYS: u32 = 7;
const BLOCKED_KEYWORDS: [&str; 3] = ["import os", "import subprocess", "eval("];

#[derive(Clone, Debug)]
struct Account {
    id: UserId,
    name: String,
    email: String,
    password: String,
    role: Option<Role>,
    points: u32,
    streak: Streak,
    weekly: WeeklyActivity,
    progress: HashMap<TaskId, TaskProgress>,
    chats: Vec<ChatHistoryEntry>,
    resumes: Vec<SavedResume>,
}

#[derive(Clone, Copy, Debug, Default)]
struct TaskProgress {
    completed: bool,
    attempts: u32,
}

impl Account {
    fn identity(&self) -> Result<Identity, ApiError> {
        let identity = IdentityDraft {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            points: self.points,
            level: Some(stored_level_label(self.points).to_string()),
            streak: self.streak,
            weekly_activity: self.weekly,
        }
        .validate()?;
        Ok(identity)
    }

    fn task_progress(&self, task_id: &TaskId) -> TaskProgress {
        self.progress.get(task_id).copied().unwrap_or_default()
    }
}

/// Server-side label thresholds, which are narrower than the client's bands.
fn stored_level_label(points: u32) -> &'static str {
    if points >= 100 {
        "Advanced"
    } else if points >= 50 {
        "Intermediate"
    } else {
        "Beginner"
    }
}

#[derive(Clone, Debug)]
struct CatalogTrack {
    kind: TrackKind,
    id: TrackId,
    name: &'static str,
    description: &'static str,
    tasks: Vec<CatalogTask>,
}

#[derive(Clone, Debug)]
struct CatalogTask {
    id: TaskId,
    title: &'static str,
    kind: TaskKind,
    difficulty: Option<Difficulty>,
    points: u32,
    description: &'static str,
    starter_code: &'static str,
    hints: &'static [&'static str],
}

fn catalog() -> Vec<CatalogTrack> {
    vec![
        CatalogTrack {
            kind: TrackKind::Dsa,
            id: TrackId::new("arrays"),
            name: "Arrays",
            description: "Traversal, prefix sums and two-pointer patterns.",
            tasks: vec![
                CatalogTask {
                    id: TaskId::new("arr-001"),
                    title: "Two Sum",
                    kind: TaskKind::Coding,
                    difficulty: Some(Difficulty::Easy),
                    points: 10,
                    description: "Return indices of the two numbers that add up to target.",
                    starter_code: "def two_sum(nums, target):\n    pass\n",
                    hints: &[
                        "Think about what you need to find for each number.",
                        "A hash map gives O(1) lookups of complements.",
                    ],
                },
                CatalogTask {
                    id: TaskId::new("arr-002"),
                    title: "Maximum Subarray",
                    kind: TaskKind::Coding,
                    difficulty: Some(Difficulty::Medium),
                    points: 20,
                    description: "Find the contiguous subarray with the largest sum.",
                    starter_code: "def max_subarray(nums):\n    pass\n",
                    hints: &["Track the best sum ending at each index."],
                },
                CatalogTask {
                    id: TaskId::new("concept-001"),
                    title: "Explain Array Traversal",
                    kind: TaskKind::Concept,
                    difficulty: None,
                    points: 5,
                    description: "Explain how to traverse an array and its time complexity.",
                    starter_code: "",
                    hints: &["Consider each element exactly once."],
                },
            ],
        },
        CatalogTrack {
            kind: TrackKind::Analytics,
            id: TrackId::new("sql-basics"),
            name: "SQL Basics",
            description: "Filtering, grouping and joins.",
            tasks: vec![CatalogTask {
                id: TaskId::new("sql-001"),
                title: "Top Customers",
                kind: TaskKind::Coding,
                difficulty: Some(Difficulty::Easy),
                points: 10,
                description: "List the five customers with the highest total spend.",
                starter_code: "SELECT\n",
                hints: &["GROUP BY the customer, then ORDER BY the sum."],
            }],
        },
    ]
}

fn resume_templates() -> Vec<ResumeTemplate> {
    let template = |key: &str, name: &str, focus: &[&str], tips: &[&str]| ResumeTemplate {
        key: key.to_string(),
        name: name.to_string(),
        focus: focus.iter().map(|f| (*f).to_string()).collect(),
        tips: tips.iter().map(|t| (*t).to_string()).collect(),
    };
    vec![
        template(
            "amazon",
            "Amazon",
            &["Leadership Principles", "Ownership", "Metrics"],
            &[
                "Frame each bullet around a Leadership Principle.",
                "Lead with the customer impact.",
            ],
        ),
        template(
            "google",
            "Google",
            &["Scale", "Problem Solving", "Impact"],
            &[
                "Quantify impact: Accomplished X as measured by Y by doing Z.",
                "Highlight systems that handled real scale.",
            ],
        ),
        template(
            "microsoft",
            "Microsoft",
            &["Collaboration", "Growth Mindset", "Technical Depth"],
            &[
                "Show cross-team work and what you learned from it.",
                "Keep it to one page.",
            ],
        ),
    ]
}

fn trends_for(role: Option<Role>) -> Vec<JobTrend> {
    let trend = |id: &str, title: &str, description: &str, skills: &[&str]| JobTrend {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        skills: skills.iter().map(|s| (*s).to_string()).collect(),
    };
    let mut trends = vec![trend(
        "genai",
        "GenAI features in every product",
        "Teams want engineers who can ship LLM-backed features.",
        &["Python", "LLMs", "Prompting", "Evaluation", "APIs"],
    )];
    match role {
        Some(Role::Sde) => trends.push(trend(
            "sde-systems",
            "System design in fresher interviews",
            "Product companies now ask graduates basic design questions.",
            &["Caching", "Databases", "APIs"],
        )),
        Some(Role::DataAnalyst) => trends.push(trend(
            "da-sql",
            "SQL-first analytics screens",
            "Most analyst loops open with a live SQL round.",
            &["SQL", "Excel", "Dashboards"],
        )),
        Some(Role::DataScientist | Role::MlEngineer) => trends.push(trend(
            "ml-ops",
            "Production ML over notebooks",
            "Hiring favours candidates who have deployed a model.",
            &["MLOps", "Docker", "Experiment tracking"],
        )),
        None => {}
    }
    trends
}

#[derive(Debug, Default)]
struct InMemoryState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    next_token: u64,
    next_resume: u64,
    offline: bool,
    failing_reads: bool,
    mentor_down: bool,
}

impl InMemoryState {
    fn issue_token(&mut self, email: &str) -> Result<Credential, ApiError> {
        self.next_token += 1;
        let token = format!("token-{}", self.next_token);
        self.tokens.insert(token.clone(), email.to_string());
        Credential::new(token).ok_or_else(|| ApiError::Decode("empty token".into()))
    }

    fn account(&self, credential: &Credential) -> Result<&Account, ApiError> {
        self.tokens
            .get(credential.expose())
            .and_then(|email| self.accounts.get(email))
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".into()))
    }

    fn account_mut(&mut self, credential: &Credential) -> Result<&mut Account, ApiError> {
        let email = self
            .tokens
            .get(credential.expose())
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".into()))?;
        self.accounts
            .get_mut(&email)
            .ok_or_else(|| ApiError::Unauthorized("User not found".into()))
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline {
            return Err(ApiError::Unreachable("in-memory API is offline".into()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), ApiError> {
        self.check_online()?;
        if self.failing_reads {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: "Internal Server Error".into(),
            });
        }
        Ok(())
    }
}

/// In-memory [`super::RemoteApi`] with a small seeded catalog.
#[derive(Clone)]
pub struct InMemoryApi {
    state: Arc<Mutex<InMemoryState>>,
    catalog: Arc<Vec<CatalogTrack>>,
}

impl Default for InMemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryApi {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState::default())),
            catalog: Arc::new(catalog()),
        }
    }

    /// An API with one role-less demo account (`demo@prep.dev` / [`DEMO_PASSWORD`]).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the demo account cannot be seeded.
    pub fn demo() -> Result<Self, ApiError> {
        let api = Self::new();
        api.seed_account("Demo Student", DEMO_EMAIL, DEMO_PASSWORD, None)?;
        Ok(api)
    }

    fn state(&self) -> Result<MutexGuard<'_, InMemoryState>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Decode(format!("in-memory API state poisoned: {e}")))
    }

    /// Create an account directly, optionally with a role already chosen.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` if the email is already registered.
    pub fn seed_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Option<Role>,
    ) -> Result<UserId, ApiError> {
        let mut state = self.state()?;
        let key = email.trim().to_ascii_lowercase();
        if state.accounts.contains_key(&key) {
            return Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                detail: "Email already registered".into(),
            });
        }
        let id = UserId::random();
        state.accounts.insert(
            key.clone(),
            Account {
                id,
                name: name.to_string(),
                email: key,
                password: password.to_string(),
                role,
                points: 0,
                streak: Streak::default(),
                weekly: WeeklyActivity::default(),
                progress: HashMap::new(),
                chats: Vec::new(),
                resumes: Vec::new(),
            },
        );
        Ok(id)
    }

    /// Issue a bearer credential for an existing account without a login round trip.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if no such account exists.
    pub fn issue_credential(&self, email: &str) -> Result<Credential, ApiError> {
        let mut state = self.state()?;
        let key = email.trim().to_ascii_lowercase();
        if !state.accounts.contains_key(&key) {
            return Err(ApiError::Unauthorized("User not found".into()));
        }
        state.issue_token(&key)
    }

    /// Invalidate every issued credential, as if they all expired.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the state lock is poisoned.
    pub fn revoke_credentials(&self) -> Result<(), ApiError> {
        self.state()?.tokens.clear();
        Ok(())
    }

    /// While offline every call fails with `ApiError::Unreachable`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the state lock is poisoned.
    pub fn set_offline(&self, offline: bool) -> Result<(), ApiError> {
        self.state()?.offline = offline;
        Ok(())
    }

    /// While set, progress reads fail with a server error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the state lock is poisoned.
    pub fn set_failing_reads(&self, failing: bool) -> Result<(), ApiError> {
        self.state()?.failing_reads = failing;
        Ok(())
    }

    /// While set, the AI endpoints (mentor and resume analysis) fail with a server error.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the state lock is poisoned.
    pub fn set_mentor_down(&self, down: bool) -> Result<(), ApiError> {
        self.state()?.mentor_down = down;
        Ok(())
    }

    fn find_track(&self, kind: TrackKind, track_id: &TrackId) -> Result<&CatalogTrack, ApiError> {
        self.catalog
            .iter()
            .find(|track| track.kind == kind && &track.id == track_id)
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::NOT_FOUND,
                detail: "Track not found".into(),
            })
    }

    fn find_task(&self, task_id: &TaskId) -> Option<&CatalogTask> {
        self.catalog
            .iter()
            .flat_map(|track| track.tasks.iter())
            .find(|task| &task.id == task_id)
    }

    fn summarize(account: &Account, track: &CatalogTrack) -> TrackDetail {
        let tasks: Vec<TaskSummary> = track
            .tasks
            .iter()
            .map(|task| {
                let progress = account.task_progress(&task.id);
                TaskSummary {
                    id: task.id.clone(),
                    title: task.title.to_string(),
                    kind: task.kind,
                    difficulty: task.difficulty,
                    points: task.points,
                    completed: progress.completed,
                    attempts: progress.attempts,
                }
            })
            .collect();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let progress = TrackProgress::new(
            track.id.clone(),
            track.name,
            u32::try_from(tasks.len()).unwrap_or(u32::MAX),
            u32::try_from(completed).unwrap_or(u32::MAX),
        )
        .with_description(track.description);
        TrackDetail { progress, tasks }
    }

    fn completed_in(&self, account: &Account, kind: TrackKind) -> u32 {
        let count = self
            .catalog
            .iter()
            .filter(|track| track.kind == kind)
            .flat_map(|track| track.tasks.iter())
            .filter(|task| account.task_progress(&task.id).completed)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

#[async_trait]
impl AuthApi for InMemoryApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, ApiError> {
        let mut state = self.state()?;
        state.check_online()?;
        let key = credentials.email.trim().to_ascii_lowercase();
        let identity = match state.accounts.get(&key) {
            Some(account) if account.password == credentials.password => account.identity()?,
            _ => return Err(ApiError::Unauthorized("Invalid email or password".into())),
        };
        let credential = state.issue_token(&key)?;
        Ok(AuthGrant {
            credential,
            identity,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError> {
        self.state()?.check_online()?;
        self.seed_account(
            &registration.name,
            &registration.email,
            &registration.password,
            None,
        )?;
        let mut state = self.state()?;
        let key = registration.email.trim().to_ascii_lowercase();
        let identity = state
            .accounts
            .get(&key)
            .ok_or_else(|| ApiError::Decode("registered account vanished".into()))?
            .identity()?;
        let credential = state.issue_token(&key)?;
        Ok(AuthGrant {
            credential,
            identity,
        })
    }

    async fn profile(&self, credential: &Credential) -> Result<Identity, ApiError> {
        let state = self.state()?;
        state.check_online()?;
        state.account(credential)?.identity()
    }
}

#[async_trait]
impl AccountApi for InMemoryApi {
    async fn set_role(&self, credential: &Credential, role: Role) -> Result<(), ApiError> {
        let mut state = self.state()?;
        state.check_online()?;
        state.account_mut(credential)?.role = Some(role);
        Ok(())
    }

    async fn record_activity(
        &self,
        credential: &Credential,
        kind: ActivityKind,
    ) -> Result<(), ApiError> {
        let mut state = self.state()?;
        state.check_online()?;
        let account = state.account_mut(credential)?;
        match kind {
            ActivityKind::Dsa => account.weekly.dsa += 1,
            ActivityKind::Leetcode => account.weekly.leetcode += 1,
            ActivityKind::Github => account.weekly.github += 1,
            ActivityKind::Linkedin => account.weekly.linkedin += 1,
        }
        let current = account.streak.current.max(1);
        account.streak = Streak::new(current, account.streak.longest);
        Ok(())
    }
}

#[async_trait]
impl ProgressApi for InMemoryApi {
    async fn tracks(
        &self,
        credential: &Credential,
        kind: TrackKind,
    ) -> Result<Vec<TrackProgress>, ApiError> {
        let state = self.state()?;
        state.check_read()?;
        let account = state.account(credential)?;
        Ok(self
            .catalog
            .iter()
            .filter(|track| track.kind == kind)
            .map(|track| Self::summarize(account, track).progress)
            .collect())
    }

    async fn track_detail(
        &self,
        credential: &Credential,
        kind: TrackKind,
        track_id: &TrackId,
    ) -> Result<TrackDetail, ApiError> {
        let state = self.state()?;
        state.check_read()?;
        let account = state.account(credential)?;
        let track = self.find_track(kind, track_id)?;
        Ok(Self::summarize(account, track))
    }

    async fn task_detail(
        &self,
        credential: &Credential,
        track_id: &TrackId,
        task_id: &TaskId,
    ) -> Result<TaskDetail, ApiError> {
        let state = self.state()?;
        state.check_read()?;
        let account = state.account(credential)?;
        let track = self.find_track(TrackKind::Dsa, track_id)?;
        let detail = Self::summarize(account, track);
        let (summary, task) = detail
            .tasks
            .into_iter()
            .zip(track.tasks.iter())
            .find(|(summary, _)| &summary.id == task_id)
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::NOT_FOUND,
                detail: "Task not found".into(),
            })?;
        Ok(TaskDetail {
            summary,
            description: task.description.to_string(),
            starter_code: task.starter_code.to_string(),
            hints: task.hints.iter().map(|hint| (*hint).to_string()).collect(),
            solution_explanation: None,
        })
    }

    async fn readiness(&self, credential: &Credential) -> Result<ReadinessSnapshot, ApiError> {
        let state = self.state()?;
        state.check_read()?;
        let account = state.account(credential)?;
        let dsa = self.completed_in(account, TrackKind::Dsa);
        let analytics = self.completed_in(account, TrackKind::Analytics);
        let skill_score = breakdown_fill(dsa, DSA_TARGET);
        let consistency_score = breakdown_fill(account.streak.current, CONSISTENCY_DAYS);
        let overall = (u32::from(skill_score) * 7 + u32::from(consistency_score) * 3) / 10;
        let mut recommendations = Vec::new();
        if dsa < DSA_TARGET {
            recommendations.push("Complete more DSA tasks to build problem-solving speed.".into());
        }
        if account.streak.current < 3 {
            recommendations.push("Practice daily to grow your streak.".into());
        }
        Ok(ReadinessSnapshot {
            role: account.role,
            overall_readiness: u8::try_from(overall).unwrap_or(100),
            skill_score,
            consistency_score,
            points: account.points,
            streak: account.streak,
            breakdown: ReadinessBreakdown {
                dsa,
                analytics,
                datascience: 0,
                ml: 0,
            },
            recommendations,
        })
    }

    async fn job_trends(&self, credential: &Credential) -> Result<TrendDigest, ApiError> {
        let state = self.state()?;
        state.check_read()?;
        let account = state.account(credential)?;
        Ok(TrendDigest {
            user_role: account.role.map(|role| role.label().to_string()),
            trends: trends_for(account.role),
        })
    }
}

#[async_trait]
impl TaskApi for InMemoryApi {
    async fn submit_task(
        &self,
        credential: &Credential,
        submission: &TaskSubmission,
    ) -> Result<SubmissionOutcome, ApiError> {
        let points = self
            .find_task(&submission.task_id)
            .map(|task| task.points)
            .ok_or_else(|| ApiError::Status {
                status: StatusCode::NOT_FOUND,
                detail: "Task not found".into(),
            })?;
        let mut state = self.state()?;
        state.check_online()?;
        let account = state.account_mut(credential)?;
        let progress = account
            .progress
            .entry(submission.task_id.clone())
            .or_default();
        progress.attempts += 1;
        let points_earned = if progress.completed { 0 } else { points };
        progress.completed = true;
        account.points += points_earned;
        let message = if points_earned > 0 {
            "Great work! Task completed."
        } else {
            "Submission recorded."
        };
        Ok(SubmissionOutcome {
            points_earned,
            message: message.into(),
        })
    }

    async fn run_code(
        &self,
        credential: &Credential,
        code: &str,
        _task_id: Option<&TaskId>,
    ) -> Result<RunOutput, ApiError> {
        let state = self.state()?;
        state.check_online()?;
        state.account(credential)?;
        if let Some(keyword) = BLOCKED_KEYWORDS.iter().find(|kw| code.contains(**kw)) {
            return Ok(RunOutput {
                success: false,
                output: String::new(),
                error: Some(format!(
                    "Security Error: '{keyword}' is not allowed in this environment."
                )),
            });
        }
        let output = if code.contains("print(") {
            "Code executed!"
        } else {
            "No output. Add print() statements to see results."
        };
        Ok(RunOutput {
            success: true,
            output: output.into(),
            error: None,
        })
    }
}

#[async_trait]
impl MentorApi for InMemoryApi {
    async fn chat(
        &self,
        credential: &Credential,
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ApiError> {
        let mut state = self.state()?;
        state.check_online()?;
        if state.mentor_down {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: MENTOR_DOWN.into(),
            });
        }
        let account = state.account_mut(credential)?;
        let response = format!("Good question! What have you tried so far for: {message}");
        account.chats.push(ChatHistoryEntry {
            message: message.to_string(),
            response: response.clone(),
            context: context.map(str::to_string),
            timestamp: Some(Utc::now()),
        });
        Ok(response)
    }

    async fn voice(
        &self,
        credential: &Credential,
        audio: Vec<u8>,
        context: Option<&str>,
    ) -> Result<VoiceReply, ApiError> {
        if audio.is_empty() {
            return Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                detail: "Empty audio".into(),
            });
        }
        let transcription = format!("(voice message, {} bytes)", audio.len());
        let response = self.chat(credential, &transcription, context).await?;
        Ok(VoiceReply {
            transcription,
            response,
        })
    }

    async fn history(&self, credential: &Credential) -> Result<Vec<ChatHistoryEntry>, ApiError> {
        let state = self.state()?;
        state.check_online()?;
        let account = state.account(credential)?;
        Ok(account.chats.iter().rev().cloned().collect())
    }
}

#[async_trait]
impl ResumeApi for InMemoryApi {
    async fn resume_templates(
        &self,
        credential: &Credential,
    ) -> Result<Vec<ResumeTemplate>, ApiError> {
        let state = self.state()?;
        state.check_read()?;
        state.account(credential)?;
        Ok(resume_templates())
    }

    async fn saved_resumes(&self, credential: &Credential) -> Result<Vec<SavedResume>, ApiError> {
        let state = self.state()?;
        state.check_read()?;
        let account = state.account(credential)?;
        Ok(account.resumes.iter().rev().cloned().collect())
    }

    async fn analyze_resume(
        &self,
        credential: &Credential,
        draft: &ResumeDraft,
    ) -> Result<String, ApiError> {
        let state = self.state()?;
        state.check_online()?;
        if state.mentor_down {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: "Analysis failed".into(),
            });
        }
        state.account(credential)?;
        let templates = resume_templates();
        let company = templates
            .iter()
            .find(|template| template.key == draft.company)
            .map_or(draft.company.as_str(), |template| template.name.as_str());
        let missing = draft.content.missing_sections();
        let mut analysis = format!("ATS review for {company}\n\n");
        if missing.is_empty() {
            analysis.push_str("Every section is filled in.\n");
        } else {
            analysis.push_str(&format!("Missing sections: {}\n", missing.join(", ")));
        }
        analysis.push_str("Add numbers to your project bullets to show impact.");
        Ok(analysis)
    }

    async fn create_resume(
        &self,
        credential: &Credential,
        draft: &ResumeDraft,
    ) -> Result<(), ApiError> {
        let mut state = self.state()?;
        state.check_online()?;
        state.next_resume += 1;
        let id = format!("resume-{}", state.next_resume);
        let account = state.account_mut(credential)?;
        account.resumes.push(SavedResume {
            id,
            company: draft.company.clone(),
            template: draft.template.clone(),
            created_at: Some(Utc::now()),
        });
        Ok(())
    }
}
