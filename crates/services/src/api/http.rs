use async_trait::async_trait;
use prep_core::model::{
    ActivityKind, Credential, Identity, ReadinessSnapshot, ResumeTemplate, Role, RunOutput,
    SavedResume, SubmissionOutcome, TaskDetail, TaskId, TrackDetail, TrackId, TrackProgress,
    TrendDigest,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::wire::{
    ActivityRequest, AnalyzeResponse, AuthResponse, ChatRequest, ChatResponse, ErrorBody,
    HistoryResponse, LoginRequest, ReadinessWire, RegisterRequest, ResumeListResponse,
    ResumeRequest, RoleRequest, RunRequest, RunResponse, SubmitRequest, SubmitResponse,
    TaskWire, TemplatesResponse, TrackWire, TracksResponse, TrendsResponse, UserWire,
    VoiceResponse,
};
use super::{
    AccountApi, AuthApi, AuthGrant, ChatHistoryEntry, LoginCredentials, MentorApi, ProgressApi,
    Registration, ResumeApi, ResumeDraft, TaskApi, TaskSubmission, TrackKind, VoiceReply,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// JSON-over-HTTP client for the remote API.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn get(&self, path: &str, credential: &Credential) -> RequestBuilder {
        self.client
            .get(self.config.endpoint(path))
            .bearer_auth(credential.expose())
    }

    fn post(&self, path: &str, credential: Option<&Credential>) -> RequestBuilder {
        let request = self.client.post(self.config.endpoint(path));
        match credential {
            Some(credential) => request.bearer_auth(credential.expose()),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let response = check_status(response).await?;
        let body = response.json::<T>().await?;
        Ok(body)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    debug!(%status, %detail, "api request rejected");
    if status == StatusCode::UNAUTHORIZED {
        Err(ApiError::Unauthorized(detail))
    } else {
        Err(ApiError::Status { status, detail })
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, ApiError> {
        let body = LoginRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response: AuthResponse = self.send(self.post("/auth/login", None).json(&body)).await?;
        response.try_into()
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError> {
        let body = RegisterRequest {
            name: &registration.name,
            email: &registration.email,
            password: &registration.password,
        };
        let response: AuthResponse = self
            .send(self.post("/auth/register", None).json(&body))
            .await?;
        response.try_into()
    }

    async fn profile(&self, credential: &Credential) -> Result<Identity, ApiError> {
        let user: UserWire = self.send(self.get("/users/profile", credential)).await?;
        user.try_into()
    }
}

#[async_trait]
impl AccountApi for HttpApi {
    async fn set_role(&self, credential: &Credential, role: Role) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.config.endpoint("/users/role"))
            .bearer_auth(credential.expose())
            .json(&RoleRequest { role });
        self.send_empty(request).await
    }

    async fn record_activity(
        &self,
        credential: &Credential,
        kind: ActivityKind,
    ) -> Result<(), ApiError> {
        let request = self
            .post("/users/streak", Some(credential))
            .json(&ActivityRequest {
                activity_type: kind,
            });
        self.send_empty(request).await
    }
}

#[async_trait]
impl ProgressApi for HttpApi {
    async fn tracks(
        &self,
        credential: &Credential,
        kind: TrackKind,
    ) -> Result<Vec<TrackProgress>, ApiError> {
        let path = format!("/skills/{}", kind.path_segment());
        let response: TracksResponse = self.send(self.get(&path, credential)).await?;
        Ok(response.tracks.into_iter().map(TrackProgress::from).collect())
    }

    async fn track_detail(
        &self,
        credential: &Credential,
        kind: TrackKind,
        track_id: &TrackId,
    ) -> Result<TrackDetail, ApiError> {
        let path = format!("/skills/{}/{}", kind.path_segment(), track_id.as_str());
        let track: TrackWire = self.send(self.get(&path, credential)).await?;
        Ok(track.into())
    }

    async fn task_detail(
        &self,
        credential: &Credential,
        track_id: &TrackId,
        task_id: &TaskId,
    ) -> Result<TaskDetail, ApiError> {
        let path = format!("/skills/dsa/{}/{}", track_id.as_str(), task_id.as_str());
        let task: TaskWire = self.send(self.get(&path, credential)).await?;
        Ok(task.into())
    }

    async fn readiness(&self, credential: &Credential) -> Result<ReadinessSnapshot, ApiError> {
        let readiness: ReadinessWire = self.send(self.get("/readiness", credential)).await?;
        Ok(readiness.into())
    }

    async fn job_trends(&self, credential: &Credential) -> Result<TrendDigest, ApiError> {
        let trends: TrendsResponse = self.send(self.get("/trends", credential)).await?;
        Ok(trends.into())
    }
}

#[async_trait]
impl TaskApi for HttpApi {
    async fn submit_task(
        &self,
        credential: &Credential,
        submission: &TaskSubmission,
    ) -> Result<SubmissionOutcome, ApiError> {
        let path = format!("/tasks/{}/submit", submission.task_id.as_str());
        let body = SubmitRequest {
            task_id: submission.task_id.as_str(),
            code: &submission.code,
            explanation: submission.explanation.as_deref(),
        };
        let response: SubmitResponse = self
            .send(self.post(&path, Some(credential)).json(&body))
            .await?;
        Ok(response.into())
    }

    async fn run_code(
        &self,
        credential: &Credential,
        code: &str,
        task_id: Option<&TaskId>,
    ) -> Result<RunOutput, ApiError> {
        let body = RunRequest {
            code,
            task_id: task_id.map(TaskId::as_str),
        };
        let response: RunResponse = self
            .send(self.post("/code/run", Some(credential)).json(&body))
            .await?;
        Ok(response.into())
    }
}

#[async_trait]
impl MentorApi for HttpApi {
    async fn chat(
        &self,
        credential: &Credential,
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ApiError> {
        let body = ChatRequest { message, context };
        let response: ChatResponse = self
            .send(self.post("/bro/chat", Some(credential)).json(&body))
            .await?;
        Ok(response.response)
    }

    async fn voice(
        &self,
        credential: &Credential,
        audio: Vec<u8>,
        context: Option<&str>,
    ) -> Result<VoiceReply, ApiError> {
        let part = Part::bytes(audio)
            .file_name("voice.webm")
            .mime_str("audio/webm")
            .map_err(|err| {
                warn!(error = %err, "invalid audio mime type");
                ApiError::from(err)
            })?;
        let mut form = Form::new().part("audio", part);
        if let Some(context) = context {
            form = form.text("context", context.to_string());
        }
        let response: VoiceResponse = self
            .send(self.post("/bro/voice", Some(credential)).multipart(form))
            .await?;
        Ok(response.into())
    }

    async fn history(&self, credential: &Credential) -> Result<Vec<ChatHistoryEntry>, ApiError> {
        let response: HistoryResponse = self.send(self.get("/bro/history", credential)).await?;
        Ok(response
            .history
            .into_iter()
            .map(ChatHistoryEntry::from)
            .collect())
    }
}

fn resume_body(draft: &ResumeDraft) -> ResumeRequest<'_> {
    ResumeRequest {
        company: &draft.company,
        content: &draft.content,
        template: &draft.template,
    }
}

#[async_trait]
impl ResumeApi for HttpApi {
    async fn resume_templates(
        &self,
        credential: &Credential,
    ) -> Result<Vec<ResumeTemplate>, ApiError> {
        let response: TemplatesResponse =
            self.send(self.get("/resume/templates", credential)).await?;
        Ok(response.into())
    }

    async fn saved_resumes(&self, credential: &Credential) -> Result<Vec<SavedResume>, ApiError> {
        let response: ResumeListResponse = self.send(self.get("/resume/list", credential)).await?;
        Ok(response
            .resumes
            .into_iter()
            .map(SavedResume::from)
            .collect())
    }

    async fn analyze_resume(
        &self,
        credential: &Credential,
        draft: &ResumeDraft,
    ) -> Result<String, ApiError> {
        let request = self
            .post("/resume/analyze", Some(credential))
            .json(&resume_body(draft));
        let response: AnalyzeResponse = self.send(request).await?;
        Ok(response.analysis)
    }

    async fn create_resume(
        &self,
        credential: &Credential,
        draft: &ResumeDraft,
    ) -> Result<(), ApiError> {
        let request = self
            .post("/resume/create", Some(credential))
            .json(&resume_body(draft));
        self.send_empty(request).await
    }
}
