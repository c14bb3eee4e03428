use std::sync::Arc;

use storage::repository::{CredentialStore, Storage};

use crate::Clock;
use crate::api::{
    AccountApi, AuthApi, HttpApi, MentorApi, ProgressApi, RemoteApi, ResumeApi, TaskApi,
};
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::mentor_service::MentorService;
use crate::progress_service::ProgressService;
use crate::resume_service::ResumeService;
use crate::session::SessionController;
use crate::task_service::TaskService;

/// Assembles the session controller and the app-facing services over one API.
#[derive(Clone)]
pub struct AppServices {
    session: Arc<SessionController>,
    progress: Arc<ProgressService>,
    tasks: Arc<TaskService>,
    mentor: Arc<MentorService>,
    resume: Arc<ResumeService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        api_config: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(
            Arc::new(HttpApi::new(api_config)),
            Arc::clone(&storage.credentials),
            clock,
        ))
    }

    /// Build services over any API implementation and credential store.
    #[must_use]
    pub fn new<A>(api: Arc<A>, credentials: Arc<dyn CredentialStore>, clock: Clock) -> Self
    where
        A: RemoteApi + 'static,
    {
        let auth: Arc<dyn AuthApi> = api.clone();
        let account: Arc<dyn AccountApi> = api.clone();
        let progress_api: Arc<dyn ProgressApi> = api.clone();
        let task_api: Arc<dyn TaskApi> = api.clone();
        let mentor_api: Arc<dyn MentorApi> = api.clone();
        let resume_api: Arc<dyn ResumeApi> = api;

        let session = Arc::new(SessionController::new(
            auth,
            Arc::clone(&account),
            credentials,
        ));
        let progress = Arc::new(ProgressService::new(Arc::clone(&session), progress_api));
        let tasks = Arc::new(TaskService::new(Arc::clone(&session), task_api, account));
        let mentor = Arc::new(MentorService::new(clock, Arc::clone(&session), mentor_api));
        let resume = Arc::new(ResumeService::new(Arc::clone(&session), resume_api));

        Self {
            session,
            progress,
            tasks,
            mentor,
            resume,
        }
    }

    #[must_use]
    pub fn session(&self) -> Arc<SessionController> {
        Arc::clone(&self.session)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn tasks(&self) -> Arc<TaskService> {
        Arc::clone(&self.tasks)
    }

    #[must_use]
    pub fn mentor(&self) -> Arc<MentorService> {
        Arc::clone(&self.mentor)
    }

    #[must_use]
    pub fn resume(&self) -> Arc<ResumeService> {
        Arc::clone(&self.resume)
    }
}
