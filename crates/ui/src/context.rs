use std::sync::Arc;

use services::{
    AppServices, MentorService, ProgressService, ResumeService, SessionController, TaskService,
};

pub trait UiApp: Send + Sync {
    fn session(&self) -> Arc<SessionController>;
    fn progress(&self) -> Arc<ProgressService>;
    fn tasks(&self) -> Arc<TaskService>;
    fn mentor(&self) -> Arc<MentorService>;
    fn resume(&self) -> Arc<ResumeService>;
}

impl UiApp for AppServices {
    fn session(&self) -> Arc<SessionController> {
        AppServices::session(self)
    }

    fn progress(&self) -> Arc<ProgressService> {
        AppServices::progress(self)
    }

    fn tasks(&self) -> Arc<TaskService> {
        AppServices::tasks(self)
    }

    fn mentor(&self) -> Arc<MentorService> {
        AppServices::mentor(self)
    }

    fn resume(&self) -> Arc<ResumeService> {
        AppServices::resume(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    session: Arc<SessionController>,
    progress: Arc<ProgressService>,
    tasks: Arc<TaskService>,
    mentor: Arc<MentorService>,
    resume: Arc<ResumeService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            session: app.session(),
            progress: app.progress(),
            tasks: app.tasks(),
            mentor: app.mentor(),
            resume: app.resume(),
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
