use std::sync::Arc;

use prep_core::model::{Credential, ResumeTemplate, SavedResume};
use tracing::{info, warn};

use crate::api::{ResumeApi, ResumeDraft};
use crate::error::{ApiError, ResumeError};
use crate::session::SessionController;

/// Everything the builder shows when it opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeWorkspace {
    pub templates: Vec<ResumeTemplate>,
    pub saved: Vec<SavedResume>,
}

impl ResumeWorkspace {
    #[must_use]
    pub fn template(&self, key: &str) -> Option<&ResumeTemplate> {
        self.templates.iter().find(|template| template.key == key)
    }
}

/// Company-targeted resume drafting, AI review and saving.
#[derive(Clone)]
pub struct ResumeService {
    session: Arc<SessionController>,
    api: Arc<dyn ResumeApi>,
}

impl ResumeService {
    #[must_use]
    pub fn new(session: Arc<SessionController>, api: Arc<dyn ResumeApi>) -> Self {
        Self { session, api }
    }

    fn credential(&self) -> Result<Credential, ResumeError> {
        self.session.credential().ok_or(ResumeError::NoSession)
    }

    fn check_draft(draft: &ResumeDraft) -> Result<(), ResumeError> {
        if draft.company.trim().is_empty() {
            return Err(ResumeError::NoCompany);
        }
        if draft.content.is_blank() {
            return Err(ResumeError::EmptyResume);
        }
        Ok(())
    }

    /// Templates and saved resumes, fetched together.
    ///
    /// # Errors
    ///
    /// Returns `ResumeError` if either read fails or nobody is signed in.
    pub async fn workspace(&self) -> Result<ResumeWorkspace, ResumeError> {
        let credential = self.credential()?;
        let templates = self.api.resume_templates(&credential);
        let saved = self.api.saved_resumes(&credential);
        let (templates, saved) = tokio::join!(templates, saved);
        Ok(ResumeWorkspace {
            templates: logged(templates, "resume templates")?,
            saved: logged(saved, "saved resumes")?,
        })
    }

    /// AI feedback on a draft for its target company.
    ///
    /// # Errors
    ///
    /// Returns `ResumeError::EmptyResume` or `NoCompany` before any request,
    /// `NoSession` when signed out, or `Api` if the analysis fails.
    pub async fn analyze(&self, draft: &ResumeDraft) -> Result<String, ResumeError> {
        Self::check_draft(draft)?;
        let credential = self.credential()?;
        logged(
            self.api.analyze_resume(&credential, draft).await,
            "resume analysis",
        )
    }

    /// Save a draft and return the refreshed list of saved resumes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::analyze`]. A failure to re-list after a successful save
    /// is also returned, as the save itself cannot be confirmed to the caller.
    pub async fn save(&self, draft: &ResumeDraft) -> Result<Vec<SavedResume>, ResumeError> {
        Self::check_draft(draft)?;
        let credential = self.credential()?;
        logged(
            self.api.create_resume(&credential, draft).await,
            "resume save",
        )?;
        info!(company = %draft.company, "resume saved");
        logged(self.api.saved_resumes(&credential).await, "saved resumes")
    }
}

fn logged<T>(result: Result<T, ApiError>, what: &'static str) -> Result<T, ResumeError> {
    result.map_err(|err| {
        warn!(error = %err, what, "resume request failed");
        ResumeError::Api(err)
    })
}
