use std::sync::Arc;

use prep_core::model::{ActivityKind, Credential, Identity, RunOutput, SubmissionOutcome, TaskId};
use tracing::{info, warn};

use crate::api::{AccountApi, TaskApi, TaskSubmission};
use crate::error::TaskError;
use crate::session::SessionController;

/// Result of a submission, plus the refreshed identity when points were awarded.
#[derive(Clone, Debug)]
pub struct SubmitReport {
    pub outcome: SubmissionOutcome,
    pub identity: Option<Identity>,
}

#[derive(Clone)]
pub struct TaskService {
    session: Arc<SessionController>,
    tasks: Arc<dyn TaskApi>,
    account: Arc<dyn AccountApi>,
}

impl TaskService {
    #[must_use]
    pub fn new(
        session: Arc<SessionController>,
        tasks: Arc<dyn TaskApi>,
        account: Arc<dyn AccountApi>,
    ) -> Self {
        Self {
            session,
            tasks,
            account,
        }
    }

    fn credential(&self) -> Result<Credential, TaskError> {
        self.session.credential().ok_or(TaskError::NoSession)
    }

    /// Submit a solution (code, or an explanation for concept tasks).
    ///
    /// Counts as a `dsa` activity for the streak. When the server awards points
    /// the session identity is refreshed so totals and level stay current.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::EmptySubmission` when both code and explanation are
    /// blank, `NoSession` when signed out, or `Api` if the submission fails.
    /// Streak and profile refresh failures are logged, not returned.
    pub async fn submit(
        &self,
        task_id: &TaskId,
        code: &str,
        explanation: Option<&str>,
    ) -> Result<SubmitReport, TaskError> {
        let explanation = explanation.map(str::trim).filter(|text| !text.is_empty());
        if code.trim().is_empty() && explanation.is_none() {
            return Err(TaskError::EmptySubmission);
        }
        let credential = self.credential()?;

        let submission = TaskSubmission {
            task_id: task_id.clone(),
            code: code.to_string(),
            explanation: explanation.map(str::to_string),
        };
        let outcome = self.tasks.submit_task(&credential, &submission).await?;
        info!(task = %task_id, points = outcome.points_earned, "task submitted");

        if let Err(err) = self
            .account
            .record_activity(&credential, ActivityKind::Dsa)
            .await
        {
            warn!(error = %err, "could not record streak activity");
        }

        let identity = if outcome.is_first_completion() {
            match self.session.refresh_profile().await {
                Ok(identity) => Some(identity),
                Err(err) => {
                    warn!(error = %err, "could not refresh profile after submission");
                    None
                }
            }
        } else {
            None
        };

        Ok(SubmitReport { outcome, identity })
    }

    /// Run code against the sandboxed runner.
    ///
    /// # Errors
    ///
    /// Returns `TaskError::NoSession` when signed out or `Api` if the request fails.
    pub async fn run(&self, task_id: Option<&TaskId>, code: &str) -> Result<RunOutput, TaskError> {
        let credential = self.credential()?;
        let output = self.tasks.run_code(&credential, code, task_id).await?;
        Ok(output)
    }
}
