use std::sync::Arc;

use prep_core::model::{
    Credential, ReadinessSnapshot, TaskDetail, TaskId, TaskSummary, TrackId, TrackProgress,
    TrendDigest,
};
use prep_core::progression::{
    aggregate_completion, breakdown_fills, completed_task_count, per_track_completion,
    track_is_complete,
};
use tracing::warn;

use crate::api::{ProgressApi, TrackKind};
use crate::error::{ApiError, ProgressError};
use crate::session::SessionController;

/// One track with its derived completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackOverview {
    pub track: TrackProgress,
    pub completion: u8,
    pub complete: bool,
}

impl From<TrackProgress> for TrackOverview {
    fn from(track: TrackProgress) -> Self {
        Self {
            completion: per_track_completion(&track),
            complete: track_is_complete(&track),
            track,
        }
    }
}

/// A family of tracks plus the totals shown above the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackList {
    pub kind: TrackKind,
    pub tracks: Vec<TrackOverview>,
    pub completed_tasks: u64,
    pub total_tasks: u64,
    pub aggregate_completion: u8,
}

impl TrackList {
    fn new(kind: TrackKind, tracks: Vec<TrackProgress>) -> Self {
        let completed_tasks = completed_task_count(&tracks);
        let total_tasks = tracks.iter().map(|t| u64::from(t.total_tasks)).sum();
        let aggregate_completion = aggregate_completion(&tracks);
        Self {
            kind,
            tracks: tracks.into_iter().map(TrackOverview::from).collect(),
            completed_tasks,
            total_tasks,
            aggregate_completion,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// A single track and its tasks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackPage {
    pub overview: TrackOverview,
    pub tasks: Vec<TaskSummary>,
}

/// Readiness snapshot plus breakdown bar fills (DSA, analytics, data science, ML).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadinessReport {
    pub snapshot: ReadinessSnapshot,
    pub breakdown_fills: [u8; 4],
}

impl From<ReadinessSnapshot> for ReadinessReport {
    fn from(snapshot: ReadinessSnapshot) -> Self {
        Self {
            breakdown_fills: breakdown_fills(&snapshot.breakdown),
            snapshot,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardSummary {
    pub dsa: TrackList,
    pub readiness: ReadinessReport,
}

/// Read-only progress views. Failures stay with the calling view.
#[derive(Clone)]
pub struct ProgressService {
    session: Arc<SessionController>,
    api: Arc<dyn ProgressApi>,
}

impl ProgressService {
    #[must_use]
    pub fn new(session: Arc<SessionController>, api: Arc<dyn ProgressApi>) -> Self {
        Self { session, api }
    }

    fn credential(&self) -> Result<Credential, ProgressError> {
        self.session.credential().ok_or(ProgressError::NoSession)
    }

    /// DSA tracks and readiness, fetched together.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if either read fails.
    pub async fn dashboard(&self) -> Result<DashboardSummary, ProgressError> {
        let credential = self.credential()?;
        let tracks = self.api.tracks(&credential, TrackKind::Dsa);
        let readiness = self.api.readiness(&credential);
        let (tracks, readiness) = tokio::join!(tracks, readiness);
        Ok(DashboardSummary {
            dsa: TrackList::new(TrackKind::Dsa, logged(tracks, "dashboard tracks")?),
            readiness: logged(readiness, "dashboard readiness")?.into(),
        })
    }

    /// # Errors
    ///
    /// Returns `ProgressError` if the read fails or nobody is signed in.
    pub async fn tracks(&self, kind: TrackKind) -> Result<TrackList, ProgressError> {
        let credential = self.credential()?;
        let tracks = logged(self.api.tracks(&credential, kind).await, "tracks")?;
        Ok(TrackList::new(kind, tracks))
    }

    /// # Errors
    ///
    /// Returns `ProgressError` if the read fails or nobody is signed in.
    pub async fn track(
        &self,
        kind: TrackKind,
        track_id: &TrackId,
    ) -> Result<TrackPage, ProgressError> {
        let credential = self.credential()?;
        let detail = logged(
            self.api.track_detail(&credential, kind, track_id).await,
            "track detail",
        )?;
        Ok(TrackPage {
            overview: detail.progress.into(),
            tasks: detail.tasks,
        })
    }

    /// # Errors
    ///
    /// Returns `ProgressError` if the read fails or nobody is signed in.
    pub async fn task(
        &self,
        track_id: &TrackId,
        task_id: &TaskId,
    ) -> Result<TaskDetail, ProgressError> {
        let credential = self.credential()?;
        logged(
            self.api.task_detail(&credential, track_id, task_id).await,
            "task detail",
        )
    }

    /// # Errors
    ///
    /// Returns `ProgressError` if the read fails or nobody is signed in.
    pub async fn readiness(&self) -> Result<ReadinessReport, ProgressError> {
        let credential = self.credential()?;
        let snapshot = logged(self.api.readiness(&credential).await, "readiness")?;
        Ok(snapshot.into())
    }

    /// Hiring trends for the dashboard's insights panel.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the read fails or nobody is signed in.
    pub async fn trends(&self) -> Result<TrendDigest, ProgressError> {
        let credential = self.credential()?;
        logged(self.api.job_trends(&credential).await, "job trends")
    }
}

fn logged<T>(result: Result<T, ApiError>, what: &'static str) -> Result<T, ProgressError> {
    result.map_err(|err| {
        warn!(error = %err, what, "progress read failed");
        ProgressError::Api(err)
    })
}
