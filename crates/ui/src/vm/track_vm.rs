use prep_core::model::{TaskKind, TaskSummary};
use services::TrackOverview;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackCardVm {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub completion: u8,
    pub tasks_label: String,
    pub complete: bool,
}

#[must_use]
pub fn map_track_card(overview: &TrackOverview) -> TrackCardVm {
    let track = &overview.track;
    TrackCardVm {
        id: track.id.as_str().to_string(),
        name: track.name.clone(),
        description: track.description.clone(),
        completion: overview.completion,
        tasks_label: format!("{}/{} tasks", track.completed_tasks, track.total_tasks),
        complete: overview.complete,
    }
}

#[must_use]
pub fn map_track_cards(tracks: &[TrackOverview]) -> Vec<TrackCardVm> {
    tracks.iter().map(map_track_card).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskRowVm {
    pub id: String,
    pub title: String,
    pub kind_label: &'static str,
    pub difficulty: Option<&'static str>,
    pub points_label: String,
    pub completed: bool,
    pub attempts_label: Option<String>,
}

#[must_use]
pub fn kind_label(kind: TaskKind) -> &'static str {
    match kind {
        TaskKind::Coding => "Coding",
        TaskKind::Concept => "Concept",
        TaskKind::Debugging => "Debugging",
    }
}

#[must_use]
pub fn map_task_row(task: &TaskSummary) -> TaskRowVm {
    let attempts_label = match task.attempts {
        0 => None,
        1 => Some("1 attempt".to_string()),
        n => Some(format!("{n} attempts")),
    };
    TaskRowVm {
        id: task.id.as_str().to_string(),
        title: task.title.clone(),
        kind_label: kind_label(task.kind),
        difficulty: task.difficulty.map(|d| d.label()),
        points_label: format!("+{} pts", task.points),
        completed: task.completed,
        attempts_label,
    }
}
