use serde::{Deserialize, Serialize};

use crate::model::{TaskId, TrackId};

/// Completion counters for one track. Read-only input to the progression calculator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackProgress {
    pub id: TrackId,
    pub name: String,
    pub description: Option<String>,
    pub total_tasks: u32,
    pub completed_tasks: u32,
}

impl TrackProgress {
    #[must_use]
    pub fn new(id: TrackId, name: impl Into<String>, total_tasks: u32, completed_tasks: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            total_tasks,
            completed_tasks,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.completed_tasks > 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Coding,
    Concept,
    Debugging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A task as listed inside a track.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskSummary {
    pub id: TaskId,
    pub title: String,
    pub kind: TaskKind,
    pub difficulty: Option<Difficulty>,
    pub points: u32,
    pub completed: bool,
    pub attempts: u32,
}

/// A track with its task list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackDetail {
    pub progress: TrackProgress,
    pub tasks: Vec<TaskSummary>,
}

/// Full task content shown on the task page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskDetail {
    pub summary: TaskSummary,
    pub description: String,
    pub starter_code: String,
    pub hints: Vec<String>,
    pub solution_explanation: Option<String>,
}

impl TaskDetail {
    /// Hint at `index`, if one remains.
    #[must_use]
    pub fn hint(&self, index: usize) -> Option<&str> {
        self.hints.get(index).map(String::as_str)
    }
}

/// Server verdict for a submitted solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub points_earned: u32,
    pub message: String,
}

impl SubmissionOutcome {
    /// Points are only awarded on the first completion of a task.
    #[must_use]
    pub fn is_first_completion(&self) -> bool {
        self.points_earned > 0
    }
}

/// Result of the sandboxed code runner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    pub success: bool,
    pub output: String,
    pub error: Option<String>,
}

impl RunOutput {
    /// Text to show in the console panel.
    #[must_use]
    pub fn display_text(&self) -> &str {
        if !self.output.is_empty() {
            &self.output
        } else if let Some(error) = self.error.as_deref() {
            error
        } else {
            "No output"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_output_prefers_output_then_error() {
        let mut run = RunOutput {
            success: false,
            output: String::new(),
            error: Some("Security Error".into()),
        };
        assert_eq!(run.display_text(), "Security Error");
        run.error = None;
        assert_eq!(run.display_text(), "No output");
        run.output = "ok".into();
        assert_eq!(run.display_text(), "ok");
    }

    #[test]
    fn hint_out_of_range_is_none() {
        let detail = TaskDetail {
            summary: TaskSummary {
                id: TaskId::new("arr-001"),
                title: "Two Sum".into(),
                kind: TaskKind::Coding,
                difficulty: Some(Difficulty::Easy),
                points: 10,
                completed: false,
                attempts: 0,
            },
            description: String::new(),
            starter_code: String::new(),
            hints: vec!["Try a hash map".into()],
            solution_explanation: None,
        };
        assert_eq!(detail.hint(0), Some("Try a hash map"));
        assert_eq!(detail.hint(1), None);
    }
}
