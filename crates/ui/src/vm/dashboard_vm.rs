use prep_core::model::Identity;
use services::DashboardSummary;

use super::track_vm::{TrackCardVm, map_track_cards};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub role_label: String,
    pub points: u32,
    pub streak: u32,
    pub level_label: &'static str,
    pub readiness: u8,
    pub tasks_label: String,
    pub completion: u8,
    pub tracks: Vec<TrackCardVm>,
    pub recommendations: Vec<String>,
}

#[must_use]
pub fn map_dashboard(identity: Option<&Identity>, summary: &DashboardSummary) -> DashboardVm {
    let first_name = identity
        .and_then(|identity| identity.name().split_whitespace().next())
        .unwrap_or("there");
    let role_label = identity
        .and_then(Identity::role)
        .map_or_else(|| "No role selected".to_string(), |role| role.label().to_string());
    let readiness = &summary.readiness.snapshot;

    DashboardVm {
        greeting: format!("Welcome back, {first_name}!"),
        role_label,
        points: identity.map_or(readiness.points, Identity::points),
        streak: identity.map_or(readiness.streak.current, |identity| identity.streak().current),
        level_label: identity.map_or("Beginner", |identity| identity.level().label()),
        readiness: readiness.overall_readiness,
        tasks_label: format!(
            "{}/{} tasks completed",
            summary.dsa.completed_tasks, summary.dsa.total_tasks
        ),
        completion: summary.dsa.aggregate_completion,
        tracks: map_track_cards(&summary.dsa.tracks),
        recommendations: readiness.recommendations.iter().take(3).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::{
        IdentityDraft, ReadinessSnapshot, Role, Streak, TrackId, TrackProgress, UserId,
        WeeklyActivity,
    };
    use services::{ReadinessReport, TrackKind, TrackList, TrackOverview};

    fn summary() -> DashboardSummary {
        let track = TrackProgress::new(TrackId::new("arrays"), "Arrays", 4, 1);
        DashboardSummary {
            dsa: TrackList {
                kind: TrackKind::Dsa,
                tracks: vec![TrackOverview::from(track)],
                completed_tasks: 1,
                total_tasks: 4,
                aggregate_completion: 25,
            },
            readiness: ReadinessReport::from(ReadinessSnapshot {
                overall_readiness: 41,
                points: 30,
                recommendations: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                ..ReadinessSnapshot::default()
            }),
        }
    }

    #[test]
    fn signed_in_identity_drives_headline_numbers() {
        let identity = IdentityDraft {
            id: UserId::random(),
            name: "Ravi Kumar".into(),
            email: "ravi@prep.dev".into(),
            role: Some(Role::Sde),
            points: 120,
            level: None,
            streak: Streak::new(3, 3),
            weekly_activity: WeeklyActivity::default(),
        }
        .validate()
        .unwrap();

        let vm = map_dashboard(Some(&identity), &summary());
        assert_eq!(vm.greeting, "Welcome back, Ravi!");
        assert_eq!(vm.points, 120);
        assert_eq!(vm.level_label, "Intermediate");
        assert_eq!(vm.streak, 3);
        assert_eq!(vm.readiness, 41);
        assert_eq!(vm.tasks_label, "1/4 tasks completed");
        assert_eq!(vm.tracks[0].completion, 25);
        assert_eq!(vm.recommendations.len(), 3);
    }

    #[test]
    fn falls_back_to_readiness_without_identity() {
        let vm = map_dashboard(None, &summary());
        assert_eq!(vm.greeting, "Welcome back, there!");
        assert_eq!(vm.points, 30);
        assert_eq!(vm.role_label, "No role selected");
    }
}
