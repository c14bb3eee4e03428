use dioxus::prelude::*;
use dioxus_router::Link;
use prep_core::model::TrackId;
use services::{TrackKind, TrackPage};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorPanel, LoadingScreen, ViewError, ViewState, view_state_from_resource};
use crate::vm::{TaskRowVm, TrackCardVm, map_task_row, map_track_card};

#[derive(Clone, Debug, PartialEq)]
struct TrackDetailData {
    card: TrackCardVm,
    rows: Vec<TaskRowVm>,
}

impl From<TrackPage> for TrackDetailData {
    fn from(page: TrackPage) -> Self {
        Self {
            card: map_track_card(&page.overview),
            rows: page.tasks.iter().map(map_task_row).collect(),
        }
    }
}

#[component]
pub fn TrackDetailView(track_id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let id = TrackId::new(track_id.clone());

    let mut resource = use_resource(move || {
        let progress = ctx.progress();
        let id = id.clone();
        async move {
            let page = progress
                .track(TrackKind::Dsa, &id)
                .await
                .map_err(ViewError::from)?;
            Ok::<TrackDetailData, ViewError>(page.into())
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page track-detail",
            Link { class: "back-link", to: Route::DsaTracks {}, "Back to tracks" }

            match state {
                ViewState::Idle | ViewState::Loading => rsx! { LoadingScreen {} },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    header { class: "page-header",
                        h2 { "{data.card.name}" }
                        span { class: "muted", "{data.card.tasks_label}" }
                    }
                    if let Some(description) = data.card.description.as_deref() {
                        p { class: "muted", "{description}" }
                    }
                    div { class: "progress-bar",
                        div { class: "progress-fill", style: "width: {data.card.completion}%" }
                    }

                    if data.rows.is_empty() {
                        p { class: "muted", "This track has no tasks yet." }
                    } else {
                        ul { class: "task-list",
                            for row in data.rows {
                                TaskRow { key: "{row.id}", track_id: track_id.clone(), row }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn TaskRow(track_id: String, row: TaskRowVm) -> Element {
    let class = if row.completed { "task-row done" } else { "task-row" };
    rsx! {
        li { class: "{class}",
            Link {
                to: Route::Task { track_id, task_id: row.id.clone() },
                span { class: "task-status", if row.completed { "✓" } else { "○" } }
                span { class: "task-title", "{row.title}" }
            }
            span { class: "chip", "{row.kind_label}" }
            if let Some(difficulty) = row.difficulty {
                span { class: "chip", "{difficulty}" }
            }
            span { class: "task-points", "{row.points_label}" }
            if let Some(attempts) = row.attempts_label.as_deref() {
                span { class: "muted", "{attempts}" }
            }
        }
    }
}
