use dioxus::prelude::*;
use dioxus_router::Link;
use services::{TrackKind, TrackList};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ErrorPanel, LoadingScreen, ViewError, ViewState, view_state_from_resource};
use crate::vm::{TrackCardVm, map_track_cards};

#[derive(Clone, Debug, PartialEq)]
struct TracksData {
    title: &'static str,
    summary: String,
    completion: u8,
    cards: Vec<TrackCardVm>,
}

impl From<TrackList> for TracksData {
    fn from(list: TrackList) -> Self {
        Self {
            title: list.kind.title(),
            summary: format!("{}/{} tasks completed", list.completed_tasks, list.total_tasks),
            completion: list.aggregate_completion,
            cards: map_track_cards(&list.tracks),
        }
    }
}

#[component]
pub fn DsaTracksView() -> Element {
    rsx! { TracksView { kind: TrackKind::Dsa } }
}

#[component]
pub fn AnalyticsView() -> Element {
    rsx! { TracksView { kind: TrackKind::Analytics } }
}

#[component]
fn TracksView(kind: TrackKind) -> Element {
    let ctx = use_context::<AppContext>();

    let mut resource = use_resource(move || {
        let progress = ctx.progress();
        async move {
            let list = progress.tracks(kind).await.map_err(ViewError::from)?;
            Ok::<TracksData, ViewError>(list.into())
        }
    });

    let state = view_state_from_resource(&resource);
    let link = kind == TrackKind::Dsa;

    rsx! {
        div { class: "page tracks",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { LoadingScreen {} },
                ViewState::Error(error) => rsx! {
                    h2 { "{kind.title()}" }
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(data) => rsx! {
                    header { class: "page-header",
                        h2 { "{data.title}" }
                        span { class: "muted", "{data.summary}" }
                    }
                    div { class: "progress-bar",
                        div { class: "progress-fill", style: "width: {data.completion}%" }
                    }
                    if data.cards.is_empty() {
                        p { class: "muted", "No tracks available yet." }
                    } else {
                        div { class: "track-grid",
                            for card in data.cards {
                                TrackCard { key: "{card.id}", card, link }
                            }
                        }
                    }
                },
            }
        }
    }
}

/// A track tile; DSA tiles link through to the track's task list.
#[component]
pub(crate) fn TrackCard(card: TrackCardVm, link: bool) -> Element {
    let class = if card.complete { "track-card complete" } else { "track-card" };
    let body = rsx! {
        div { class: "{class}",
            h3 { "{card.name}" }
            if let Some(description) = card.description.as_deref() {
                p { class: "muted", "{description}" }
            }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {card.completion}%" }
            }
            div { class: "track-meta",
                span { "{card.tasks_label}" }
                span { "{card.completion}%" }
            }
        }
    };

    if link {
        rsx! {
            Link {
                class: "track-link",
                to: Route::TrackDetail { track_id: card.id.clone() },
                {body}
            }
        }
    } else {
        body
    }
}
