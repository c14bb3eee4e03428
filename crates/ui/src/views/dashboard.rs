use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::session::use_session;
use crate::views::tracks::TrackCard;
use crate::views::{ErrorPanel, LoadingScreen, ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, TrendsVm, map_dashboard, map_trends};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let session = use_session();

    let mut resource = use_resource(move || {
        let progress = ctx.progress();
        async move {
            let summary = progress.dashboard().await.map_err(ViewError::from)?;
            let snapshot = session.snapshot();
            Ok::<DashboardVm, ViewError>(map_dashboard(snapshot.identity.as_ref(), &summary))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { LoadingScreen {} },
                ViewState::Error(error) => rsx! {
                    h2 { "Dashboard" }
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(vm) => rsx! { DashboardBody { vm } },
            }

            TrendsPanel {}
        }
    }
}

/// Job-market insights for the user's role. Hidden when the read fails or
/// nothing is relevant, and once dismissed.
#[component]
fn TrendsPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let mut dismissed = use_signal(|| false);

    let resource = use_resource(move || {
        let progress = ctx.progress();
        async move {
            progress
                .trends()
                .await
                .map(|digest| map_trends(&digest))
                .map_err(ViewError::from)
        }
    });

    let trends: Option<TrendsVm> = match view_state_from_resource(&resource) {
        ViewState::Ready(trends) => trends,
        _ => None,
    };
    let Some(trends) = trends else {
        return rsx! {};
    };
    if dismissed() {
        return rsx! {};
    }

    rsx! {
        section { class: "panel trends",
            div { class: "panel-header",
                h3 { "Job Market Insights" }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| dismissed.set(true),
                    "Close"
                }
            }
            p { class: "muted", "{trends.subtitle}" }
            for card in trends.cards {
                div { key: "{card.id}", class: "trend",
                    h4 { "{card.title}" }
                    p { class: "muted", "{card.description}" }
                    div { class: "chip-row",
                        for skill in card.skills {
                            span { key: "{skill}", class: "chip", "{skill}" }
                        }
                    }
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| dismissed.set(true),
                "Got it, let's practice!"
            }
        }
    }
}

#[component]
fn DashboardBody(vm: DashboardVm) -> Element {
    rsx! {
        header { class: "page-header",
            h2 { "{vm.greeting}" }
            span { class: "badge", "{vm.role_label}" }
        }

        section { class: "stat-grid",
            Stat { label: "Points", value: vm.points.to_string() }
            Stat { label: "Level", value: vm.level_label.to_string() }
            Stat { label: "Day streak", value: vm.streak.to_string() }
            Stat { label: "Readiness", value: format!("{}%", vm.readiness) }
        }

        section { class: "panel",
            div { class: "panel-header",
                h3 { "DSA progress" }
                span { class: "muted", "{vm.tasks_label}" }
            }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {vm.completion}%" }
            }
            span { class: "progress-label", "{vm.completion}% complete" }

            if vm.tracks.is_empty() {
                p { class: "muted", "No tracks available yet." }
            } else {
                div { class: "track-grid",
                    for card in vm.tracks {
                        TrackCard { key: "{card.id}", card, link: true }
                    }
                }
            }
        }

        section { class: "panel",
            div { class: "panel-header",
                h3 { "Resume Builder" }
                Link { to: Route::Resume {}, "Build resume" }
            }
            p { class: "muted", "Company-specific ATS resumes" }
        }

        if !vm.recommendations.is_empty() {
            section { class: "panel",
                div { class: "panel-header",
                    h3 { "Next steps" }
                    Link { to: Route::Readiness {}, "View readiness" }
                }
                ul { class: "recommendations",
                    for item in vm.recommendations {
                        li { "{item}" }
                    }
                }
            }
        }
    }
}

#[component]
fn Stat(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}
