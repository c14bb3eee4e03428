use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ErrorPanel, LoadingScreen, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ReadinessVm, map_readiness};

#[component]
pub fn ReadinessView() -> Element {
    let ctx = use_context::<AppContext>();

    let mut resource = use_resource(move || {
        let progress = ctx.progress();
        async move {
            let report = progress.readiness().await.map_err(ViewError::from)?;
            Ok::<ReadinessVm, ViewError>(map_readiness(&report))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page readiness",
            h2 { "Interview readiness" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! { LoadingScreen {} },
                ViewState::Error(error) => rsx! {
                    ErrorPanel { error, on_retry: move |()| resource.restart() }
                },
                ViewState::Ready(vm) => rsx! {
                    section { class: "readiness-hero",
                        div { class: "score-ring",
                            span { class: "score-value", "{vm.overall}%" }
                            span { class: "score-label", "{vm.verdict}" }
                        }
                        div { class: "score-parts",
                            p { "Target role: {vm.role_label}" }
                            p { "Skill score: {vm.skill}%" }
                            p { "Consistency: {vm.consistency}%" }
                            p { "{vm.points} points · {vm.streak} day streak" }
                        }
                    }

                    section { class: "panel",
                        h3 { "Breakdown" }
                        for bar in vm.bars {
                            div { key: "{bar.label}", class: "breakdown-row",
                                span { class: "breakdown-label", "{bar.label}" }
                                div { class: "progress-bar",
                                    div { class: "progress-fill", style: "width: {bar.fill}%" }
                                }
                                span { class: "breakdown-count", "{bar.count_label}" }
                            }
                        }
                    }

                    section { class: "panel",
                        h3 { "Recommendations" }
                        if vm.recommendations.is_empty() {
                            p { class: "muted", "Nothing to add. Keep up the streak!" }
                        } else {
                            ul { class: "recommendations",
                                for item in vm.recommendations {
                                    li { "{item}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
