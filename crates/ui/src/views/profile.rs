use dioxus::prelude::*;

use crate::session::use_session;
use crate::views::LoadingScreen;
use crate::vm::map_profile;

/// Reads the signed-in identity straight from the session; no fetch needed.
#[component]
pub fn ProfileView() -> Element {
    let session = use_session();
    let snapshot = session.snapshot();
    let Some(identity) = snapshot.identity.as_ref() else {
        return rsx! { LoadingScreen {} };
    };
    let vm = map_profile(identity);

    rsx! {
        div { class: "page profile",
            section { class: "profile-card",
                div { class: "avatar", "{vm.initials}" }
                div {
                    h2 { "{vm.name}" }
                    p { class: "muted", "{vm.email}" }
                    span { class: "badge", "{vm.role_label}" }
                }
            }

            section { class: "stat-grid",
                div { class: "stat",
                    span { class: "stat-value", "{vm.points}" }
                    span { class: "stat-label", "Points" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{vm.level_label}" }
                    span { class: "stat-label", "Level" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{vm.streak_current}" }
                    span { class: "stat-label", "Current streak" }
                }
                div { class: "stat",
                    span { class: "stat-value", "{vm.streak_longest}" }
                    span { class: "stat-label", "Longest streak" }
                }
            }

            section { class: "panel",
                div { class: "panel-header",
                    h3 { "Level progress" }
                    if let Some(next) = vm.next_level_label.as_deref() {
                        span { class: "muted", "{next}" }
                    }
                }
                for bar in vm.level_bars {
                    div {
                        key: "{bar.label}",
                        class: if bar.current { "level-row current" } else { "level-row" },
                        span { class: "level-label", "{bar.label}" }
                        div { class: "progress-bar",
                            div { class: "progress-fill", style: "width: {bar.fill}%" }
                        }
                        span { class: "muted", "{bar.range_label}" }
                    }
                }
            }

            section { class: "panel",
                div { class: "panel-header",
                    h3 { "This week" }
                    span { class: "muted", "{vm.weekly_total} activities" }
                }
                ul { class: "activity-list",
                    for activity in vm.weekly {
                        li { key: "{activity.label}",
                            span { "{activity.label}" }
                            span { class: "activity-count", "{activity.count}" }
                        }
                    }
                }
            }
        }
    }
}
