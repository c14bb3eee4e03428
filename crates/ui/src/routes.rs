use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};
use prep_core::{AccessDecision, ViewAccess};

use crate::context::AppContext;
use crate::session::use_session;
use crate::views::{
    AnalyticsView, DashboardView, DsaTracksView, LoadingScreen, LoginView, ProfileView,
    ReadinessView, ResumeView, SelectRoleView, TaskView, TrackDetailView,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Guard)]
        #[route("/login", LoginView)] Login {},
        #[route("/select-role", SelectRoleView)] SelectRole {},
        #[layout(Shell)]
            #[route("/dashboard", DashboardView)] Dashboard {},
            #[route("/dsa", DsaTracksView)] DsaTracks {},
            #[route("/dsa/:track_id", TrackDetailView)] TrackDetail { track_id: String },
            #[route("/task/:track_id/:task_id", TaskView)] Task { track_id: String, task_id: String },
            #[route("/analytics", AnalyticsView)] Analytics {},
            #[route("/readiness", ReadinessView)] Readiness {},
            #[route("/profile", ProfileView)] Profile {},
            #[route("/resume", ResumeView)] Resume {},
        #[end_layout]
    #[end_layout]
    #[route("/", ToDashboard)] Root {},
    #[route("/:..segments", UnknownRoute)] NotFound { segments: Vec<String> },
}

impl Route {
    /// Access level a visitor needs before this route renders.
    #[must_use]
    pub fn access(&self) -> ViewAccess {
        match self {
            Route::Login {} | Route::Root {} | Route::NotFound { .. } => ViewAccess::Public,
            Route::SelectRole {} => ViewAccess::AuthenticatedNoRole,
            Route::Dashboard {}
            | Route::DsaTracks {}
            | Route::TrackDetail { .. }
            | Route::Task { .. }
            | Route::Analytics {}
            | Route::Readiness {}
            | Route::Profile {}
            | Route::Resume {} => ViewAccess::Authenticated,
        }
    }
}

/// Consults the session before rendering any guarded route.
#[component]
fn Guard() -> Element {
    let route = use_route::<Route>();
    let session = use_session();

    match session.snapshot().authorize(route.access()) {
        AccessDecision::Allow => rsx! { Outlet::<Route> {} },
        AccessDecision::ShowLoadingIndicator => rsx! { LoadingScreen {} },
        AccessDecision::RedirectToLogin => rsx! { Redirect { to: Route::Login {} } },
        AccessDecision::RedirectToRoleSelection => rsx! { Redirect { to: Route::SelectRole {} } },
        AccessDecision::RedirectToDashboard => rsx! { Redirect { to: Route::Dashboard {} } },
    }
}

/// Replaces the current history entry with `to` once mounted.
#[component]
pub fn Redirect(to: Route) -> Element {
    let navigator = use_navigator();
    use_effect(move || {
        navigator.replace(to.clone());
    });
    rsx! { LoadingScreen {} }
}

#[component]
fn ToDashboard() -> Element {
    rsx! { Redirect { to: Route::Dashboard {} } }
}

#[component]
fn UnknownRoute(segments: Vec<String>) -> Element {
    tracing::debug!(path = %segments.join("/"), "unknown route");
    rsx! { Redirect { to: Route::Dashboard {} } }
}

#[component]
fn Shell() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut session = use_session();
    let snapshot = session.snapshot();
    let name = snapshot
        .identity
        .as_ref()
        .map(|identity| identity.name().to_string())
        .unwrap_or_default();

    let on_logout = move |_| {
        let controller = ctx.session();
        spawn(async move {
            controller.logout().await;
            session.sync(&controller);
            navigator.replace(Route::Login {});
        });
    };

    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { class: "brand", "Placement Prep" }
                nav { class: "topnav",
                    Link { to: Route::Dashboard {}, "Dashboard" }
                    Link { to: Route::DsaTracks {}, "DSA" }
                    Link { to: Route::Analytics {}, "Analytics" }
                    Link { to: Route::Readiness {}, "Readiness" }
                    Link { to: Route::Resume {}, "Resume" }
                    Link { to: Route::Profile {}, "Profile" }
                }
                div { class: "topbar-user",
                    span { class: "topbar-name", "{name}" }
                    button { class: "btn btn-ghost", r#type: "button", onclick: on_logout, "Log out" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_maps_to_its_access_level() {
        assert_eq!(Route::Login {}.access(), ViewAccess::Public);
        assert_eq!(Route::SelectRole {}.access(), ViewAccess::AuthenticatedNoRole);
        assert_eq!(Route::Dashboard {}.access(), ViewAccess::Authenticated);
        assert_eq!(Route::Resume {}.access(), ViewAccess::Authenticated);
        assert_eq!(
            Route::Task {
                track_id: "arrays".into(),
                task_id: "arr-001".into()
            }
            .access(),
            ViewAccess::Authenticated
        );
        assert_eq!(
            Route::NotFound {
                segments: vec!["nope".into()]
            }
            .access(),
            ViewAccess::Public
        );
    }

    #[test]
    fn paths_parse_to_routes() {
        assert_eq!("/login".parse::<Route>().ok(), Some(Route::Login {}));
        assert_eq!("/".parse::<Route>().ok(), Some(Route::Root {}));
        assert_eq!("/resume".parse::<Route>().ok(), Some(Route::Resume {}));
        assert_eq!(
            "/dsa/arrays".parse::<Route>().ok(),
            Some(Route::TrackDetail {
                track_id: "arrays".into()
            })
        );
        assert!(matches!(
            "/somewhere/else".parse::<Route>(),
            Ok(Route::NotFound { .. })
        ));
    }

    #[test]
    fn routes_render_their_paths() {
        assert_eq!(
            Route::Task {
                track_id: "arrays".into(),
                task_id: "arr-001".into()
            }
            .to_string(),
            "/task/arrays/arr-001"
        );
        assert_eq!(Route::SelectRole {}.to_string(), "/select-role");
    }
}
