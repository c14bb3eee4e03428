use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_history::{History, MemoryHistory};
use dioxus_router::{Routable, Router};
use prep_core::model::Role;
use prep_core::time::fixed_clock;
use services::{AppServices, InMemoryApi, LoginCredentials};
use storage::InMemoryRepository;

use crate::context::{UiApp, build_app_context};
use crate::routes::Route;
use crate::session::use_session_provider;
use crate::views::{
    AnalyticsView, DashboardView, DsaTracksView, LoginView, ProfileView, ReadinessView,
    ResumeView, SelectRoleView, TaskView, TrackDetailView,
};

pub const EMAIL: &str = "asha@iitb.ac.in";
pub const PASSWORD: &str = "hunter22";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    SelectRole,
    Dashboard,
    DsaTracks,
    Analytics,
    TrackDetail(&'static str),
    Task(&'static str, &'static str),
    Readiness,
    Profile,
    Resume,
}

/// Who is at the keyboard when the view first renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visitor {
    /// Session restoration has not finished yet.
    Restoring,
    Anonymous,
    SignedIn(Option<Role>),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let controller = props.app.session();
    use_context_provider(|| build_app_context(&app));
    use_session_provider(|| controller.snapshot());
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::SelectRole => rsx! { SelectRoleView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::DsaTracks => rsx! { DsaTracksView {} },
        ViewKind::Analytics => rsx! { AnalyticsView {} },
        ViewKind::TrackDetail(track_id) => rsx! {
            TrackDetailView { track_id: track_id.to_string() }
        },
        ViewKind::Task(track_id, task_id) => rsx! {
            TaskView { track_id: track_id.to_string(), task_id: task_id.to_string() }
        },
        ViewKind::Readiness => rsx! { ReadinessView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Resume => rsx! { ResumeView {} },
    }
}

#[derive(Props, Clone)]
struct AppRouterProps {
    app: Arc<AppServices>,
    path: &'static str,
}

impl PartialEq for AppRouterProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

/// The real route table, guard included, opened at `path`.
#[component]
fn AppRouterHarness(props: AppRouterProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let controller = props.app.session();
    use_context_provider(|| build_app_context(&app));
    use_session_provider(|| controller.snapshot());
    use_context_provider(|| Rc::new(MemoryHistory::with_initial_path(props.path)) as Rc<dyn History>);
    rsx! { Router::<Route> {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: InMemoryApi,
    pub services: Arc<AppServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

async fn signed_services(visitor: Visitor) -> (InMemoryApi, Arc<AppServices>) {
    let api = InMemoryApi::new();
    let role = match visitor {
        Visitor::Restoring | Visitor::Anonymous => None,
        Visitor::SignedIn(role) => role,
    };
    api.seed_account("Asha Rao", EMAIL, PASSWORD, role)
        .expect("seed account");

    let services = Arc::new(AppServices::new(
        Arc::new(api.clone()),
        Arc::new(InMemoryRepository::new()),
        fixed_clock(),
    ));
    let session = services.session();
    if visitor == Visitor::Restoring {
        return (api, services);
    }
    session.restore_session().await;
    if let Visitor::SignedIn(_) = visitor {
        session
            .login(&LoginCredentials {
                email: EMAIL.into(),
                password: PASSWORD.into(),
            })
            .await
            .expect("login");
    }
    (api, services)
}

pub async fn setup_view_harness(view: ViewKind, visitor: Visitor) -> ViewHarness {
    let (api, services) = signed_services(visitor).await;
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&services),
            view,
        },
    );

    ViewHarness { dom, api, services }
}

/// Opens the application router at `path` as `visitor`.
pub async fn setup_app_router(path: &'static str, visitor: Visitor) -> ViewHarness {
    let (api, services) = signed_services(visitor).await;
    let dom = VirtualDom::new_with_props(
        AppRouterHarness,
        AppRouterProps {
            app: Arc::clone(&services),
            path,
        },
    );
    ViewHarness { dom, api, services }
}
