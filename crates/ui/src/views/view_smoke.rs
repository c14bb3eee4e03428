use prep_core::model::{Role, TaskId};

use super::test_harness::{ViewKind, Visitor, setup_app_router, setup_view_harness};

const ACTIVE: Visitor = Visitor::SignedIn(Some(Role::Sde));

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Login, Visitor::Anonymous).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Welcome back"), "missing title in {html}");
    assert!(html.contains("Email"), "missing email field in {html}");
    assert!(html.contains("Password"), "missing password field in {html}");
    assert!(html.contains("Log in"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn select_role_view_smoke_lists_every_role() {
    let mut harness = setup_view_harness(ViewKind::SelectRole, Visitor::SignedIn(None)).await;
    harness.rebuild();
    let html = harness.render();
    for role in Role::ALL {
        assert!(html.contains(role.label()), "missing {} in {html}", role.label());
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_renders_progress_numbers() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, ACTIVE).await;
    harness
        .services
        .tasks()
        .submit(&TaskId::new("arr-001"), "def two_sum(nums, target): ...", None)
        .await
        .expect("submit");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Welcome back, Asha!"), "missing greeting in {html}");
    assert!(html.contains("1/3 tasks completed"), "missing totals in {html}");
    assert!(html.contains("33% complete"), "missing aggregate in {html}");
    assert!(html.contains("Arrays"), "missing track card in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_offers_retry_when_reads_fail() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, ACTIVE).await;
    harness.api.set_failing_reads(true).expect("fail reads");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Retry"), "missing retry control in {html}");
    assert!(
        html.contains("Something went wrong"),
        "missing error message in {html}"
    );
    // The failure stays on the page; the session is untouched.
    assert!(harness.services.session().snapshot().identity.is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn analytics_view_smoke_lists_tracks() {
    let mut harness = setup_view_harness(ViewKind::Analytics, ACTIVE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Analytics Tracks"), "missing title in {html}");
    assert!(html.contains("SQL Basics"), "missing track in {html}");
    assert!(html.contains("0/1 tasks"), "missing counts in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn track_detail_view_smoke_lists_tasks() {
    let mut harness = setup_view_harness(ViewKind::TrackDetail("arrays"), ACTIVE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Two Sum"), "missing task in {html}");
    assert!(html.contains("Maximum Subarray"), "missing task in {html}");
    assert!(html.contains("+10 pts"), "missing points in {html}");
    assert!(html.contains("Concept"), "missing kind chip in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn track_detail_view_smoke_reports_unknown_track() {
    let mut harness = setup_view_harness(ViewKind::TrackDetail("graphs"), ACTIVE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("find that"), "missing not-found message in {html}");
    assert!(html.contains("Retry"), "missing retry control in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn task_view_smoke_renders_workspace_and_mentor() {
    let mut harness = setup_view_harness(ViewKind::Task("arrays", "arr-001"), ACTIVE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Two Sum"), "missing title in {html}");
    assert!(html.contains("def two_sum"), "missing starter code in {html}");
    assert!(html.contains("Run"), "missing run button in {html}");
    assert!(html.contains("Submit"), "missing submit button in {html}");
    assert!(html.contains("Show a hint"), "missing hint control in {html}");
    assert!(html.contains("Ask your mentor"), "missing mentor panel in {html}");
    assert!(html.contains("Nice choice!"), "missing greeting in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn readiness_view_smoke_renders_breakdown() {
    let mut harness = setup_view_harness(ViewKind::Readiness, ACTIVE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Interview readiness"), "missing title in {html}");
    assert!(html.contains("Target role: SDE"), "missing role in {html}");
    assert!(html.contains("0/20"), "missing dsa breakdown in {html}");
    assert!(html.contains("Machine Learning"), "missing ml row in {html}");
    assert!(
        html.contains("Practice daily to grow your streak."),
        "missing recommendation in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_identity() {
    let mut harness = setup_view_harness(ViewKind::Profile, ACTIVE).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Asha Rao"), "missing name in {html}");
    assert!(html.contains("asha@iitb.ac.in"), "missing email in {html}");
    assert!(html.contains("Beginner"), "missing level in {html}");
    assert!(html.contains("100 pts to next level"), "missing next level in {html}");
    assert!(html.contains("DSA practice"), "missing weekly activity in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn resume_view_smoke_opens_on_google() {
    let mut harness = setup_view_harness(ViewKind::Resume, ACTIVE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Resume Builder"), "missing title in {html}");
    assert!(html.contains("Google"), "missing company in {html}");
    assert!(html.contains("Tips for Google"), "missing tips panel in {html}");
    assert!(html.contains("Analyze with AI"), "missing analyze in {html}");
    assert!(html.contains("Save Resume"), "missing save in {html}");
    assert!(!html.contains("Saved Resumes"), "nothing saved yet in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_shows_trends_for_the_role() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, ACTIVE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Job Market Insights"), "missing trends in {html}");
    assert!(
        html.contains("Trends relevant to your SDE journey"),
        "missing role subtitle in {html}"
    );
    assert!(html.contains("Build resume"), "missing resume link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_view_smoke_hides_trends_when_reads_fail() {
    let mut harness = setup_view_harness(ViewKind::Dashboard, ACTIVE).await;
    harness.api.set_failing_reads(true).expect("fail reads");
    harness.settle().await;
    let html = harness.render();
    assert!(!html.contains("Job Market Insights"), "trends shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_holds_protected_routes_while_session_restores() {
    let mut harness = setup_app_router("/dashboard", Visitor::Restoring).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Loading..."), "missing loading screen in {html}");
    assert!(!html.contains("Placement Prep"), "shell rendered in {html}");
    assert!(!html.contains("tasks completed"), "dashboard rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_sends_anonymous_visitors_to_login() {
    let mut harness = setup_app_router("/dashboard", Visitor::Anonymous).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Loading..."), "missing redirect placeholder in {html}");
    assert!(!html.contains("Placement Prep"), "shell rendered in {html}");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Log in"), "not redirected to login: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_sends_users_with_a_role_past_role_selection() {
    let mut harness = setup_app_router("/select-role", ACTIVE).await;
    harness.rebuild();
    let html = harness.render();
    assert!(
        !html.contains("Choose your target role"),
        "role picker rendered in {html}"
    );
    assert!(html.contains("Loading..."), "missing redirect placeholder in {html}");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Placement Prep"), "not redirected to dashboard: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guard_renders_the_shell_for_active_users() {
    let mut harness = setup_app_router("/dashboard", ACTIVE).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Placement Prep"), "missing shell in {html}");
    assert!(html.contains("Welcome back, Asha!"), "missing dashboard in {html}");
}
