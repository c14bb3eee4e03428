use std::sync::Arc;

use prep_core::model::{DEFAULT_RESUME_COMPANY, ResumeContent, Role};
use prep_core::time::fixed_clock;
use services::{
    AppServices, InMemoryApi, LoginCredentials, ProgressError, ResumeDraft, ResumeError,
};
use storage::InMemoryRepository;

const EMAIL: &str = "asha@iitb.ac.in";
const PASSWORD: &str = "hunter22";

async fn signed_in(role: Option<Role>) -> (InMemoryApi, AppServices) {
    let api = InMemoryApi::new();
    api.seed_account("Asha Rao", EMAIL, PASSWORD, role).unwrap();
    let services = AppServices::new(
        Arc::new(api.clone()),
        Arc::new(InMemoryRepository::new()),
        fixed_clock(),
    );
    let session = services.session();
    session.restore_session().await;
    session
        .login(&LoginCredentials {
            email: EMAIL.into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();
    (api, services)
}

fn draft() -> ResumeDraft {
    ResumeDraft::new(
        DEFAULT_RESUME_COMPANY,
        ResumeContent {
            name: "Asha Rao".into(),
            email: EMAIL.into(),
            skills: "Python, SQL, Rust".into(),
            projects: "Placement tracker, 2k users".into(),
            ..ResumeContent::default()
        },
    )
}

#[tokio::test]
async fn workspace_lists_templates_and_nothing_saved_yet() {
    let (_api, services) = signed_in(Some(Role::Sde)).await;
    let workspace = services.resume().workspace().await.unwrap();

    let google = workspace.template(DEFAULT_RESUME_COMPANY).unwrap();
    assert_eq!(google.name, "Google");
    assert!(!google.focus.is_empty());
    assert!(!google.tips.is_empty());
    assert!(workspace.saved.is_empty());
}

#[tokio::test]
async fn analysis_names_the_company_and_missing_sections() {
    let (_api, services) = signed_in(Some(Role::Sde)).await;
    let analysis = services.resume().analyze(&draft()).await.unwrap();
    assert!(analysis.contains("Google"), "{analysis}");
    assert!(analysis.contains("education"), "{analysis}");
    assert!(!analysis.contains("skills"), "{analysis}");
}

#[tokio::test]
async fn saving_returns_the_refreshed_list() {
    let (_api, services) = signed_in(Some(Role::Sde)).await;
    let resume = services.resume();

    let saved = resume.save(&draft()).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].company, DEFAULT_RESUME_COMPANY);
    assert_eq!(saved[0].template, "modern");

    let workspace = resume.workspace().await.unwrap();
    assert_eq!(workspace.saved, saved);
}

#[tokio::test]
async fn blank_resume_is_refused_before_any_request() {
    let (api, services) = signed_in(Some(Role::Sde)).await;
    api.set_offline(true).unwrap();
    let blank = ResumeDraft::new(DEFAULT_RESUME_COMPANY, ResumeContent::default());

    assert!(matches!(
        services.resume().analyze(&blank).await,
        Err(ResumeError::EmptyResume)
    ));
    assert!(matches!(
        services.resume().save(&ResumeDraft::new(" ", draft().content)).await,
        Err(ResumeError::NoCompany)
    ));
}

#[tokio::test]
async fn failed_analysis_keeps_the_session() {
    let (api, services) = signed_in(Some(Role::Sde)).await;
    api.set_mentor_down(true).unwrap();

    assert!(matches!(
        services.resume().analyze(&draft()).await,
        Err(ResumeError::Api(_))
    ));
    assert!(services.session().snapshot().identity.is_some());
}

#[tokio::test]
async fn resume_needs_a_session() {
    let (_api, services) = signed_in(Some(Role::Sde)).await;
    services.session().logout().await;
    assert!(matches!(
        services.resume().workspace().await,
        Err(ResumeError::NoSession)
    ));
}

#[tokio::test]
async fn trends_are_picked_for_the_role() {
    let (_api, services) = signed_in(Some(Role::MlEngineer)).await;
    let digest = services.progress().trends().await.unwrap();
    assert_eq!(digest.user_role.as_deref(), Some("ML Engineer"));
    assert!(digest.trends.iter().any(|trend| trend.id == "ml-ops"));
}

#[tokio::test]
async fn trends_failure_stays_with_the_caller() {
    let (api, services) = signed_in(Some(Role::Sde)).await;
    api.set_failing_reads(true).unwrap();
    assert!(matches!(
        services.progress().trends().await,
        Err(ProgressError::Api(_))
    ));
    assert!(services.session().snapshot().identity.is_some());
}
