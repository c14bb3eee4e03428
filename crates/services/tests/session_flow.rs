use std::sync::Arc;

use async_trait::async_trait;
use prep_core::model::{Credential, Identity, Role};
use prep_core::{AccessDecision, AccessState, ViewAccess};
use services::{
    ApiError, AuthApi, AuthError, AuthGrant, InMemoryApi, LoginCredentials, Registration,
    RoleAssignmentError, SessionController,
};
use storage::{CredentialStore, InMemoryRepository, StorageError};
use tokio::sync::Notify;

const PASSWORD: &str = "hunter22";

fn seeded(role: Option<Role>) -> InMemoryApi {
    let api = InMemoryApi::new();
    api.seed_account("Asha Rao", "asha@iitb.ac.in", PASSWORD, role)
        .unwrap();
    api
}

fn credentials(email: &str) -> LoginCredentials {
    LoginCredentials {
        email: email.into(),
        password: PASSWORD.into(),
    }
}

fn controller(api: &InMemoryApi, store: &InMemoryRepository) -> Arc<SessionController> {
    Arc::new(SessionController::new(
        Arc::new(api.clone()),
        Arc::new(api.clone()),
        Arc::new(store.clone()),
    ))
}

/// Auth stub whose `login` parks until the test releases it.
struct GatedAuth {
    inner: InMemoryApi,
    entered: Arc<Notify>,
    release: Arc<Notify>,
    gated_email: String,
}

#[async_trait]
impl AuthApi for GatedAuth {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, ApiError> {
        let grant = self.inner.login(credentials).await;
        if credentials.email == self.gated_email {
            self.entered.notify_one();
            self.release.notified().await;
        }
        grant
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError> {
        self.inner.register(registration).await
    }

    async fn profile(&self, credential: &Credential) -> Result<Identity, ApiError> {
        self.inner.profile(credential).await
    }
}

fn gated(
    api: &InMemoryApi,
    store: &InMemoryRepository,
    gated_email: &str,
) -> (Arc<SessionController>, Arc<Notify>, Arc<Notify>) {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let auth = GatedAuth {
        inner: api.clone(),
        entered: Arc::clone(&entered),
        release: Arc::clone(&release),
        gated_email: gated_email.to_string(),
    };
    let session = Arc::new(SessionController::new(
        Arc::new(auth),
        Arc::new(api.clone()),
        Arc::new(store.clone()),
    ));
    (session, entered, release)
}

#[tokio::test]
async fn fresh_visitor_is_sent_to_login() {
    let api = seeded(None);
    let session = controller(&api, &InMemoryRepository::new());

    assert_eq!(
        session.authorize(ViewAccess::Authenticated),
        AccessDecision::ShowLoadingIndicator
    );
    let snapshot = session.restore_session().await;
    assert!(!snapshot.loading);
    assert!(snapshot.identity.is_none());
    assert_eq!(
        session.authorize(ViewAccess::Authenticated),
        AccessDecision::RedirectToLogin
    );
    assert_eq!(session.authorize(ViewAccess::Public), AccessDecision::Allow);
}

#[tokio::test]
async fn returning_user_with_role_is_kept_out_of_role_selection() {
    let api = seeded(Some(Role::Sde));
    let store = InMemoryRepository::new();
    store
        .save_credential(&api.issue_credential("asha@iitb.ac.in").unwrap())
        .await
        .unwrap();
    let session = controller(&api, &store);

    session.restore_session().await;
    assert_eq!(session.snapshot().state(), AccessState::Active);
    assert_eq!(
        session.authorize(ViewAccess::AuthenticatedNoRole),
        AccessDecision::RedirectToDashboard
    );
    assert_eq!(
        session.authorize(ViewAccess::Authenticated),
        AccessDecision::Allow
    );
}

#[tokio::test]
async fn restore_runs_once() {
    let api = seeded(None);
    let store = InMemoryRepository::new();
    let session = controller(&api, &store);
    session.restore_session().await;

    // A credential appearing later is not picked up by a second restore.
    store
        .save_credential(&api.issue_credential("asha@iitb.ac.in").unwrap())
        .await
        .unwrap();
    let snapshot = session.restore_session().await;
    assert!(snapshot.identity.is_none());
}

#[tokio::test]
async fn new_account_walks_through_role_selection() {
    let api = seeded(None);
    let session = controller(&api, &InMemoryRepository::new());
    session.restore_session().await;

    let identity = session
        .register(&Registration {
            name: "Vikram".into(),
            email: "vikram@nitk.edu.in".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();
    assert!(!identity.has_role());
    assert_eq!(
        session.authorize(ViewAccess::Authenticated),
        AccessDecision::RedirectToRoleSelection
    );
    assert_eq!(
        session.authorize(ViewAccess::AuthenticatedNoRole),
        AccessDecision::Allow
    );

    let identity = session.select_role(Role::MlEngineer).await.unwrap();
    assert_eq!(identity.role(), Some(Role::MlEngineer));
    assert_eq!(session.snapshot().state(), AccessState::Active);

    // The server kept the role too.
    let credential = session.credential().unwrap();
    assert_eq!(
        api.profile(&credential).await.unwrap().role(),
        Some(Role::MlEngineer)
    );
}

#[tokio::test]
async fn selecting_the_same_role_again_is_a_no_op() {
    let api = seeded(Some(Role::DataScientist));
    let session = controller(&api, &InMemoryRepository::new());
    session.restore_session().await;
    session.login(&credentials("asha@iitb.ac.in")).await.unwrap();

    let before = session.snapshot();
    let identity = session.select_role(Role::DataScientist).await.unwrap();
    assert_eq!(identity.role(), Some(Role::DataScientist));
    assert_eq!(session.snapshot(), before);

    assert!(matches!(
        session.select_role(Role::Sde).await,
        Err(RoleAssignmentError::RoleAlreadySet {
            current: Role::DataScientist
        })
    ));
}

#[tokio::test]
async fn logout_twice_matches_logout_once() {
    let api = seeded(Some(Role::Sde));
    let store = InMemoryRepository::new();
    let session = controller(&api, &store);
    session.restore_session().await;
    session.login(&credentials("asha@iitb.ac.in")).await.unwrap();

    session.logout().await;
    let once = session.snapshot();
    session.logout().await;
    assert_eq!(session.snapshot(), once);
    assert_eq!(once.state(), AccessState::Anonymous);
    assert!(store.load_credential().await.unwrap().is_none());
}

#[tokio::test]
async fn login_resolving_after_logout_is_discarded() {
    let api = seeded(Some(Role::Sde));
    let store = InMemoryRepository::new();
    let (session, entered, release) = gated(&api, &store, "asha@iitb.ac.in");
    session.restore_session().await;

    let pending = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.login(&credentials("asha@iitb.ac.in")).await }
    });
    entered.notified().await;
    session.logout().await;
    release.notify_one();

    let result = pending.await.unwrap();
    assert!(matches!(result, Err(AuthError::Superseded)));
    assert_eq!(session.snapshot().state(), AccessState::Anonymous);
    assert!(session.credential().is_none());
    assert!(store.load_credential().await.unwrap().is_none());
}

#[tokio::test]
async fn newer_login_wins_over_slower_older_one() {
    let api = seeded(Some(Role::Sde));
    api.seed_account("Meera", "meera@bits.ac.in", PASSWORD, Some(Role::DataAnalyst))
        .unwrap();
    let store = InMemoryRepository::new();
    let (session, entered, release) = gated(&api, &store, "asha@iitb.ac.in");
    session.restore_session().await;

    let slow = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.login(&credentials("asha@iitb.ac.in")).await }
    });
    entered.notified().await;
    let fast = session.login(&credentials("meera@bits.ac.in")).await.unwrap();
    release.notify_one();

    assert!(matches!(slow.await.unwrap(), Err(AuthError::Superseded)));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.identity.as_ref().map(Identity::email), Some(fast.email()));
    assert_eq!(store.load_credential().await.unwrap(), session.credential());
}

/// Credential store whose reads always fail.
struct UnreadableStore;

#[async_trait]
impl CredentialStore for UnreadableStore {
    async fn load_credential(&self) -> Result<Option<Credential>, StorageError> {
        Err(StorageError::Connection("disk unavailable".into()))
    }

    async fn save_credential(&self, _credential: &Credential) -> Result<(), StorageError> {
        Ok(())
    }

    async fn clear_credential(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[tokio::test]
async fn unreadable_credential_store_resolves_anonymous() {
    let api = seeded(Some(Role::Sde));
    let session = SessionController::new(
        Arc::new(api.clone()),
        Arc::new(api.clone()),
        Arc::new(UnreadableStore),
    );

    let snapshot = session.restore_session().await;
    assert!(!snapshot.loading);
    assert!(snapshot.identity.is_none());
    assert_eq!(
        session.authorize(ViewAccess::Authenticated),
        AccessDecision::RedirectToLogin
    );

    // Signing in still works; the session just is not remembered.
    session.login(&credentials("asha@iitb.ac.in")).await.unwrap();
    assert_eq!(session.snapshot().state(), AccessState::Active);
}

/// Auth stub whose `profile` parks after fetching until the test releases it.
struct SlowProfile {
    inner: InMemoryApi,
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl AuthApi for SlowProfile {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthGrant, ApiError> {
        self.inner.login(credentials).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthGrant, ApiError> {
        self.inner.register(registration).await
    }

    async fn profile(&self, credential: &Credential) -> Result<Identity, ApiError> {
        let identity = self.inner.profile(credential).await;
        self.entered.notify_one();
        self.release.notified().await;
        identity
    }
}

#[tokio::test]
async fn profile_fetched_before_role_selection_keeps_the_new_role() {
    let api = seeded(None);
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let session = Arc::new(SessionController::new(
        Arc::new(SlowProfile {
            inner: api.clone(),
            entered: Arc::clone(&entered),
            release: Arc::clone(&release),
        }),
        Arc::new(api.clone()),
        Arc::new(InMemoryRepository::new()),
    ));
    session.restore_session().await;
    session.login(&credentials("asha@iitb.ac.in")).await.unwrap();

    let refresh = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.refresh_profile().await }
    });
    entered.notified().await;
    session.select_role(Role::DataAnalyst).await.unwrap();
    release.notify_one();

    let refreshed = refresh.await.unwrap().unwrap();
    assert_eq!(refreshed.role(), Some(Role::DataAnalyst));
    assert_eq!(session.snapshot().state(), AccessState::Active);
    assert_eq!(
        session.authorize(ViewAccess::AuthenticatedNoRole),
        AccessDecision::RedirectToDashboard
    );
}
