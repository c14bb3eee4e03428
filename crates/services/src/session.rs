//! Who the visitor is and what they may see.
//!
//! [`SessionController`] owns the only mutable session state. Every network
//! completion is checked against a generation counter before it may touch
//! that state: `logout` and each new `login`/`register` bump the counter, so a
//! slow response from an earlier attempt can never resurrect a cleared or
//! replaced session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prep_core::model::{Credential, Identity, IdentityError, Role};
use prep_core::{AccessDecision, SessionSnapshot, ViewAccess};
use storage::CredentialStore;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

use crate::api::{AccountApi, AuthApi, AuthGrant, LoginCredentials, Registration};
use crate::error::{ApiError, AuthError, RefreshError, RoleAssignmentError};

#[derive(Debug)]
struct SessionState {
    identity: Option<Identity>,
    credential: Option<Credential>,
    loading: bool,
    generation: u64,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            identity: self.identity.clone(),
            loading: self.loading,
        }
    }
}

pub struct SessionController {
    auth: Arc<dyn AuthApi>,
    account: Arc<dyn AccountApi>,
    credentials: Arc<dyn CredentialStore>,
    state: Mutex<SessionState>,
    // Serializes credential-store writes with the generation check that guards them.
    persist: AsyncMutex<()>,
}

impl SessionController {
    /// A controller in the unresolved state; call [`Self::restore_session`] once at startup.
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthApi>,
        account: Arc<dyn AccountApi>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            auth,
            account,
            credentials,
            state: Mutex::new(SessionState {
                identity: None,
                credential: None,
                loading: true,
                generation: 0,
            }),
            persist: AsyncMutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generation(&self) -> u64 {
        self.lock().generation
    }

    fn bump_generation(&self) -> u64 {
        let mut state = self.lock();
        state.generation += 1;
        state.generation
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    #[must_use]
    pub fn authorize(&self, view: ViewAccess) -> AccessDecision {
        self.lock().snapshot().authorize(view)
    }

    /// Credential of the current session, if signed in.
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.lock().credential.clone()
    }

    /// Resolve the stored credential into an identity.
    ///
    /// Always leaves `loading` false. Any failure resolves to an anonymous
    /// session; a credential the server rejects is also removed from the store,
    /// while one that could not be checked (network failure) is kept for the
    /// next start. Calling this after the session has resolved is a no-op.
    pub async fn restore_session(&self) -> SessionSnapshot {
        let generation = {
            let state = self.lock();
            if !state.loading {
                return state.snapshot();
            }
            state.generation
        };

        let stored = match self.credentials.load_credential().await {
            Ok(stored) => stored,
            Err(err) => {
                warn!(error = %err, "could not read stored credential");
                None
            }
        };

        let Some(credential) = stored else {
            info!("no stored session");
            return self.resolve_restore(generation, None);
        };

        match self.auth.profile(&credential).await {
            Ok(identity) => {
                info!(user = %identity.id(), has_role = identity.has_role(), "session restored");
                self.resolve_restore(generation, Some((credential, identity)))
            }
            Err(err) => {
                if err.is_rejection() {
                    info!("stored credential rejected; clearing it");
                    self.clear_stored_if_current(generation).await;
                } else {
                    warn!(error = %err, "could not verify stored credential");
                }
                self.resolve_restore(generation, None)
            }
        }
    }

    fn resolve_restore(
        &self,
        generation: u64,
        resolved: Option<(Credential, Identity)>,
    ) -> SessionSnapshot {
        let mut state = self.lock();
        if state.generation == generation {
            match resolved {
                Some((credential, identity)) => {
                    state.credential = Some(credential);
                    state.identity = Some(identity);
                }
                None => {
                    state.credential = None;
                    state.identity = None;
                }
            }
        } else {
            debug!("discarding stale session restore");
        }
        state.loading = false;
        state.snapshot()
    }

    async fn clear_stored_if_current(&self, generation: u64) {
        let _persist = self.persist.lock().await;
        if self.generation() != generation {
            return;
        }
        if let Err(err) = self.credentials.clear_credential().await {
            warn!(error = %err, "could not clear stored credential");
        }
    }

    /// Exchange email and password for a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` with the server's reason for bad credentials,
    /// `AuthError::Superseded` if a logout or newer sign-in happened meanwhile,
    /// or `AuthError::Api` on transport failures.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<Identity, AuthError> {
        let generation = self.bump_generation();
        let result = self.auth.login(credentials).await;
        self.complete_sign_in(generation, result).await
    }

    /// Create an account and sign in; same semantics as [`Self::login`].
    ///
    /// # Errors
    ///
    /// See [`Self::login`].
    pub async fn register(&self, registration: &Registration) -> Result<Identity, AuthError> {
        let generation = self.bump_generation();
        let result = self.auth.register(registration).await;
        self.complete_sign_in(generation, result).await
    }

    async fn complete_sign_in(
        &self,
        generation: u64,
        result: Result<AuthGrant, ApiError>,
    ) -> Result<Identity, AuthError> {
        let grant = match result {
            Ok(grant) => grant,
            Err(err) => {
                if self.generation() != generation {
                    debug!("discarding stale sign-in failure");
                    return Err(AuthError::Superseded);
                }
                info!(error = %err, "sign-in failed");
                return Err(err.into());
            }
        };

        let _persist = self.persist.lock().await;
        if self.generation() != generation {
            debug!("discarding stale sign-in");
            return Err(AuthError::Superseded);
        }
        if let Err(err) = self.credentials.save_credential(&grant.credential).await {
            warn!(error = %err, "could not persist credential; session lasts until exit");
        }

        let mut state = self.lock();
        if state.generation != generation {
            debug!("discarding stale sign-in");
            return Err(AuthError::Superseded);
        }
        info!(user = %grant.identity.id(), has_role = grant.identity.has_role(), "signed in");
        state.credential = Some(grant.credential);
        state.identity = Some(grant.identity.clone());
        state.loading = false;
        Ok(grant.identity)
    }

    /// Persist the role of a signed-in user whose role is unset.
    ///
    /// Selecting the role the user already has is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RoleAssignmentError::NoSession` when signed out,
    /// `RoleAlreadySet` when a different role is set, `Superseded` if the
    /// session changed while the request was in flight, or `Api` when the
    /// server refuses. The identity's role stays unset on every error.
    pub async fn select_role(&self, role: Role) -> Result<Identity, RoleAssignmentError> {
        let (generation, credential, identity) = {
            let state = self.lock();
            match (&state.credential, &state.identity) {
                (Some(credential), Some(identity)) => {
                    (state.generation, credential.clone(), identity.clone())
                }
                _ => return Err(RoleAssignmentError::NoSession),
            }
        };

        match identity.role() {
            Some(current) if current == role => return Ok(identity),
            Some(current) => return Err(RoleAssignmentError::RoleAlreadySet { current }),
            None => {}
        }

        if let Err(err) = self.account.set_role(&credential, role).await {
            warn!(error = %err, %role, "role assignment failed");
            return Err(err.into());
        }

        let mut state = self.lock();
        if state.generation != generation {
            debug!("discarding stale role assignment");
            return Err(RoleAssignmentError::Superseded);
        }
        let Some(current) = state.identity.as_mut() else {
            return Err(RoleAssignmentError::NoSession);
        };
        match current.assign_role(role) {
            Ok(_) => {}
            Err(IdentityError::RoleAlreadySet { current }) => {
                return Err(RoleAssignmentError::RoleAlreadySet { current });
            }
            Err(err) => return Err(ApiError::from(err).into()),
        }
        info!(%role, "role selected");
        Ok(current.clone())
    }

    /// Re-fetch the identity, e.g. after the server awarded points.
    ///
    /// A role already assigned in this session survives a profile that
    /// still reports none.
    ///
    /// # Errors
    ///
    /// Returns `RefreshError::NoSession` when signed out, `Superseded` if the
    /// session changed meanwhile, or `Api` on failures. The current identity
    /// is kept on error.
    pub async fn refresh_profile(&self) -> Result<Identity, RefreshError> {
        let (generation, credential) = {
            let state = self.lock();
            match &state.credential {
                Some(credential) => (state.generation, credential.clone()),
                None => return Err(RefreshError::NoSession),
            }
        };

        let mut identity = self.auth.profile(&credential).await.map_err(|err| {
            warn!(error = %err, "profile refresh failed");
            RefreshError::from(err)
        })?;

        let mut state = self.lock();
        if state.generation != generation {
            debug!("discarding stale profile refresh");
            return Err(RefreshError::Superseded);
        }
        // A role is set at most once; a profile fetched before it was saved must not unset it.
        let local_role = state.identity.as_ref().and_then(Identity::role);
        if let (Some(role), false) = (local_role, identity.has_role()) {
            debug!(%role, "keeping locally assigned role over stale profile");
            identity
                .assign_role(role)
                .map_err(|err| RefreshError::Api(err.into()))?;
        }
        state.identity = Some(identity.clone());
        Ok(identity)
    }

    /// End the session. Safe to call when already signed out.
    pub async fn logout(&self) {
        let was_signed_in = {
            let mut state = self.lock();
            state.generation += 1;
            state.loading = false;
            state.credential = None;
            state.identity.take().is_some()
        };

        let _persist = self.persist.lock().await;
        if let Err(err) = self.credentials.clear_credential().await {
            warn!(error = %err, "could not clear stored credential");
        }
        if was_signed_in {
            info!("signed out");
        }
    }
}
