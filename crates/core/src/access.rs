//! Route access decisions.
//!
//! Every navigation is checked against the visitor's session before a view is
//! rendered. The decision depends only on whether the session is still being
//! restored, whether an identity is present, whether that identity has a
//! role, and the access level the requested view requires.

use crate::model::Identity;

/// Access level a view requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewAccess {
    /// Reachable by anyone, e.g. the login page.
    Public,
    /// Requires a signed-in identity with a role.
    Authenticated,
    /// Requires a signed-in identity that has not chosen a role yet
    /// (the role-selection view itself).
    AuthenticatedNoRole,
}

impl ViewAccess {
    #[must_use]
    pub fn is_protected(self) -> bool {
        !matches!(self, ViewAccess::Public)
    }
}

/// Outcome of an access check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessDecision {
    ShowLoadingIndicator,
    RedirectToLogin,
    RedirectToRoleSelection,
    RedirectToDashboard,
    Allow,
}

/// Coarse session state as seen by access control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessState {
    /// Session restoration has not finished.
    Unresolved,
    Anonymous,
    /// Signed in, no role chosen yet.
    RolePending,
    Active,
}

impl AccessState {
    #[must_use]
    pub fn from_parts(loading: bool, identity_present: bool, role_present: bool) -> Self {
        match (loading, identity_present, role_present) {
            (true, _, _) => AccessState::Unresolved,
            (false, false, _) => AccessState::Anonymous,
            (false, true, false) => AccessState::RolePending,
            (false, true, true) => AccessState::Active,
        }
    }

    #[must_use]
    pub fn of(loading: bool, identity: Option<&Identity>) -> Self {
        Self::from_parts(
            loading,
            identity.is_some(),
            identity.is_some_and(Identity::has_role),
        )
    }

    /// Decide whether a view requiring `view` access may be shown.
    #[must_use]
    pub fn decide(self, view: ViewAccess) -> AccessDecision {
        match (self, view) {
            (_, ViewAccess::Public) => AccessDecision::Allow,
            (AccessState::Unresolved, _) => AccessDecision::ShowLoadingIndicator,
            (AccessState::Anonymous, _) => AccessDecision::RedirectToLogin,
            (AccessState::RolePending, ViewAccess::Authenticated) => {
                AccessDecision::RedirectToRoleSelection
            }
            (AccessState::RolePending, ViewAccess::AuthenticatedNoRole) => AccessDecision::Allow,
            (AccessState::Active, ViewAccess::AuthenticatedNoRole) => {
                AccessDecision::RedirectToDashboard
            }
            (AccessState::Active, ViewAccess::Authenticated) => AccessDecision::Allow,
        }
    }
}

/// Decide access for a view given the session's loading flag and identity.
#[must_use]
pub fn authorize(loading: bool, identity: Option<&Identity>, view: ViewAccess) -> AccessDecision {
    AccessState::of(loading, identity).decide(view)
}

/// Read-only projection of the session handed to views.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl SessionSnapshot {
    /// Snapshot of a session whose restoration has not finished.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            identity: None,
            loading: true,
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            loading: false,
        }
    }

    #[must_use]
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            loading: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> AccessState {
        AccessState::of(self.loading, self.identity.as_ref())
    }

    #[must_use]
    pub fn authorize(&self, view: ViewAccess) -> AccessDecision {
        self.state().decide(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IdentityDraft, Role, Streak, UserId, WeeklyActivity};

    fn identity(role: Option<Role>) -> Identity {
        IdentityDraft {
            id: UserId::random(),
            name: "Ravi".into(),
            email: "ravi@iitb.ac.in".into(),
            role,
            points: 0,
            level: None,
            streak: Streak::default(),
            weekly_activity: WeeklyActivity::default(),
        }
        .validate()
        .unwrap()
    }

    fn expected(loading: bool, present: bool, role: bool, view: ViewAccess) -> AccessDecision {
        use AccessDecision as D;
        if view == ViewAccess::Public {
            return D::Allow;
        }
        if loading {
            return D::ShowLoadingIndicator;
        }
        if !present {
            return D::RedirectToLogin;
        }
        match (role, view) {
            (false, ViewAccess::Authenticated) => D::RedirectToRoleSelection,
            (false, _) => D::Allow,
            (true, ViewAccess::AuthenticatedNoRole) => D::RedirectToDashboard,
            (true, _) => D::Allow,
        }
    }

    #[test]
    fn table_is_total_and_matches() {
        let views = [
            ViewAccess::Public,
            ViewAccess::Authenticated,
            ViewAccess::AuthenticatedNoRole,
        ];
        for loading in [false, true] {
            for present in [false, true] {
                for role in [false, true] {
                    for view in views {
                        let got = AccessState::from_parts(loading, present, role).decide(view);
                        assert_eq!(
                            got,
                            expected(loading, present, role, view),
                            "loading={loading} present={present} role={role} view={view:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn public_is_allowed_while_loading() {
        assert_eq!(
            SessionSnapshot::loading().authorize(ViewAccess::Public),
            AccessDecision::Allow
        );
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login() {
        let snapshot = SessionSnapshot::anonymous();
        assert_eq!(snapshot.state(), AccessState::Anonymous);
        assert_eq!(
            snapshot.authorize(ViewAccess::Authenticated),
            AccessDecision::RedirectToLogin
        );
        assert_eq!(
            snapshot.authorize(ViewAccess::AuthenticatedNoRole),
            AccessDecision::RedirectToLogin
        );
    }

    #[test]
    fn role_pending_only_sees_role_selection() {
        let snapshot = SessionSnapshot::signed_in(identity(None));
        assert_eq!(snapshot.state(), AccessState::RolePending);
        assert_eq!(
            snapshot.authorize(ViewAccess::Authenticated),
            AccessDecision::RedirectToRoleSelection
        );
        assert_eq!(
            snapshot.authorize(ViewAccess::AuthenticatedNoRole),
            AccessDecision::Allow
        );
    }

    #[test]
    fn active_user_cannot_reenter_role_selection() {
        let snapshot = SessionSnapshot::signed_in(identity(Some(Role::Sde)));
        assert_eq!(
            snapshot.authorize(ViewAccess::AuthenticatedNoRole),
            AccessDecision::RedirectToDashboard
        );
        assert_eq!(
            authorize(false, snapshot.identity.as_ref(), ViewAccess::Authenticated),
            AccessDecision::Allow
        );
    }
}
