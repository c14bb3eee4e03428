use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Level, Role, UserId};
use crate::progression::level_for;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("display name cannot be empty")]
    EmptyName,

    #[error("email address is invalid")]
    InvalidEmail,

    #[error("role is already set to {current}")]
    RoleAlreadySet { current: Role },
}

//
// ─── STREAK & ACTIVITY ─────────────────────────────────────────────────────────
//

/// Consecutive-day activity counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
}

impl Streak {
    #[must_use]
    pub fn new(current: u32, longest: u32) -> Self {
        Self {
            current,
            longest: longest.max(current),
        }
    }
}

/// Kinds of activity counted towards the weekly summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Dsa,
    Leetcode,
    Github,
    Linkedin,
}

impl ActivityKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Dsa => "dsa",
            ActivityKind::Leetcode => "leetcode",
            ActivityKind::Github => "github",
            ActivityKind::Linkedin => "linkedin",
        }
    }
}

/// Activity counts for the current week. Kinds never reported count as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyActivity {
    #[serde(default)]
    pub dsa: u32,
    #[serde(default)]
    pub leetcode: u32,
    #[serde(default)]
    pub github: u32,
    #[serde(default)]
    pub linkedin: u32,
}

impl WeeklyActivity {
    #[must_use]
    pub fn count(&self, kind: ActivityKind) -> u32 {
        match kind {
            ActivityKind::Dsa => self.dsa,
            ActivityKind::Leetcode => self.leetcode,
            ActivityKind::Github => self.github,
            ActivityKind::Linkedin => self.linkedin,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.dsa
            .saturating_add(self.leetcode)
            .saturating_add(self.github)
            .saturating_add(self.linkedin)
    }
}

//
// ─── IDENTITY ──────────────────────────────────────────────────────────────────
//

/// Unvalidated identity fields, as received from the authentication service.
#[derive(Clone, Debug)]
pub struct IdentityDraft {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub points: u32,
    pub level: Option<String>,
    pub streak: Streak,
    pub weekly_activity: WeeklyActivity,
}

impl IdentityDraft {
    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::EmptyName` if the name is blank and
    /// `IdentityError::InvalidEmail` if the email has no `@`-separated parts.
    pub fn validate(self) -> Result<Identity, IdentityError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(IdentityError::EmptyName);
        }

        let email = self.email.trim().to_ascii_lowercase();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(IdentityError::InvalidEmail),
        }

        Ok(Identity {
            id: self.id,
            name,
            email,
            role: self.role,
            points: self.points,
            stored_level: Level::from_label(self.level.as_deref()),
            streak: self.streak,
            weekly_activity: self.weekly_activity,
        })
    }
}

/// The signed-in visitor.
///
/// `role` is either unset (new account) or one valid [`Role`]; once set it
/// never changes for the life of the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    id: UserId,
    name: String,
    email: String,
    role: Option<Role>,
    points: u32,
    stored_level: Level,
    streak: Streak,
    weekly_activity: WeeklyActivity,
}

impl Identity {
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    #[must_use]
    pub fn has_role(&self) -> bool {
        self.role.is_some()
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Level band derived from the current points.
    #[must_use]
    pub fn level(&self) -> Level {
        level_for(self.points)
    }

    /// Level label as last stored by the server.
    #[must_use]
    pub fn stored_level(&self) -> Level {
        self.stored_level
    }

    #[must_use]
    pub fn streak(&self) -> Streak {
        self.streak
    }

    #[must_use]
    pub fn weekly_activity(&self) -> WeeklyActivity {
        self.weekly_activity
    }

    /// Set the role of a new account.
    ///
    /// Returns `Ok(true)` when the role changed and `Ok(false)` when the same
    /// role was already set.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::RoleAlreadySet` if a different role is set.
    pub fn assign_role(&mut self, role: Role) -> Result<bool, IdentityError> {
        match self.role {
            None => {
                self.role = Some(role);
                Ok(true)
            }
            Some(current) if current == role => Ok(false),
            Some(current) => Err(IdentityError::RoleAlreadySet { current }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> IdentityDraft {
        IdentityDraft {
            id: UserId::random(),
            name: "  Asha ".into(),
            email: "Asha@Example.EDU".into(),
            role: None,
            points: 0,
            level: None,
            streak: Streak::default(),
            weekly_activity: WeeklyActivity::default(),
        }
    }

    #[test]
    fn validate_normalizes_name_and_email() {
        let identity = draft().validate().unwrap();
        assert_eq!(identity.name(), "Asha");
        assert_eq!(identity.email(), "asha@example.edu");
        assert_eq!(identity.stored_level(), Level::Beginner);
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut d = draft();
        d.name = "   ".into();
        assert_eq!(d.validate().unwrap_err(), IdentityError::EmptyName);
    }

    #[test]
    fn validate_rejects_email_without_domain() {
        let mut d = draft();
        d.email = "asha@".into();
        assert_eq!(d.validate().unwrap_err(), IdentityError::InvalidEmail);
    }

    #[test]
    fn assign_role_is_set_once() {
        let mut identity = draft().validate().unwrap();
        assert!(identity.assign_role(Role::Sde).unwrap());
        assert!(!identity.assign_role(Role::Sde).unwrap());
        assert_eq!(
            identity.assign_role(Role::MlEngineer).unwrap_err(),
            IdentityError::RoleAlreadySet { current: Role::Sde }
        );
        assert_eq!(identity.role(), Some(Role::Sde));
    }

    #[test]
    fn level_is_derived_from_points() {
        let mut d = draft();
        d.points = 150;
        d.level = Some("Advanced".into());
        let identity = d.validate().unwrap();
        assert_eq!(identity.level(), Level::Intermediate);
        assert_eq!(identity.stored_level(), Level::Advanced);
    }

    #[test]
    fn streak_longest_never_below_current() {
        assert_eq!(Streak::new(5, 2), Streak { current: 5, longest: 5 });
    }
}
