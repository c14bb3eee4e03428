//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::{IdentityError, Role, RoleError};
use storage::StorageError;

/// Errors emitted by the remote API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("API base URL is invalid: {0}")]
    InvalidBaseUrl(String),
    #[error("not authorized: {0}")]
    Unauthorized(String),
    #[error("request failed with status {status}: {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Message suitable for showing inline next to a form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized(detail) | ApiError::Status { detail, .. } => detail.clone(),
            ApiError::Http(_) | ApiError::Unreachable(_) => {
                "Could not reach the server. Check your connection.".into()
            }
            ApiError::InvalidBaseUrl(_) | ApiError::Decode(_) => {
                "Something went wrong. Please try again.".into()
            }
        }
    }

    /// True when the server rejected the credential or the request itself,
    /// as opposed to the request never completing.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::Status { .. })
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<RoleError> for ApiError {
    fn from(err: RoleError) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Errors emitted by `SessionController::login` and `register`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error("sign-in was superseded by a newer session change")]
    Superseded,
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        if err.is_rejection() {
            AuthError::Rejected(err.user_message())
        } else {
            AuthError::Api(err)
        }
    }
}

/// Errors emitted by `SessionController::select_role`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoleAssignmentError {
    #[error("no signed-in user")]
    NoSession,
    #[error("role is already set to {current}")]
    RoleAlreadySet { current: Role },
    #[error("role change was superseded by a newer session change")]
    Superseded,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `SessionController::refresh_profile`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RefreshError {
    #[error("no signed-in user")]
    NoSession,
    #[error("profile refresh was superseded by a newer session change")]
    Superseded,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ProgressService`. These stay local to the calling view.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("no signed-in user")]
    NoSession,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `TaskService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaskError {
    #[error("no signed-in user")]
    NoSession,
    #[error("solution is empty")]
    EmptySubmission,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `MentorService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MentorError {
    #[error("no signed-in user")]
    NoSession,
    #[error("voice message is empty")]
    EmptyAudio,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ResumeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResumeError {
    #[error("no signed-in user")]
    NoSession,
    #[error("resume is empty")]
    EmptyResume,
    #[error("no target company selected")]
    NoCompany,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] storage::sqlite::SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
}
