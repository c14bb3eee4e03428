use dioxus::prelude::*;
use services::{ApiError, ProgressError, ResumeError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    Unreachable,
    NotFound,
    SignedOut,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::Unreachable => "Could not reach the server. Check your connection.",
            ViewError::NotFound => "We couldn't find that.",
            ViewError::SignedOut => "Your session has ended. Please log in again.",
        }
    }
}

impl From<&ApiError> for ViewError {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized(_) => ViewError::SignedOut,
            ApiError::Status { status, .. } if status.as_u16() == 404 => ViewError::NotFound,
            ApiError::Http(_) | ApiError::Unreachable(_) => ViewError::Unreachable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<ProgressError> for ViewError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::NoSession => ViewError::SignedOut,
            ProgressError::Api(api) => ViewError::from(&api),
            _ => ViewError::Unknown,
        }
    }
}

impl From<ResumeError> for ViewError {
    fn from(err: ResumeError) -> Self {
        match err {
            ResumeError::NoSession => ViewError::SignedOut,
            ResumeError::Api(api) => ViewError::from(&api),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Inline error with a control to re-run the failed read.
#[component]
pub fn ErrorPanel(error: ViewError, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div { class: "error-panel", role: "alert",
            p { "{error.message()}" }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

#[component]
pub fn LoadingScreen() -> Element {
    rsx! {
        div { class: "loading", "Loading..." }
    }
}
