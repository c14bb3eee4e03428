use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::{AuthError, LoginCredentials, Registration};

use crate::context::AppContext;
use crate::routes::Route;
use crate::session::use_session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

impl Mode {
    fn title(self) -> &'static str {
        match self {
            Mode::Login => "Welcome back",
            Mode::Register => "Create your account",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            Mode::Login => "Log in",
            Mode::Register => "Sign up",
        }
    }

    fn toggle_label(self) -> &'static str {
        match self {
            Mode::Login => "New here? Create an account",
            Mode::Register => "Already registered? Log in",
        }
    }

    fn toggled(self) -> Self {
        match self {
            Mode::Login => Mode::Register,
            Mode::Register => Mode::Login,
        }
    }
}

fn auth_error_message(err: &AuthError) -> String {
    match err {
        AuthError::Rejected(detail) if !detail.is_empty() => detail.clone(),
        AuthError::Rejected(_) => "Invalid email or password.".into(),
        AuthError::Api(api) => api.user_message(),
        _ => "Something went wrong. Please try again.".into(),
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut session = use_session();

    let mut mode = use_signal(|| Mode::Login);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let current = mode();
        let email_value = email.read().trim().to_string();
        let password_value = password.read().clone();
        let name_value = name.read().trim().to_string();
        if email_value.is_empty() || password_value.is_empty() {
            error.set(Some("Email and password are required.".into()));
            return;
        }
        if current == Mode::Register && name_value.is_empty() {
            error.set(Some("Please tell us your name.".into()));
            return;
        }

        let controller = ctx.session();
        busy.set(true);
        error.set(None);
        spawn(async move {
            let result = match current {
                Mode::Login => {
                    controller
                        .login(&LoginCredentials {
                            email: email_value,
                            password: password_value,
                        })
                        .await
                }
                Mode::Register => {
                    controller
                        .register(&Registration {
                            name: name_value,
                            email: email_value,
                            password: password_value,
                        })
                        .await
                }
            };
            busy.set(false);
            session.sync(&controller);
            match result {
                Ok(identity) if identity.has_role() => {
                    navigator.replace(Route::Dashboard {});
                }
                Ok(_) => {
                    navigator.replace(Route::SelectRole {});
                }
                Err(AuthError::Superseded) => {}
                Err(err) => error.set(Some(auth_error_message(&err))),
            }
        });
    };

    let current = mode();

    rsx! {
        div { class: "page auth-page",
            div { class: "auth-card",
                h2 { "{current.title()}" }
                p { class: "auth-subtitle", "Track your interview preparation in one place." }

                form { class: "auth-form", onsubmit: on_submit,
                    if current == Mode::Register {
                        label { class: "field",
                            span { "Name" }
                            input {
                                r#type: "text",
                                value: "{name}",
                                oninput: move |evt| name.set(evt.value()),
                            }
                        }
                    }
                    label { class: "field",
                        span { "Email" }
                        input {
                            r#type: "email",
                            value: "{email}",
                            oninput: move |evt| email.set(evt.value()),
                        }
                    }
                    label { class: "field",
                        span { "Password" }
                        input {
                            r#type: "password",
                            value: "{password}",
                            oninput: move |evt| password.set(evt.value()),
                        }
                    }

                    if let Some(message) = error() {
                        p { class: "form-error", role: "alert", "{message}" }
                    }

                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: busy(),
                        if busy() { "Please wait..." } else { "{current.submit_label()}" }
                    }
                }

                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| {
                        mode.set(current.toggled());
                        error.set(None);
                    },
                    "{current.toggle_label()}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::ApiError;

    #[test]
    fn rejection_detail_is_shown_verbatim() {
        let err = AuthError::Rejected("Invalid credentials".into());
        assert_eq!(auth_error_message(&err), "Invalid credentials");
    }

    #[test]
    fn network_failures_read_as_connection_problems() {
        let err = AuthError::Api(ApiError::Unreachable("offline".into()));
        assert_eq!(
            auth_error_message(&err),
            "Could not reach the server. Check your connection."
        );
    }

    #[test]
    fn mode_toggles_between_forms() {
        assert_eq!(Mode::Login.toggled(), Mode::Register);
        assert_eq!(Mode::Register.submit_label(), "Sign up");
    }
}
