use dioxus::prelude::*;
use dioxus_router::use_navigator;
use prep_core::model::Role;
use services::RoleAssignmentError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::session::use_session;

fn role_error_message(err: &RoleAssignmentError) -> String {
    match err {
        RoleAssignmentError::NoSession => "Your session has ended. Please log in again.".into(),
        RoleAssignmentError::RoleAlreadySet { current } => {
            format!("Your role is already set to {}.", current.label())
        }
        RoleAssignmentError::Api(api) => api.user_message(),
        _ => "Something went wrong. Please try again.".into(),
    }
}

#[component]
pub fn SelectRoleView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut session = use_session();
    let mut pending = use_signal(|| None::<Role>);
    let mut error = use_signal(|| None::<String>);

    let choose = use_callback(move |role: Role| {
        if pending().is_some() {
            return;
        }
        let controller = ctx.session();
        pending.set(Some(role));
        error.set(None);
        spawn(async move {
            let result = controller.select_role(role).await;
            pending.set(None);
            session.sync(&controller);
            match result {
                Ok(_) => {
                    navigator.replace(Route::Dashboard {});
                }
                Err(RoleAssignmentError::Superseded) => {}
                Err(err) => error.set(Some(role_error_message(&err))),
            }
        });
    });

    rsx! {
        div { class: "page role-page",
            h2 { "Choose your target role" }
            p { class: "page-subtitle",
                "We tailor your tracks and readiness score to it. You can only pick once."
            }

            if let Some(message) = error() {
                p { class: "form-error", role: "alert", "{message}" }
            }

            div { class: "role-grid",
                for role in Role::ALL {
                    button {
                        key: "{role.label()}",
                        class: "role-card",
                        r#type: "button",
                        disabled: pending().is_some(),
                        onclick: move |_| choose.call(role),
                        h3 { "{role.label()}" }
                        p { "{role.description()}" }
                        if pending() == Some(role) {
                            span { class: "role-pending", "Saving..." }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_set_names_the_current_role() {
        let err = RoleAssignmentError::RoleAlreadySet {
            current: Role::DataScientist,
        };
        assert_eq!(
            role_error_message(&err),
            "Your role is already set to Data Scientist."
        );
    }
}
