use dioxus::prelude::*;
use dioxus_router::Router;
use prep_core::SessionSnapshot;

use crate::context::AppContext;
use crate::routes::Route;
use crate::session::use_session_provider;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let mut session = use_session_provider(SessionSnapshot::loading);

    // Resolve the stored credential once; protected routes show the loading
    // screen until this lands.
    use_future(move || {
        let controller = ctx.session();
        async move {
            let snapshot = controller.restore_session().await;
            session.set(snapshot);
        }
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Placement Prep" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
