//! Reactive projection of the session controller.
//!
//! The controller owns session state; views read this signal and call
//! [`SessionSignal::sync`] after every controller action so the guard and
//! header re-render with the new snapshot.

use dioxus::prelude::*;
use prep_core::SessionSnapshot;
use services::SessionController;

#[derive(Clone, Copy, PartialEq)]
pub struct SessionSignal(Signal<SessionSnapshot>);

impl SessionSignal {
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.0.read().clone()
    }

    pub fn set(&mut self, snapshot: SessionSnapshot) {
        self.0.set(snapshot);
    }

    /// Copy the controller's current state into the signal.
    pub fn sync(&mut self, controller: &SessionController) {
        self.0.set(controller.snapshot());
    }
}

/// Provide the session signal to the subtree, starting from `initial`.
pub fn use_session_provider(initial: impl FnOnce() -> SessionSnapshot) -> SessionSignal {
    use_context_provider(|| SessionSignal(Signal::new(initial())))
}

#[must_use]
pub fn use_session() -> SessionSignal {
    use_context::<SessionSignal>()
}
