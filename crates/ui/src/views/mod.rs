mod dashboard;
mod login;
mod profile;
mod readiness;
mod resume;
mod select_role;
mod state;
mod task;
mod track_detail;
mod tracks;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use login::LoginView;
pub use profile::ProfileView;
pub use readiness::ReadinessView;
pub use resume::ResumeView;
pub use select_role::SelectRoleView;
pub use state::{ErrorPanel, LoadingScreen, ViewError, ViewState, view_state_from_resource};
pub use task::TaskView;
pub use track_detail::TrackDetailView;
pub use tracks::{AnalyticsView, DsaTracksView};
